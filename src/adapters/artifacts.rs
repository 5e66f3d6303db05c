use crate::adapters::linear_svm::LinearSvmClassifier;
use crate::adapters::storage::LocalStorage;
use crate::adapters::tfidf::TfIdfVectorizer;
use crate::domain::ports::{ArtifactStore, Classifier, ConfigProvider, Vectorizer};
use crate::utils::error::{DetectorError, Result};

pub const DEFAULT_MODEL_FILE: &str = "modelo_svm.json";
pub const DEFAULT_VECTORIZER_FILE: &str = "vectorizer.json";

/// The classifier and the vectorizer it was trained against. Loaded once and
/// kept for the whole session.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    pub classifier: LinearSvmClassifier,
    pub vectorizer: TfIdfVectorizer,
}

impl ModelBundle {
    /// Reads both artifacts from the local directory the config points at.
    pub async fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let storage = LocalStorage::new(config.artifacts_dir());
        Self::load(&storage, config.model_file(), config.vectorizer_file()).await
    }

    pub async fn load<S: ArtifactStore>(
        store: &S,
        model_file: &str,
        vectorizer_file: &str,
    ) -> Result<Self> {
        tracing::info!("📦 Loading model from {}", store.describe(model_file));
        let classifier = read_artifact(store, model_file, LinearSvmClassifier::from_json).await?;

        tracing::info!("📦 Loading vectorizer from {}", store.describe(vectorizer_file));
        let vectorizer = read_artifact(store, vectorizer_file, TfIdfVectorizer::from_json).await?;

        let bundle = Self::new(classifier, vectorizer)?;
        tracing::info!(
            "✅ Artifacts ready: {} features, {} vocabulary terms, classes {:?}",
            bundle.classifier.n_features(),
            bundle.vectorizer.vocabulary_size(),
            bundle.classifier.classes()
        );
        Ok(bundle)
    }

    pub fn new(classifier: LinearSvmClassifier, vectorizer: TfIdfVectorizer) -> Result<Self> {
        if classifier.n_features() != vectorizer.dimension() {
            return Err(DetectorError::IncompatibleArtifactsError {
                message: format!(
                    "model expects {} features but the vectorizer produces {}",
                    classifier.n_features(),
                    vectorizer.dimension()
                ),
            });
        }
        Ok(Self {
            classifier,
            vectorizer,
        })
    }
}

async fn read_artifact<S, T, F>(store: &S, file: &str, parse: F) -> Result<T>
where
    S: ArtifactStore,
    F: FnOnce(&[u8]) -> Result<T>,
{
    let to_load_error = |e: DetectorError| {
        let message = match e {
            DetectorError::ArtifactLoadError { message, .. } => message,
            other => other.to_string(),
        };
        DetectorError::ArtifactLoadError {
            artifact: store.describe(file),
            message,
        }
    };

    let bytes = store.read_file(file).await.map_err(to_load_error)?;
    parse(&bytes).map_err(to_load_error)
}
