mod common;

use anyhow::Result;
use common::{write_artifacts, BALANCED_TEXT, FAKE_TEXT, REAL_TEXT};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use veritas_detector::adapters::tfidf::TfIdfVectorizer;
use veritas_detector::domain::model::SparseVector;
use veritas_detector::domain::ports::Classifier;
use veritas_detector::{
    CredibilityAnalyzer, DetectorError, LocalStorage, ModelBundle, ThresholdPolicy, Variant,
    Verdict, VerdictPolicy,
};

async fn load_bundle(dir: &TempDir) -> Result<ModelBundle> {
    let storage = LocalStorage::new(dir.path());
    Ok(ModelBundle::load(&storage, "modelo_svm.json", "vectorizer.json").await?)
}

fn analysis_policy() -> VerdictPolicy {
    VerdictPolicy::for_variant(Variant::Analysis, ThresholdPolicy::default())
}

fn detector_policy() -> VerdictPolicy {
    VerdictPolicy::for_variant(Variant::Detector, ThresholdPolicy::default())
}

#[tokio::test]
async fn test_analysis_variant_end_to_end() -> Result<()> {
    let dir = TempDir::new()?;
    write_artifacts(dir.path())?;
    let analyzer = CredibilityAnalyzer::from_bundle(load_bundle(&dir).await?, analysis_policy());

    let fake = analyzer.analyze(FAKE_TEXT)?;
    assert_eq!(fake.verdict, Verdict::LikelyFake);
    assert_eq!(fake.variant, Variant::Analysis);
    assert_eq!(fake.normalized_text, "urgente vacina altera o dna diz especialista");
    assert!(fake.probabilities.fake > 0.99);
    assert!((fake.probabilities.fake + fake.probabilities.real - 1.0).abs() < 1e-12);
    assert_eq!(fake.confidence, fake.probabilities.real);

    let real = analyzer.analyze(REAL_TEXT)?;
    assert_eq!(real.verdict, Verdict::HighCredibility);
    assert!(real.probabilities.real > 0.99);

    let balanced = analyzer.analyze(BALANCED_TEXT)?;
    assert_eq!(balanced.verdict, Verdict::NeedsReview);
    assert!((balanced.probabilities.real - 0.5).abs() < 1e-9);

    Ok(())
}

#[tokio::test]
async fn test_detector_variant_uses_argmax() -> Result<()> {
    let dir = TempDir::new()?;
    write_artifacts(dir.path())?;
    let analyzer = CredibilityAnalyzer::from_bundle(load_bundle(&dir).await?, detector_policy());

    let fake = analyzer.analyze(FAKE_TEXT)?;
    assert_eq!(fake.verdict, Verdict::LikelyFake);
    assert_eq!(fake.confidence, fake.probabilities.fake);

    let real = analyzer.analyze(REAL_TEXT)?;
    assert_eq!(real.verdict, Verdict::Reliable);
    assert_eq!(real.confidence, real.probabilities.real);

    // no middle band: an even split goes to the first column
    let balanced = analyzer.analyze(BALANCED_TEXT)?;
    assert_eq!(balanced.verdict, Verdict::LikelyFake);

    Ok(())
}

#[tokio::test]
async fn test_explanations_name_the_heaviest_terms() -> Result<()> {
    let dir = TempDir::new()?;
    write_artifacts(dir.path())?;
    let analyzer = CredibilityAnalyzer::from_bundle(load_bundle(&dir).await?, analysis_policy())
        .with_explanations(2);

    let analysis = analyzer.analyze(FAKE_TEXT)?;
    assert_eq!(analysis.top_terms.len(), 2);
    for term in &analysis.top_terms {
        assert!(["vacina", "altera", "dna"].contains(&term.term.as_str()));
        assert!(term.weight < 0.0);
    }

    let plain = CredibilityAnalyzer::from_bundle(load_bundle(&dir).await?, analysis_policy());
    assert!(plain.analyze(FAKE_TEXT)?.top_terms.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_artifact_is_a_load_error() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = LocalStorage::new(dir.path());

    let err = ModelBundle::load(&storage, "modelo_svm.json", "vectorizer.json")
        .await
        .unwrap_err();
    match &err {
        DetectorError::ArtifactLoadError { artifact, .. } => {
            assert!(artifact.ends_with("modelo_svm.json"))
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.user_friendly_message().starts_with("Erro ao carregar modelos"));
    Ok(())
}

#[tokio::test]
async fn test_malformed_artifact_is_a_load_error() -> Result<()> {
    let dir = TempDir::new()?;
    write_artifacts(dir.path())?;
    std::fs::write(dir.path().join("vectorizer.json"), b"not json")?;

    let err = load_bundle(&dir).await.unwrap_err();
    let err = err.downcast::<DetectorError>()?;
    assert!(matches!(err, DetectorError::ArtifactLoadError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_mismatched_dimensions_are_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    write_artifacts(dir.path())?;
    std::fs::write(
        dir.path().join("modelo_svm.json"),
        br#"{"classes": [0, 1], "coef": [1.0, -1.0], "intercept": 0.0}"#,
    )?;

    let err = load_bundle(&dir).await.unwrap_err();
    let err = err.downcast::<DetectorError>()?;
    assert!(matches!(err, DetectorError::IncompatibleArtifactsError { .. }));
    Ok(())
}

struct CountingClassifier {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl Classifier for CountingClassifier {
    fn classes(&self) -> &[i64] {
        &[0, 1]
    }

    fn predict_proba(&self, _features: &SparseVector) -> veritas_detector::Result<Vec<f64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DetectorError::InferenceError {
                message: "model exploded".to_string(),
            });
        }
        Ok(vec![0.25, 0.75])
    }

    fn contributions(&self, _features: &SparseVector) -> Vec<(usize, f64)> {
        Vec::new()
    }

    fn n_features(&self) -> usize {
        1
    }
}

fn counting_analyzer(
    fail: bool,
    policy: VerdictPolicy,
) -> Result<(CredibilityAnalyzer<TfIdfVectorizer, CountingClassifier>, Arc<AtomicUsize>)> {
    let vectorizer = TfIdfVectorizer::from_json(br#"{"vocabulary": {"vacina": 0}, "idf": [1.0]}"#)?;
    let calls = Arc::new(AtomicUsize::new(0));
    let classifier = CountingClassifier {
        calls: Arc::clone(&calls),
        fail,
    };
    Ok((CredibilityAnalyzer::new(vectorizer, classifier, policy), calls))
}

#[test]
fn test_empty_input_never_reaches_classifier() -> Result<()> {
    let (analyzer, calls) = counting_analyzer(false, analysis_policy())?;

    for text in ["", "   ", "\n\t  \r\n"] {
        assert!(matches!(analyzer.analyze(text), Err(DetectorError::EmptyInput)));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // punctuation-only text is not empty, it is scored on zero features
    let analysis = analyzer.analyze("?!")?;
    assert_eq!(analysis.normalized_text, "");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_inference_failure_halts_both_variants() -> Result<()> {
    for policy in [analysis_policy(), detector_policy()] {
        let (analyzer, calls) = counting_analyzer(true, policy)?;
        let err = analyzer.analyze("vacina").unwrap_err();
        assert!(matches!(err, DetectorError::InferenceError { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
    Ok(())
}
