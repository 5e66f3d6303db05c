use crate::domain::model::{SparseVector, Variant};
use crate::utils::error::Result;
use std::path::Path;

pub trait ArtifactStore: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn describe(&self, path: &str) -> String;
}

pub trait Vectorizer: Send + Sync {
    /// Turns already-normalized text into features.
    fn transform(&self, text: &str) -> Result<SparseVector>;
    fn dimension(&self) -> usize;
    fn feature_name(&self, index: usize) -> Option<&str>;
}

pub trait Classifier: Send + Sync {
    fn classes(&self) -> &[i64];
    /// One probability per entry of [`Classifier::classes`], same order.
    fn predict_proba(&self, features: &SparseVector) -> Result<Vec<f64>>;
    /// Per-feature share of the decision value, largest magnitude first.
    fn contributions(&self, features: &SparseVector) -> Vec<(usize, f64)>;
    fn n_features(&self) -> usize;
}

pub trait ConfigProvider: Send + Sync {
    fn artifacts_dir(&self) -> &Path;
    fn model_file(&self) -> &str;
    fn vectorizer_file(&self) -> &str;
    fn variant(&self) -> Variant;
    fn fake_threshold(&self) -> f64;
    fn review_threshold(&self) -> f64;
}
