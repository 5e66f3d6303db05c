pub mod analyzer;
pub mod normalizer;
pub mod policy;

pub use crate::domain::model::{Analysis, ClassProbabilities, Variant, Verdict};
pub use crate::domain::ports::{ArtifactStore, Classifier, ConfigProvider, Vectorizer};
pub use crate::utils::error::Result;
