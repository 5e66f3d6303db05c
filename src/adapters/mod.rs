// Adapters layer: concrete implementations behind the domain ports.

pub mod artifacts;
pub mod linear_svm;
pub mod storage;
pub mod tfidf;
