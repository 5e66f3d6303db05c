pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::artifacts::ModelBundle;
pub use adapters::storage::LocalStorage;
pub use app::session::Session;
pub use config::{toml_config::TomlConfig, Settings};
pub use core::analyzer::CredibilityAnalyzer;
pub use core::normalizer::normalize;
pub use core::policy::{ArgmaxPolicy, ThresholdPolicy, VerdictPolicy};
pub use domain::model::{Analysis, ClassProbabilities, Variant, Verdict};
pub use utils::error::{DetectorError, Result};
