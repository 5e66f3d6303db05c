pub mod toml_config;

use crate::core::policy::ThresholdPolicy;
use crate::domain::model::Variant;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_artifact_name, validate_path, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "veritas")]
#[command(about = "Credibility check for Portuguese news text using a pre-trained SVM")]
pub struct CliConfig {
    /// Optional TOML configuration file; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the exported model and vectorizer
    #[arg(long)]
    pub artifacts_dir: Option<PathBuf>,

    /// Model file name inside the artifacts directory
    #[arg(long)]
    pub model: Option<String>,

    /// Vectorizer file name inside the artifacts directory
    #[arg(long)]
    pub vectorizer: Option<String>,

    /// Decision rule and labels to use
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Fake probability above which the text is flagged as fake (analysis variant)
    #[arg(long)]
    pub fake_threshold: Option<f64>,

    /// Fake probability from which the text needs manual review (analysis variant)
    #[arg(long)]
    pub review_threshold: Option<f64>,

    /// News text to analyse; omit to read from stdin
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the news text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the N terms that weighed the most on the decision
    #[arg(long, value_name = "N")]
    pub explain: Option<usize>,

    /// Show information about the model and exit
    #[arg(long)]
    pub about: bool,

    /// Load and validate the artifacts, then exit without analysing text
    #[arg(long)]
    pub dry_run: bool,

    /// Log process CPU and memory usage
    #[arg(long)]
    pub monitor: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Upper bound for `--explain` / `output.explain`.
pub const MAX_EXPLAIN_TERMS: usize = 100;

/// Effective settings after merging the TOML file with command line flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub artifacts_dir: PathBuf,
    pub model_file: String,
    pub vectorizer_file: String,
    pub variant: Variant,
    pub fake_threshold: f64,
    pub review_threshold: f64,
    pub json: bool,
    pub explain: usize,
    pub monitor: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(TomlConfig::default())
    }
}

impl From<TomlConfig> for Settings {
    fn from(config: TomlConfig) -> Self {
        let monitor = config.monitoring_enabled();
        Self {
            artifacts_dir: config.artifacts.dir,
            model_file: config.artifacts.model,
            vectorizer_file: config.artifacts.vectorizer,
            variant: config.policy.variant,
            fake_threshold: config.policy.fake_threshold,
            review_threshold: config.policy.review_threshold,
            json: config.output.json,
            explain: config.output.explain,
            monitor,
        }
    }
}

impl Settings {
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let mut settings = Settings::from(file_config);
        settings.apply_overrides(cli);
        settings.validate()?;
        Ok(settings)
    }

    #[cfg(feature = "cli")]
    fn apply_overrides(&mut self, cli: &CliConfig) {
        if let Some(dir) = &cli.artifacts_dir {
            self.artifacts_dir = dir.clone();
        }
        if let Some(model) = &cli.model {
            self.model_file = model.clone();
        }
        if let Some(vectorizer) = &cli.vectorizer {
            self.vectorizer_file = vectorizer.clone();
        }
        if let Some(variant) = cli.variant {
            self.variant = variant;
        }
        if let Some(threshold) = cli.fake_threshold {
            self.fake_threshold = threshold;
        }
        if let Some(threshold) = cli.review_threshold {
            self.review_threshold = threshold;
        }
        if let Some(explain) = cli.explain {
            self.explain = explain;
        }
        self.json |= cli.json;
        self.monitor |= cli.monitor;
    }

    pub fn thresholds(&self) -> Result<ThresholdPolicy> {
        ThresholdPolicy::new(self.fake_threshold, self.review_threshold)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("artifacts.dir", &self.artifacts_dir.to_string_lossy())?;
        validate_artifact_name("artifacts.model", &self.model_file)?;
        validate_artifact_name("artifacts.vectorizer", &self.vectorizer_file)?;
        validate_range("output.explain", self.explain, 0, MAX_EXPLAIN_TERMS)?;
        self.thresholds()?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn artifacts_dir(&self) -> &Path {
        &self.artifacts_dir
    }

    fn model_file(&self) -> &str {
        &self.model_file
    }

    fn vectorizer_file(&self) -> &str {
        &self.vectorizer_file
    }

    fn variant(&self) -> Variant {
        self.variant
    }

    fn fake_threshold(&self) -> f64 {
        self.fake_threshold
    }

    fn review_threshold(&self) -> f64 {
        self.review_threshold
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_config_file() {
        let cli = CliConfig::parse_from(["veritas"]);
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.artifacts_dir, PathBuf::from("."));
        assert_eq!(settings.model_file(), "modelo_svm.json");
        assert_eq!(settings.variant(), Variant::Analysis);
        assert_eq!(settings.explain, 0);
        assert!(!settings.json);
    }

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[artifacts]\ndir = \"/srv/modelos\"\n\n[policy]\nvariant = \"analysis\"\nfake_threshold = 0.7\n")
            .unwrap();
        let config_path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from([
            "veritas",
            "--config",
            config_path.as_str(),
            "--variant",
            "detector",
            "--explain",
            "3",
        ]);
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.artifacts_dir, PathBuf::from("/srv/modelos"));
        assert_eq!(settings.variant, Variant::Detector);
        assert_eq!(settings.fake_threshold, 0.7);
        assert_eq!(settings.explain, 3);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let cli = CliConfig::parse_from([
            "veritas",
            "--fake-threshold",
            "0.4",
            "--review-threshold",
            "0.6",
        ]);
        assert!(Settings::resolve(&cli).is_err());
    }

    #[test]
    fn test_explain_bound_enforced() {
        let cli = CliConfig::parse_from(["veritas", "--explain", "101"]);
        assert!(Settings::resolve(&cli).is_err());

        let cli = CliConfig::parse_from(["veritas", "--explain", "100"]);
        assert_eq!(Settings::resolve(&cli).unwrap().explain, 100);
    }

    #[test]
    fn test_explain_bound_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[output]\nexplain = 500\n").unwrap();
        let config_path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from(["veritas", "--config", config_path.as_str()]);
        assert!(Settings::resolve(&cli).is_err());
    }

    #[test]
    fn test_text_and_file_conflict() {
        let result = CliConfig::try_parse_from(["veritas", "--text", "a", "--file", "b.txt"]);
        assert!(result.is_err());
    }
}
