use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load artifact '{artifact}': {message}")]
    ArtifactLoadError { artifact: String, message: String },

    #[error("Model and vectorizer are incompatible: {message}")]
    IncompatibleArtifactsError { message: String },

    #[error("Inference failed: {message}")]
    InferenceError { message: String },

    #[error("Input text is empty")]
    EmptyInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Artifact,
    Inference,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DetectorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DetectorError::EmptyInput => ErrorCategory::Input,
            DetectorError::ConfigError { .. }
            | DetectorError::ConfigValidationError { .. }
            | DetectorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DetectorError::ArtifactLoadError { .. }
            | DetectorError::IncompatibleArtifactsError { .. }
            | DetectorError::SerializationError(_) => ErrorCategory::Artifact,
            DetectorError::InferenceError { .. } => ErrorCategory::Inference,
            DetectorError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Inference => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Artifact => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DetectorError::EmptyInput => "Paste or type the news text before requesting an analysis",
            DetectorError::ArtifactLoadError { .. } => {
                "Check --artifacts-dir and that modelo_svm.json and vectorizer.json exist and are valid JSON"
            }
            DetectorError::IncompatibleArtifactsError { .. } => {
                "Export the model and the vectorizer from the same training run"
            }
            DetectorError::InferenceError { .. } => {
                "Re-export the artifacts; the model rejected the vectorized text"
            }
            DetectorError::SerializationError(_) => "Make sure the artifact files are valid JSON",
            DetectorError::ConfigError { .. }
            | DetectorError::ConfigValidationError { .. }
            | DetectorError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            DetectorError::IoError(_) => "Check file permissions and that the paths exist",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DetectorError::EmptyInput => "Por favor, insira um texto para análise.".to_string(),
            DetectorError::ArtifactLoadError { .. }
            | DetectorError::IncompatibleArtifactsError { .. } => {
                format!("Erro ao carregar modelos: {}", self)
            }
            DetectorError::InferenceError { message } => {
                format!("Erro ao prever (predict_proba): {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DetectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        assert_eq!(DetectorError::EmptyInput.severity(), ErrorSeverity::Low);
        let load = DetectorError::ArtifactLoadError {
            artifact: "modelo_svm.json".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(load.category(), ErrorCategory::Artifact);
        assert_eq!(load.severity(), ErrorSeverity::High);
        assert!(load.user_friendly_message().starts_with("Erro ao carregar modelos"));
    }

    #[test]
    fn test_inference_message() {
        let err = DetectorError::InferenceError {
            message: "feature index 9 out of range".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Erro ao prever (predict_proba): feature index 9 out of range"
        );
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }
}
