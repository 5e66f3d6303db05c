use crate::domain::model::SparseVector;
use crate::domain::ports::Classifier;
use crate::utils::error::{DetectorError, Result};
use serde::{Deserialize, Serialize};

fn default_prob_a() -> f64 {
    -1.0
}

/// On-disk shape of the exported linear SVM with its Platt calibration.
///
/// `coef · x + intercept` is scikit-learn's `decision_function`, positive
/// towards `classes[1]`, and `predict_proba` returns
/// `P(classes[1]) = 1 / (1 + exp(prob_a * decision + prob_b))`.
///
/// libsvm fits its sigmoid on the negated decision value and reports
/// `P(classes_[0]) = 1 / (1 + exp(probA_ * -decision + probB_))`, so an
/// exporter must write `prob_a = probA_[0]` and `prob_b = -probB_[0]`.
/// Copying `probB_` unchanged shifts every probability whenever it is
/// not zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvmArtifact {
    pub classes: Vec<i64>,
    pub coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_prob_a")]
    pub prob_a: f64,
    #[serde(default)]
    pub prob_b: f64,
}

#[derive(Debug, Clone)]
pub struct LinearSvmClassifier {
    classes: Vec<i64>,
    coef: Vec<f64>,
    intercept: f64,
    prob_a: f64,
    prob_b: f64,
}

impl LinearSvmClassifier {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let artifact: LinearSvmArtifact = serde_json::from_slice(bytes)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: LinearSvmArtifact) -> Result<Self> {
        let load_error = |message: String| DetectorError::ArtifactLoadError {
            artifact: "model".to_string(),
            message,
        };

        match artifact.classes.as_slice() {
            [a, b] if a != b => {}
            [_, _] => return Err(load_error("the two class labels are identical".to_string())),
            other => {
                return Err(load_error(format!(
                    "binary model expected, found {} classes",
                    other.len()
                )))
            }
        }

        let all_finite = artifact
            .coef
            .iter()
            .chain([&artifact.intercept, &artifact.prob_a, &artifact.prob_b])
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(load_error("model weights contain NaN or infinity".to_string()));
        }

        Ok(Self {
            classes: artifact.classes,
            coef: artifact.coef,
            intercept: artifact.intercept,
            prob_a: artifact.prob_a,
            prob_b: artifact.prob_b,
        })
    }

    pub fn decision_function(&self, features: &SparseVector) -> Result<f64> {
        let mut decision = self.intercept;
        for &(index, value) in features {
            let weight = self.coef.get(index).ok_or_else(|| DetectorError::InferenceError {
                message: format!(
                    "feature index {} is outside the model's {} coefficients",
                    index,
                    self.coef.len()
                ),
            })?;
            decision += weight * value;
        }
        Ok(decision)
    }
}

impl Classifier for LinearSvmClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_proba(&self, features: &SparseVector) -> Result<Vec<f64>> {
        let decision = self.decision_function(features)?;
        let positive = 1.0 / (1.0 + (self.prob_a * decision + self.prob_b).exp());
        if !positive.is_finite() {
            return Err(DetectorError::InferenceError {
                message: format!("probability is not finite for decision value {}", decision),
            });
        }
        Ok(vec![1.0 - positive, positive])
    }

    fn contributions(&self, features: &SparseVector) -> Vec<(usize, f64)> {
        let mut contributions: Vec<(usize, f64)> = features
            .iter()
            .filter_map(|&(index, value)| self.coef.get(index).map(|w| (index, w * value)))
            .collect();
        contributions.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        contributions
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }
}
