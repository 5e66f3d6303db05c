use crate::domain::model::{ClassProbabilities, Variant, Verdict};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DetectorError, Result};
use crate::utils::validation::{validate_range, Validate};

pub const DEFAULT_FAKE_THRESHOLD: f64 = 0.8;
pub const DEFAULT_REVIEW_THRESHOLD: f64 = 0.5;

/// Label the model uses for genuine news.
pub const REAL_LABEL: i64 = 1;

/// Column of `predict_proba` holding the real-class probability.
///
/// Looks the label up in `classes`; a model trained with other labels falls
/// back to the second column (or the only one).
pub fn real_class_index(classes: &[i64]) -> usize {
    match classes.iter().position(|&c| c == REAL_LABEL) {
        Some(idx) => idx,
        None if classes.len() > 1 => 1,
        None => 0,
    }
}

/// Three bands over the fake-class probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPolicy {
    pub fake_threshold: f64,
    pub review_threshold: f64,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            fake_threshold: DEFAULT_FAKE_THRESHOLD,
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
        }
    }
}

impl ThresholdPolicy {
    pub fn new(fake_threshold: f64, review_threshold: f64) -> Result<Self> {
        let policy = Self {
            fake_threshold,
            review_threshold,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn probabilities(&self, proba: &[f64], classes: &[i64]) -> Result<ClassProbabilities> {
        let idx_real = real_class_index(classes);
        let real = *proba.get(idx_real).ok_or_else(|| DetectorError::InferenceError {
            message: format!(
                "expected a probability at column {}, got {} columns",
                idx_real,
                proba.len()
            ),
        })?;
        Ok(ClassProbabilities {
            fake: 1.0 - real,
            real,
        })
    }

    /// `fake > fake_threshold` is fake, `[review, fake_threshold)` needs a
    /// human look, everything else is credible. A fake probability sitting
    /// exactly on `fake_threshold` therefore lands in the credible band.
    pub fn decide(&self, probabilities: &ClassProbabilities) -> Verdict {
        let fake = probabilities.fake;
        if fake > self.fake_threshold {
            Verdict::LikelyFake
        } else if fake >= self.review_threshold && fake < self.fake_threshold {
            Verdict::NeedsReview
        } else {
            Verdict::HighCredibility
        }
    }
}

impl Validate for ThresholdPolicy {
    fn validate(&self) -> Result<()> {
        validate_range("policy.fake_threshold", self.fake_threshold, 0.0, 1.0)?;
        validate_range("policy.review_threshold", self.review_threshold, 0.0, 1.0)?;
        if self.review_threshold > self.fake_threshold {
            return Err(DetectorError::ConfigValidationError {
                field: "policy.review_threshold".to_string(),
                message: format!(
                    "review threshold {} is above fake threshold {}",
                    self.review_threshold, self.fake_threshold
                ),
            });
        }
        Ok(())
    }
}

/// Plain argmax over `[fake, real]` read positionally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArgmaxPolicy;

impl ArgmaxPolicy {
    pub fn probabilities(&self, proba: &[f64]) -> Result<ClassProbabilities> {
        match proba {
            [fake, real, ..] => Ok(ClassProbabilities {
                fake: *fake,
                real: *real,
            }),
            _ => Err(DetectorError::InferenceError {
                message: format!("expected two probability columns, got {}", proba.len()),
            }),
        }
    }

    /// Ties go to the first column, like argmax.
    pub fn decide(&self, probabilities: &ClassProbabilities) -> Verdict {
        if probabilities.fake >= probabilities.real {
            Verdict::LikelyFake
        } else {
            Verdict::Reliable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerdictPolicy {
    Threshold(ThresholdPolicy),
    Argmax(ArgmaxPolicy),
}

impl VerdictPolicy {
    pub fn for_variant(variant: Variant, thresholds: ThresholdPolicy) -> Self {
        match variant {
            Variant::Analysis => VerdictPolicy::Threshold(thresholds),
            Variant::Detector => VerdictPolicy::Argmax(ArgmaxPolicy),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let thresholds = ThresholdPolicy::new(config.fake_threshold(), config.review_threshold())?;
        Ok(Self::for_variant(config.variant(), thresholds))
    }

    pub fn variant(&self) -> Variant {
        match self {
            VerdictPolicy::Threshold(_) => Variant::Analysis,
            VerdictPolicy::Argmax(_) => Variant::Detector,
        }
    }

    pub fn probabilities(&self, proba: &[f64], classes: &[i64]) -> Result<ClassProbabilities> {
        match self {
            VerdictPolicy::Threshold(policy) => policy.probabilities(proba, classes),
            VerdictPolicy::Argmax(policy) => policy.probabilities(proba),
        }
    }

    pub fn decide(&self, probabilities: &ClassProbabilities) -> Verdict {
        match self {
            VerdictPolicy::Threshold(policy) => policy.decide(probabilities),
            VerdictPolicy::Argmax(policy) => policy.decide(probabilities),
        }
    }

    /// Value drawn on the progress bar: the real probability for the banded
    /// policy, the winning column for argmax.
    pub fn confidence(&self, probabilities: &ClassProbabilities, verdict: Verdict) -> f64 {
        match self {
            VerdictPolicy::Threshold(_) => probabilities.real,
            VerdictPolicy::Argmax(_) if verdict.is_fake() => probabilities.fake,
            VerdictPolicy::Argmax(_) => probabilities.real,
        }
    }
}
