use crate::adapters::artifacts::ModelBundle;
use crate::adapters::linear_svm::LinearSvmClassifier;
use crate::adapters::tfidf::TfIdfVectorizer;
use crate::core::normalizer::normalize;
use crate::core::policy::VerdictPolicy;
use crate::domain::model::{Analysis, SparseVector, TermContribution, Variant};
use crate::domain::ports::{Classifier, Vectorizer};
use crate::utils::error::{DetectorError, Result};

/// Runs one request/response cycle: normalize, vectorize, score, decide.
pub struct CredibilityAnalyzer<V: Vectorizer, C: Classifier> {
    vectorizer: V,
    classifier: C,
    policy: VerdictPolicy,
    explain_top: usize,
}

impl CredibilityAnalyzer<TfIdfVectorizer, LinearSvmClassifier> {
    pub fn from_bundle(bundle: ModelBundle, policy: VerdictPolicy) -> Self {
        Self::new(bundle.vectorizer, bundle.classifier, policy)
    }
}

impl<V: Vectorizer, C: Classifier> CredibilityAnalyzer<V, C> {
    pub fn new(vectorizer: V, classifier: C, policy: VerdictPolicy) -> Self {
        Self {
            vectorizer,
            classifier,
            policy,
            explain_top: 0,
        }
    }

    /// Attach the `n` terms that moved the decision the most to every result.
    pub fn with_explanations(mut self, n: usize) -> Self {
        self.explain_top = n;
        self
    }

    pub fn variant(&self) -> Variant {
        self.policy.variant()
    }

    pub fn policy(&self) -> &VerdictPolicy {
        &self.policy
    }

    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        if text.trim().is_empty() {
            return Err(DetectorError::EmptyInput);
        }

        let normalized_text = normalize(text);
        tracing::debug!(
            "Normalized {} chars into {} chars",
            text.chars().count(),
            normalized_text.chars().count()
        );

        let features = self.vectorizer.transform(&normalized_text)?;
        let proba = self.classifier.predict_proba(&features).inspect_err(|e| {
            tracing::error!("❌ predict_proba failed on the {} variant: {}", self.variant(), e);
        })?;

        let probabilities = self.policy.probabilities(&proba, self.classifier.classes())?;
        let verdict = self.policy.decide(&probabilities);
        let confidence = self.policy.confidence(&probabilities, verdict);
        tracing::info!(
            "🔍 fake={:.4} real={:.4} verdict={:?}",
            probabilities.fake,
            probabilities.real,
            verdict
        );

        let top_terms = if self.explain_top > 0 {
            self.top_terms(&features)
        } else {
            Vec::new()
        };

        Ok(Analysis {
            variant: self.variant(),
            normalized_text,
            probabilities,
            verdict,
            confidence,
            top_terms,
            analyzed_at: chrono::Utc::now(),
        })
    }

    fn top_terms(&self, features: &SparseVector) -> Vec<TermContribution> {
        self.classifier
            .contributions(features)
            .into_iter()
            .filter_map(|(index, weight)| {
                self.vectorizer
                    .feature_name(index)
                    .map(|term| TermContribution {
                        term: term.to_string(),
                        weight,
                    })
            })
            .take(self.explain_top)
            .collect()
    }
}
