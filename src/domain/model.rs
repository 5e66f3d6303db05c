use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vectorized text: `(feature index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Which demo flavour is running. The two carry different decision rules
/// over the same probabilities and are kept side by side on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// "Análise de credibilidade": three bands over the fake probability.
    #[default]
    Analysis,
    /// "Detector de Fake News": argmax over the two columns.
    Detector,
}

impl Variant {
    pub fn title(&self) -> &'static str {
        match self {
            Variant::Analysis => "🤖 Análise de Credibilidade de Fake News em Português",
            Variant::Detector => "🤖 Detector de Fake News em Português",
        }
    }

    pub fn intro(&self) -> &'static str {
        match self {
            Variant::Analysis => {
                "Este é um protótipo de IA treinado para analisar a correspondência de notícias potencialmente falsas."
            }
            Variant::Detector => {
                "Este é um protótipo de IA treinado para identificar notícias potencialmente falsas."
            }
        }
    }

    pub fn fake_metric_label(&self) -> &'static str {
        match self {
            Variant::Analysis => "Correspondência com notícia Fake",
            Variant::Detector => "Probabilidade de ser Fake",
        }
    }

    pub fn real_metric_label(&self) -> &'static str {
        match self {
            Variant::Analysis => "Correspondência com notícia Verdadeira",
            Variant::Detector => "Probabilidade de ser Verdadeira",
        }
    }

    pub fn credits(&self) -> &'static str {
        match self {
            Variant::Analysis => "Veritas-SP",
            Variant::Detector => "[Nomes do Grupo]",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Analysis => write!(f, "analysis"),
            Variant::Detector => write!(f, "detector"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub fake: f64,
    pub real: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    LikelyFake,
    NeedsReview,
    HighCredibility,
    Reliable,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::LikelyFake => "🚫 POTENCIAL FAKE NEWS",
            Verdict::NeedsReview => "⚠️ POTENCIALMENTE REAL — verificar manualmente",
            Verdict::HighCredibility => "✅ ALTA CONFIABILIDADE",
            Verdict::Reliable => "✅ NOTÍCIA CONFIÁVEL",
        }
    }

    pub fn is_fake(&self) -> bool {
        matches!(self, Verdict::LikelyFake)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermContribution {
    pub term: String,
    /// Signed push on the decision value; positive leans towards the
    /// model's second class.
    pub weight: f64,
}

/// Outcome of one request/response cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub variant: Variant,
    pub normalized_text: String,
    pub probabilities: ClassProbabilities,
    pub verdict: Verdict,
    /// Value drawn on the progress bar.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_terms: Vec<TermContribution>,
    pub analyzed_at: DateTime<Utc>,
}
