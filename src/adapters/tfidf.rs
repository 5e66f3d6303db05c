use crate::domain::model::SparseVector;
use crate::domain::ports::Vectorizer;
use crate::utils::error::{DetectorError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default scikit-learn token pattern: two or more word characters.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

/// On-disk shape of the exported vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
    #[serde(default = "default_true")]
    pub lowercase: bool,
}

#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    vocabulary: HashMap<String, usize>,
    feature_names: Vec<Option<String>>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Norm,
    lowercase: bool,
    token_pattern: Regex,
}

impl TfIdfVectorizer {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let artifact: TfIdfArtifact = serde_json::from_slice(bytes)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: TfIdfArtifact) -> Result<Self> {
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(DetectorError::ArtifactLoadError {
                artifact: "vectorizer".to_string(),
                message: format!("invalid ngram_range ({}, {})", min_n, max_n),
            });
        }

        if let Some(bad) = artifact.idf.iter().find(|v| !v.is_finite()) {
            return Err(DetectorError::ArtifactLoadError {
                artifact: "vectorizer".to_string(),
                message: format!("non-finite idf weight {}", bad),
            });
        }

        let mut feature_names = vec![None; artifact.idf.len()];
        for (term, &index) in &artifact.vocabulary {
            let slot = feature_names.get_mut(index).ok_or_else(|| {
                DetectorError::ArtifactLoadError {
                    artifact: "vectorizer".to_string(),
                    message: format!(
                        "term '{}' maps to index {} but only {} idf weights exist",
                        term,
                        index,
                        artifact.idf.len()
                    ),
                }
            })?;
            if slot.is_some() {
                return Err(DetectorError::ArtifactLoadError {
                    artifact: "vectorizer".to_string(),
                    message: format!("index {} is assigned to more than one term", index),
                });
            }
            *slot = Some(term.clone());
        }

        let token_pattern = Regex::new(TOKEN_PATTERN).map_err(|e| DetectorError::ConfigError {
            message: format!("token pattern: {}", e),
        })?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            feature_names,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            lowercase: artifact.lowercase,
            token_pattern,
        })
    }

    fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.token_pattern.find_iter(text).map(|m| m.as_str()).collect()
    }

    fn ngrams(&self, tokens: &[&str]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();
        for n in min_n..=max_n {
            if n == 1 {
                grams.extend(tokens.iter().map(|t| t.to_string()));
            } else {
                grams.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        grams
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn transform(&self, text: &str) -> Result<SparseVector> {
        let lowered;
        let text = if self.lowercase {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };

        let tokens = self.tokenize(text);
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for gram in self.ngrams(&tokens) {
            if let Some(&index) = self.vocabulary.get(&gram) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let mut features: SparseVector = counts
            .into_iter()
            .map(|(index, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + (count as f64).ln()
                } else {
                    count as f64
                };
                (index, tf * self.idf[index])
            })
            .collect();

        if self.norm == Norm::L2 {
            let norm = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, value) in features.iter_mut() {
                    *value /= norm;
                }
            }
        }

        tracing::debug!(
            "Vectorized {} tokens into {} active features",
            tokens.len(),
            features.len()
        );
        Ok(features)
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn feature_name(&self, index: usize) -> Option<&str> {
        self.feature_names.get(index)?.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(ngram_range: (usize, usize), norm: Norm) -> TfIdfArtifact {
        let vocabulary = [
            ("vacina", 0),
            ("altera", 1),
            ("dna", 2),
            ("governo", 3),
            ("vacina altera", 4),
        ]
        .into_iter()
        .map(|(t, i)| (t.to_string(), i))
        .collect();
        TfIdfArtifact {
            vocabulary,
            idf: vec![1.5, 2.0, 3.0, 1.0, 4.0],
            ngram_range,
            sublinear_tf: false,
            norm,
            lowercase: true,
        }
    }

    #[test]
    fn test_raw_weights_without_norm() {
        let vectorizer = TfIdfVectorizer::from_artifact(artifact((1, 1), Norm::None)).unwrap();
        let features = vectorizer.transform("vacina vacina altera o dna").unwrap();
        assert_eq!(features, vec![(0, 3.0), (1, 2.0), (2, 3.0)]);
    }

    #[test]
    fn test_l2_normalized() {
        let vectorizer = TfIdfVectorizer::from_artifact(artifact((1, 1), Norm::L2)).unwrap();
        let features = vectorizer.transform("vacina altera dna governo").unwrap();
        let norm: f64 = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
        assert_eq!(features.len(), 4);
    }

    #[test]
    fn test_bigrams_and_single_char_tokens() {
        let vectorizer = TfIdfVectorizer::from_artifact(artifact((1, 2), Norm::None)).unwrap();
        let features = vectorizer.transform("vacina altera a vida").unwrap();
        // "a" is dropped before n-grams are built
        assert_eq!(features, vec![(0, 1.5), (1, 2.0), (4, 4.0)]);
    }

    #[test]
    fn test_sublinear_tf() {
        let mut art = artifact((1, 1), Norm::None);
        art.sublinear_tf = true;
        let vectorizer = TfIdfVectorizer::from_artifact(art).unwrap();
        let features = vectorizer.transform("governo governo governo").unwrap();
        assert_eq!(features.len(), 1);
        assert!((features[0].1 - (1.0 + 3f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_text_is_empty() {
        let vectorizer = TfIdfVectorizer::from_artifact(artifact((1, 1), Norm::L2)).unwrap();
        assert!(vectorizer.transform("nada conhecido aqui").unwrap().is_empty());
        assert!(vectorizer.transform("").unwrap().is_empty());
    }

    #[test]
    fn test_feature_names() {
        let vectorizer = TfIdfVectorizer::from_artifact(artifact((1, 2), Norm::L2)).unwrap();
        assert_eq!(vectorizer.feature_name(4), Some("vacina altera"));
        assert_eq!(vectorizer.feature_name(99), None);
        assert_eq!(vectorizer.dimension(), 5);
    }

    #[test]
    fn test_rejects_out_of_range_vocabulary() {
        let mut art = artifact((1, 1), Norm::L2);
        art.vocabulary.insert("extra".to_string(), 10);
        assert!(TfIdfVectorizer::from_artifact(art).is_err());

        let bad_range = artifact((2, 1), Norm::L2);
        assert!(TfIdfVectorizer::from_artifact(bad_range).is_err());
    }

    #[test]
    fn test_from_json_defaults() {
        let json = br#"{"vocabulary": {"fake": 0, "news": 1}, "idf": [1.0, 1.0]}"#;
        let vectorizer = TfIdfVectorizer::from_json(json).unwrap();
        assert_eq!(vectorizer.vocabulary_size(), 2);
        let features = vectorizer.transform("fake news").unwrap();
        assert_eq!(features.len(), 2);
        assert!((features[0].1 - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }
}
