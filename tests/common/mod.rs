#![allow(dead_code)]

use anyhow::Result;
use serde_json::json;
use std::path::Path;

pub const FAKE_TEXT: &str = "URGENTE!!! Vacina altera o DNA, diz especialista";
pub const REAL_TEXT: &str = "Governo anuncia investimento em saneamento";
pub const BALANCED_TEXT: &str = "Vacina e governo";

/// Writes a tiny model where vaccine/DNA rumours lean fake (class 0) and
/// government announcements lean real (class 1).
pub fn write_artifacts(dir: &Path) -> Result<()> {
    let vectorizer = json!({
        "vocabulary": {
            "vacina": 0, "altera": 1, "dna": 2,
            "governo": 3, "anuncia": 4, "investimento": 5
        },
        "idf": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        "ngram_range": [1, 1],
        "sublinear_tf": false,
        "norm": "l2"
    });
    let model = json!({
        "classes": [0, 1],
        "coef": [-3.0, -3.0, -3.0, 3.0, 3.0, 3.0],
        "intercept": 0.0,
        "prob_a": -1.5,
        "prob_b": 0.0
    });

    std::fs::write(dir.join("vectorizer.json"), serde_json::to_vec_pretty(&vectorizer)?)?;
    std::fs::write(dir.join("modelo_svm.json"), serde_json::to_vec_pretty(&model)?)?;
    Ok(())
}
