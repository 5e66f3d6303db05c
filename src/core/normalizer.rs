use regex::Regex;
use std::sync::OnceLock;

/// Anything outside lowercase Latin letters, the Portuguese diacritics the
/// training corpus uses, and the plain space.
const DISALLOWED: &str = r"[^a-záàâãéèêíïóôõöúçñ ]";

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DISALLOWED).expect("static pattern is valid"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static pattern is valid"))
}

/// Puts text in the same canonical form the model was trained on:
/// lowercased, restricted alphabet, single-spaced and trimmed.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let restricted = disallowed_chars().replace_all(&lowered, " ");
    whitespace_runs()
        .replace_all(&restricted, " ")
        .trim()
        .to_string()
}
