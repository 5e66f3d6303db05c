use crate::core::policy::VerdictPolicy;
use crate::domain::model::{Analysis, Variant, Verdict};
use crate::utils::error::Result;
use std::fmt::Write as _;

const BAR_WIDTH: usize = 30;

pub const EMPTY_INPUT_WARNING: &str = "⚠️ Por favor, insira um texto para análise.";

pub fn progress_bar(value: f64, width: usize) -> String {
    let value = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (value * width as f64).round() as usize;
    format!(
        "[{}{}] {:.2}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        value * 100.0
    )
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

pub fn render_header(variant: Variant) -> String {
    format!(
        "{}\n\n{}\nDigite ou cole o texto da notícia abaixo para ver a análise.\n",
        variant.title(),
        variant.intro()
    )
}

pub fn render_prompt() -> &'static str {
    "Cole o texto da notícia aqui (linha em branco para analisar, Ctrl-D para sair):\n\
     Ex: 'Cientistas descobrem que comer chocolate todo dia emagrece...'\n\
     Quanto mais texto, melhor será a análise.\n"
}

pub fn render_analysis(analysis: &Analysis, policy: &VerdictPolicy) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📊 Resultado da Análise:");
    let _ = writeln!(out, "{}", analysis.verdict.label());
    let _ = writeln!(out, "{}", progress_bar(analysis.confidence, BAR_WIDTH));

    match (analysis.verdict, policy) {
        (Verdict::NeedsReview, VerdictPolicy::Threshold(bands)) => {
            let _ = writeln!(
                out,
                "ℹ️ Este texto está na faixa {:.0}%–{:.0}% — classificado como potencialmente real (recomendado: checar fontes).",
                bands.review_threshold * 100.0,
                bands.fake_threshold * 100.0
            );
        }
        (_, VerdictPolicy::Argmax(_)) => {
            let _ = writeln!(out, "Confiança da análise: {}", percent(analysis.confidence));
        }
        _ => {}
    }

    let _ = writeln!(
        out,
        "{}: {}",
        analysis.variant.fake_metric_label(),
        percent(analysis.probabilities.fake)
    );
    let _ = writeln!(
        out,
        "{}: {}",
        analysis.variant.real_metric_label(),
        percent(analysis.probabilities.real)
    );

    if !analysis.top_terms.is_empty() {
        let _ = writeln!(out, "Termos mais influentes:");
        for term in &analysis.top_terms {
            let _ = writeln!(out, "  {:<24} {:+.4}", term.term, term.weight);
        }
    }

    out
}

pub fn render_json(analysis: &Analysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

pub fn render_about(variant: Variant) -> String {
    format!(
        "ℹ️ Sobre este projeto\n\
         \n\
         Tecnologia:\n\
         - Modelo de Machine Learning (SVM) treinado com o dataset Fake.Br Corpus\n\
         - Acuracia do modelo: 96.81%\n\
         - Processamento de Linguagem Natural (NLP)\n\
         \n\
         Como funciona:\n\
         O modelo analisa padrões linguísticos e palavras-chave presentes em notícias\n\
         previamente classificadas como verdadeiras ou falsas.\n\
         \n\
         Desenvolvido por: {}\n",
        variant.credits()
    )
}

pub fn render_footer() -> &'static str {
    "⚠️ Este é um protótipo para fins educacionais. Sempre verifique informações em fontes confiáveis."
}
