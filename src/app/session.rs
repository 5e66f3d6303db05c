use crate::app::report::{
    render_analysis, render_footer, render_header, render_json, render_prompt, EMPTY_INPUT_WARNING,
};
use crate::core::analyzer::CredibilityAnalyzer;
use crate::domain::model::Analysis;
use crate::domain::ports::{Classifier, Vectorizer};
use crate::utils::error::{DetectorError, Result};
use crate::utils::monitor::ProcessMonitor;
use std::io::{BufRead, Write};

/// One user at a time: read text, show the verdict, repeat.
pub struct Session<V: Vectorizer, C: Classifier> {
    analyzer: CredibilityAnalyzer<V, C>,
    json: bool,
    monitor: ProcessMonitor,
}

impl<V: Vectorizer, C: Classifier> Session<V, C> {
    pub fn new(analyzer: CredibilityAnalyzer<V, C>, json: bool, monitor: ProcessMonitor) -> Self {
        Self {
            analyzer,
            json,
            monitor,
        }
    }

    /// Analyses `text` and writes the report. Empty input gets a warning
    /// and `Ok(None)`; any other failure is returned to the caller.
    pub fn respond<W: Write>(&mut self, text: &str, out: &mut W) -> Result<Option<Analysis>> {
        match self.analyzer.analyze(text) {
            Ok(analysis) => {
                if self.json {
                    writeln!(out, "{}", render_json(&analysis)?)?;
                } else {
                    writeln!(out, "{}", render_analysis(&analysis, self.analyzer.policy()))?;
                }
                self.monitor.log_stats("Analysis");
                Ok(Some(analysis))
            }
            Err(DetectorError::EmptyInput) => {
                tracing::warn!("Empty input, skipping inference");
                if !self.json {
                    writeln!(out, "{}", EMPTY_INPUT_WARNING)?;
                }
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Paragraph-at-a-time loop: a blank line submits what was typed so
    /// far, EOF submits the remainder and ends the session.
    pub fn run_interactive<R: BufRead, W: Write>(&mut self, reader: R, out: &mut W) -> Result<usize> {
        if !self.json {
            writeln!(out, "{}", render_header(self.analyzer.variant()))?;
            write!(out, "{}", render_prompt())?;
            out.flush()?;
        }

        let mut analysed = 0;
        let mut buffer = String::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                if self.respond(&buffer, out)?.is_some() {
                    analysed += 1;
                }
                buffer.clear();
                if !self.json {
                    out.flush()?;
                }
                continue;
            }
            if !buffer.is_empty() {
                buffer.push('\n');
            }
            buffer.push_str(&line);
        }

        if !buffer.trim().is_empty() && self.respond(&buffer, out)?.is_some() {
            analysed += 1;
        }

        if !self.json {
            writeln!(out, "{}", render_footer())?;
        }
        tracing::info!("👋 Session finished after {} analyses", analysed);
        Ok(analysed)
    }
}
