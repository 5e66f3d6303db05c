use clap::Parser;
use std::io::{IsTerminal, Read};
use veritas_detector::app::report::{render_about, render_footer, render_header};
use veritas_detector::utils::error::ErrorSeverity;
use veritas_detector::utils::logger;
use veritas_detector::utils::monitor::ProcessMonitor;
use veritas_detector::{
    CliConfig, CredibilityAnalyzer, DetectorError, ModelBundle, Session, Settings, VerdictPolicy,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting veritas");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            exit_with(&e);
        }
    };

    if cli.about {
        println!("{}", render_header(settings.variant));
        println!("{}", render_about(settings.variant));
        println!("{}", render_footer());
        return Ok(());
    }

    let mut monitor = ProcessMonitor::new(settings.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 Process monitoring enabled");
    }

    // Loaded once, kept for the whole session.
    let bundle = match ModelBundle::from_config(&settings).await {
        Ok(bundle) => bundle,
        Err(e) => {
            tracing::error!("❌ Artifact load failed: {}", e);
            exit_with(&e);
        }
    };
    monitor.log_stats("Artifacts loaded");

    let policy = VerdictPolicy::from_config(&settings)?;

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no text will be analysed");
        display_summary(&settings, &bundle, &policy);
        return Ok(());
    }

    let analyzer =
        CredibilityAnalyzer::from_bundle(bundle, policy).with_explanations(settings.explain);
    let mut session = Session::new(analyzer, settings.json, monitor);
    let mut stdout = std::io::stdout().lock();

    let outcome = if let Some(text) = &cli.text {
        session.respond(text, &mut stdout).map(|_| ())
    } else if let Some(path) = &cli.file {
        match std::fs::read_to_string(path) {
            Ok(text) => session.respond(&text, &mut stdout).map(|_| ()),
            Err(e) => Err(DetectorError::IoError(e)),
        }
    } else if std::io::stdin().is_terminal() {
        let stdin = std::io::stdin().lock();
        session.run_interactive(stdin, &mut stdout).map(|_| ())
    } else {
        let mut text = String::new();
        match std::io::stdin().read_to_string(&mut text) {
            Ok(_) => session.respond(&text, &mut stdout).map(|_| ()),
            Err(e) => Err(DetectorError::IoError(e)),
        }
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(&e);
    }

    Ok(())
}

fn exit_with(e: &DetectorError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn display_summary(settings: &Settings, bundle: &ModelBundle, policy: &VerdictPolicy) {
    use veritas_detector::domain::ports::{Classifier, Vectorizer};

    println!("📋 Configuration Summary:");
    println!("  Variant: {}", settings.variant);
    println!("  Artifacts: {}", settings.artifacts_dir.display());
    println!("  Model: {}", settings.model_file);
    println!("  Vectorizer: {}", settings.vectorizer_file);
    println!("  Features: {}", bundle.vectorizer.dimension());
    println!("  Classes: {:?}", bundle.classifier.classes());
    match policy {
        VerdictPolicy::Threshold(bands) => println!(
            "  Policy: fake > {:.2}, review {:.2}..<{:.2}",
            bands.fake_threshold, bands.review_threshold, bands.fake_threshold
        ),
        VerdictPolicy::Argmax(_) => println!("  Policy: argmax"),
    }
    println!("  Output: {}", if settings.json { "json" } else { "text" });
}
