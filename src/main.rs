//! LinguaLink - auto-detecting text translation
//!
//! Entry point for the `lingualink` binary: one-shot detect/translate
//! commands and an interactive session.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use lingualink::catalog;
use lingualink::cli::{Args, Commands};
use lingualink::clipboard::SystemClipboard;
use lingualink::config::Config;
use lingualink::detect::LanguageDetector;
use lingualink::error::LinguaError;
use lingualink::oracle::OracleFactory;
use lingualink::orchestrator::Orchestrator;
use lingualink::repl;
use lingualink::translate::{TranslationRequest, Translator};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load config.toml from current directory first
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };
    config.apply_env_overrides();
    config.validate()?;

    info!(
        "Oracle: {:?} at {} (model {})",
        config.oracle.backend, config.oracle.endpoint, config.oracle.model
    );

    match args.command.unwrap_or(Commands::Interactive { to: None }) {
        Commands::Interactive { to } => {
            if let Some(code) = to {
                if !catalog::is_selectable(&code) {
                    return Err(LinguaError::Config(format!("Unknown target language code '{}'", code)).into());
                }
                config.ui.default_target = code;
            }

            let oracle = OracleFactory::create_oracle(&config.oracle)?;
            let (orchestrator, notifications) =
                Orchestrator::new(oracle, Arc::new(SystemClipboard), &config.ui);
            repl::run(orchestrator, notifications).await?;
        }
        Commands::Detect { text } => {
            let oracle = OracleFactory::create_oracle(&config.oracle)?;
            let detection = LanguageDetector::new(oracle).detect(text.trim()).await?;
            println!("{}", detection.language);
        }
        Commands::Translate { text, to, from } => {
            let to = to.unwrap_or_else(|| config.ui.default_target.clone());
            let target = catalog::find_by_code(&to)
                .ok_or_else(|| LinguaError::Config(format!("Unknown target language code '{}'", to)))?;
            let oracle = OracleFactory::create_oracle(&config.oracle)?;

            let source = match from {
                Some(name) => name,
                None => {
                    let detection = LanguageDetector::new(oracle.clone()).detect(text.trim()).await?;
                    info!("Detected source language: {}", detection.language);
                    detection.language
                }
            };

            let request = TranslationRequest::new(&text, source, target.label)?;
            let result = Translator::new(oracle).translate(&request).await?;
            println!("{}", result.translated_text);
        }
        Commands::Languages => {
            print!("{}", repl::format_catalog());
        }
        Commands::Check => {
            let oracle = OracleFactory::create_oracle(&config.oracle)?;
            oracle.check_availability().await?;
            println!("{:?} backend at {} is ready", oracle.backend(), config.oracle.endpoint);
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = std::env::current_dir()?.join(".lingualink").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "lingualink.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Console stays quiet unless verbose so it does not interleave with session output
    let console_level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(console_level);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - level: {}, file: {}",
          log_level, log_dir.join("lingualink.log").display());

    Ok(())
}
