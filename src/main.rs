use std::io;
use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};

mod cli;

use cli::{Cli, OutputFormat};
use urlsum::config::Config;
use urlsum::pipeline::Pipeline;
use urlsum::summarize::{DEFAULT_MODEL, Summarizer};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("urlsum.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("urlsum")
        .join("logs")
}

fn build_after_help(has_key: bool) -> String {
    let key_line = if has_key {
        "  \x1b[32m✅\x1b[0m GROQ_API_KEY   set".to_string()
    } else {
        "  \x1b[31m❌\x1b[0m GROQ_API_KEY   (not set — required for summarization)".to_string()
    };

    let log_path = log_dir().join("urlsum.log");

    format!(
        "\nENVIRONMENT:\n{key_line}\n\nLogs are written to: {}",
        log_path.display()
    )
}

/// One line from stdin; a single URL per invocation.
fn read_url_from_stdin() -> Result<String> {
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn make_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[derive(serde::Serialize)]
struct Report<'a> {
    url: &'a str,
    source: urlsum::UrlKind,
    model: &'a str,
    summary: &'a str,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    // Read the credential exactly once, at startup; it is injected from here
    // on and never read again.
    let api_key = std::env::var("GROQ_API_KEY").unwrap_or_default();

    let after_help = build_after_help(!api_key.trim().is_empty());
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_default();

    // CLI flags take priority over config defaults
    let model = cli
        .model
        .clone()
        .or(config.default_model)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let lang = cli.lang.clone().or(config.default_lang).unwrap_or_else(|| "en".to_string());

    if cli.verbose {
        let config_path = urlsum::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        eprintln!("Model: {model}");
        eprintln!("Caption language: {lang}");
    }

    let url_input = match cli.url {
        Some(ref url) => url.trim().to_string(),
        None => read_url_from_stdin()?,
    };

    let client = reqwest::Client::new();
    let summarizer = Summarizer::new(api_key, model.clone());
    let pipeline = Pipeline::new(client, summarizer, lang);

    let spinner = make_spinner();
    let result = pipeline
        .run(&url_input, |stage| {
            debug!("stage: {stage}");
            spinner.set_message(stage.to_string());
        })
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(output) => {
            info!("summary produced for {url_input}");
            if cli.verbose {
                eprintln!("Source: {}", output.source);
            }

            let rendered = match cli.format {
                OutputFormat::Text => output.summary,
                OutputFormat::Json => serde_json::to_string_pretty(&Report {
                    url: &url_input,
                    source: output.source,
                    model: &model,
                    summary: &output.summary,
                })?,
            };

            if let Some(ref path) = cli.output {
                std::fs::write(path, &rendered)?;
                if cli.verbose {
                    eprintln!("Summary written to: {}", path.display());
                }
            } else {
                println!("{rendered}");
            }
            Ok(())
        }
        Err(e) => {
            error!("run failed: {e}");
            bail!("{}", e.user_message());
        }
    }
}
