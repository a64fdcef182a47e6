//! Resume ranker: rank resumes against a job description

mod cli;
mod config;
mod error;
mod extraction;
mod input;
mod output;
mod processing;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use error::{ResumeRankerError, Result};
use indicatif::ProgressBar;
use input::manager::Document;
use log::{error, info};
use output::formatter::{ConsoleFormatter, JsonFormatter, RankingReport};
use processing::pipeline::RankingEngine;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Rank {
            job,
            resumes,
            output,
            detailed,
        } => {
            let output_format = cli::parse_output_format(&output).map_err(ResumeRankerError::InvalidInput)?;

            println!("🚀 Resume ranking");
            println!("💼 Job description: {}", job.display());
            println!("📄 Resumes: {}", resumes.len());

            // Upstream validation: the core pipeline assumes a non-empty job
            // description, at least one document, and per-file size limits.
            let job_description = tokio::fs::read_to_string(&job).await?;
            if job_description.trim().is_empty() {
                return Err(ResumeRankerError::InvalidInput(
                    "Job description cannot be empty".to_string(),
                ));
            }

            if resumes.is_empty() {
                return Err(ResumeRankerError::InvalidInput(
                    "No resumes provided. Please supply at least one resume file".to_string(),
                ));
            }

            let documents = load_documents(&resumes, config.processing.max_file_size_bytes).await?;

            info!("Initializing ranking engine");
            let engine = RankingEngine::from_config(&config).await?;

            let outcome = engine.rank_documents(&job_description, &documents)?;

            let job_name = job.to_string_lossy().to_string();
            let report = RankingReport::from_outcome(&outcome, &job_name);

            let rendered = match output_format {
                config::OutputFormat::Console => {
                    ConsoleFormatter::new(config.output.color_output, detailed || config.output.detailed)
                        .format_report(&report)?
                }
                config::OutputFormat::Json => JsonFormatter::new(true).format_report(&report)?,
            };
            println!("{}", rendered);

            Ok(())
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeRankerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
                Ok(())
            }
            ConfigAction::Reset => {
                Config::reset()?;
                println!("Configuration reset to defaults");
                Ok(())
            }
        },
    }
}

async fn load_documents(paths: &[PathBuf], max_file_size_bytes: u64) -> Result<Vec<Document>> {
    // Reject oversized files up front, before any extraction work starts.
    for path in paths {
        let metadata = tokio::fs::metadata(path).await?;
        if metadata.len() > max_file_size_bytes {
            return Err(ResumeRankerError::InvalidInput(format!(
                "File {} is too large. Max allowed size is {} MB",
                path.display(),
                max_file_size_bytes / (1024 * 1024)
            )));
        }
    }

    let progress = ProgressBar::new(paths.len() as u64);
    let mut documents = Vec::with_capacity(paths.len());

    for path in paths {
        let raw_bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        documents.push(Document::new(filename, raw_bytes));
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(documents)
}
