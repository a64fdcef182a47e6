//! CLI interface for the resume ranker

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Rank resumes against a job description")]
#[command(
    long_about = "Rank a batch of resumes against a job description by combining skill extraction, domain gating, and embedding similarity"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank resumes against a job description
    Rank {
        /// Path to the job description file (plain text)
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files to rank (PDF, DOCX, TXT)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Show extracted domain info and text previews per candidate
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_output_format_parsing() {
        assert!(matches!(parse_output_format("console"), Ok(OutputFormat::Console)));
        assert!(matches!(parse_output_format("JSON"), Ok(OutputFormat::Json)));
        assert!(parse_output_format("html").is_err());
    }
}
