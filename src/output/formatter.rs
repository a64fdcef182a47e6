//! Rendering of ranking results to console and JSON

use crate::error::Result;
use crate::processing::pipeline::RankingOutcome;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Serializable report wrapper around a ranking outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub generated_at: DateTime<Utc>,
    pub job_description_file: String,
    pub required_skills: BTreeSet<String>,
    pub results: Vec<RankedResultRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResultRow {
    pub rank: usize,
    pub filename: String,
    pub final_score: f32,
    pub skills: BTreeSet<String>,
    pub job_titles: BTreeSet<String>,
    pub education: BTreeSet<String>,
    pub extraction_failure: Option<String>,
    pub text_preview: String,
}

impl RankingReport {
    pub fn from_outcome(outcome: &RankingOutcome, job_description_file: &str) -> Self {
        let results = outcome
            .ranked
            .iter()
            .map(|candidate| RankedResultRow {
                rank: candidate.rank,
                filename: candidate.filename.clone(),
                final_score: candidate.final_score,
                skills: candidate.skills.clone(),
                job_titles: candidate.domain_profile.job_titles.clone(),
                education: candidate.domain_profile.education.clone(),
                extraction_failure: candidate.extraction_failure.clone(),
                text_preview: truncate_text(&candidate.extracted_text, 160),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            job_description_file: job_description_file.to_string(),
            required_skills: outcome.required_skills.clone(),
            results,
        }
    }
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    pub fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut out = String::new();

        out.push_str(&format!(
            "\n{}\n",
            self.paint("Ranked candidates", |s| s.bold().to_string())
        ));
        out.push_str(&format!("Job description: {}\n", report.job_description_file));

        if report.required_skills.is_empty() {
            out.push_str("Required skills: none detected\n");
        } else {
            let skills: Vec<&str> = report.required_skills.iter().map(|s| s.as_str()).collect();
            out.push_str(&format!("Required skills: {}\n", skills.join(", ")));
        }
        out.push('\n');

        for row in &report.results {
            let score_text = format!("{:.4}", row.final_score);
            let score = if self.use_colors {
                self.colorize_score(row.final_score, &score_text)
            } else {
                score_text
            };

            out.push_str(&format!("{:>3}. {}  {}\n", row.rank, score, row.filename));

            if !row.skills.is_empty() {
                let skills: Vec<&str> = row.skills.iter().map(|s| s.as_str()).collect();
                out.push_str(&format!("     skills: {}\n", skills.join(", ")));
            }

            if let Some(reason) = &row.extraction_failure {
                out.push_str(&format!(
                    "     {}\n",
                    self.paint(&format!("extraction failed: {}", reason), |s| s
                        .yellow()
                        .to_string())
                ));
            }

            if self.detailed {
                if !row.job_titles.is_empty() {
                    let titles: Vec<&str> = row.job_titles.iter().map(|s| s.as_str()).collect();
                    out.push_str(&format!("     domain: {}\n", titles.join(", ")));
                }
                if !row.education.is_empty() {
                    let education: Vec<&str> = row.education.iter().map(|s| s.as_str()).collect();
                    out.push_str(&format!("     education: {}\n", education.join(", ")));
                }
                if !row.text_preview.is_empty() {
                    out.push_str(&format!("     preview: {}\n", row.text_preview));
                }
            }
        }

        Ok(out)
    }

    fn paint(&self, text: &str, f: impl Fn(&str) -> String) -> String {
        if self.use_colors {
            f(text)
        } else {
            text.to_string()
        }
    }

    fn colorize_score(&self, score: f32, text: &str) -> String {
        if score >= 0.7 {
            text.green().to_string()
        } else if score >= 0.4 {
            text.yellow().to_string()
        } else {
            text.red().to_string()
        }
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn format_report(&self, report: &RankingReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
