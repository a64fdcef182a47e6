//! Configuration management for the resume ranker

use crate::error::{Result, ResumeRankerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub processing: ProcessingConfig,
    pub scoring: ScoringConfig,
    pub vocabulary: VocabularyConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub embedding_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Upper bound on a single uploaded document, enforced by the CLI layer.
    pub max_file_size_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score assigned to candidates whose domain profile shares nothing with
    /// the query's. Near-zero rather than zero so sorting stays well-defined.
    pub unmatched_domain_floor: f32,
}

/// Reference data for skill extraction and entity tagging. Injected rather
/// than hard-coded so tests can substitute minimal vocabularies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Known skill surface forms, matched case-sensitively against tokens.
    pub skills: Vec<String>,
    pub lexicon: LexiconConfig,
}

/// Surface forms per entity label for the lexicon tagger. The default
/// lexicon carries no education or degree entries, so those labels are
/// never produced unless a caller supplies them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub persons: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub creative_works: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub degrees: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-ranker")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                embedding_model: "minishlab/M2V_base_output".to_string(),
            },
            processing: ProcessingConfig {
                max_file_size_bytes: 5 * 1024 * 1024,
            },
            scoring: ScoringConfig {
                unmatched_domain_floor: 0.01,
            },
            vocabulary: VocabularyConfig {
                skills: default_skills(),
                lexicon: default_lexicon(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

/// Baseline skill vocabulary. Matching is exact and case-sensitive, so these
/// surface forms are the only ones the token path will ever record.
fn default_skills() -> Vec<String> {
    [
        "Python",
        "Django",
        "Machine Learning",
        "Deep Learning",
        "NLP",
        "SQL",
        "Java",
        "JavaScript",
        "React",
        "Node.js",
        "TensorFlow",
        "PyTorch",
        "HTML",
        "CSS",
        "Data Analysis",
        "AWS",
        "Docker",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_lexicon() -> LexiconConfig {
    LexiconConfig {
        persons: Vec::new(),
        organizations: [
            "AWS",
            "Amazon",
            "Google",
            "Microsoft",
            "Oracle",
            "IBM",
            "GitHub",
            "GitLab",
            "Salesforce",
            "SAP",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        products: [
            "Docker",
            "Kubernetes",
            "TensorFlow",
            "PyTorch",
            "Django",
            "React",
            "Node.js",
            "PostgreSQL",
            "MongoDB",
            "Redis",
            "Kafka",
            "Spark",
            "Tableau",
            "Excel",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        creative_works: Vec::new(),
        education: Vec::new(),
        degrees: Vec::new(),
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeRankerError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeRankerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn reset() -> Result<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.models.models_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrip() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.scoring.unmatched_domain_floor, 0.01);
        assert_eq!(parsed.processing.max_file_size_bytes, 5 * 1024 * 1024);
        assert_eq!(parsed.vocabulary.skills, config.vocabulary.skills);
    }

    #[test]
    fn test_default_vocabulary_has_baseline_skills() {
        let config = Config::default();
        assert!(config.vocabulary.skills.iter().any(|s| s == "Python"));
        assert!(config.vocabulary.skills.iter().any(|s| s == "AWS"));
        assert!(config.vocabulary.skills.iter().any(|s| s == "Docker"));
    }

    #[test]
    fn test_default_lexicon_has_no_education_entries() {
        let config = Config::default();
        assert!(config.vocabulary.lexicon.education.is_empty());
        assert!(config.vocabulary.lexicon.degrees.is_empty());
    }
}
