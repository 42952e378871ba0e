use crate::adapters::csv_store::{CsvStore, DEFAULT_SURVEYS_FILE, DEFAULT_TICKETS_FILE};
use crate::core::classifier::{KeywordClassifier, DEFAULT_HIGH_KEYWORDS, DEFAULT_MEDIUM_KEYWORDS};
use crate::core::Priority;
use crate::utils::error::{AnalyticsError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_FORMATS: &[&str] = &["compact", "json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub store: StoreConfig,
    pub classifier: ClassifierConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: String,
    pub tickets_file: String,
    pub surveys_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            tickets_file: DEFAULT_TICKETS_FILE.to_string(),
            surveys_file: DEFAULT_SURVEYS_FILE.to_string(),
        }
    }
}

/// Keyword sets evaluated high, then medium, then low.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub default_priority: Priority,
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            default_priority: Priority::Medium,
            high: DEFAULT_HIGH_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            medium: DEFAULT_MEDIUM_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            low: Vec::new(),
        }
    }
}

impl ClassifierConfig {
    pub fn build(&self) -> KeywordClassifier {
        KeywordClassifier::new(self.default_priority)
            .with_rule(Priority::High, &self.high)
            .with_rule(Priority::Medium, &self.medium)
            .with_rule(Priority::Low, &self.low)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            format: "compact".to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// Loads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnalyticsError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AnalyticsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AnalyticsError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("store.data_dir", &self.store.data_dir)?;
        validation::validate_non_empty_string("store.tickets_file", &self.store.tickets_file)?;
        validation::validate_non_empty_string("store.surveys_file", &self.store.surveys_file)?;

        validation::validate_keywords("classifier.high", &self.classifier.high)?;
        validation::validate_keywords("classifier.medium", &self.classifier.medium)?;
        validation::validate_keywords("classifier.low", &self.classifier.low)?;

        validation::validate_one_of("logging.format", &self.logging.format, LOG_FORMATS)?;
        Ok(())
    }

    pub fn csv_store(&self) -> CsvStore {
        CsvStore::new(&self.store.data_dir)
            .with_files(&self.store.tickets_file, &self.store.surveys_file)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }
}

impl Validate for AnalyticsConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
