use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Ticket {ticket_id} cannot be answered: {reason}")]
    InvalidTransition { ticket_id: i64, reason: String },

    #[error("Invalid record {record}: {reason}")]
    InvalidRecord { record: String, reason: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Store,
    Input,
    Data,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AnalyticsError {
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn invalid_record(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            record: record.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StoreUnavailable { .. } => ErrorCategory::Store,
            Self::InvalidRange { .. }
            | Self::InvalidWindow { .. }
            | Self::InvalidTransition { .. } => ErrorCategory::Input,
            Self::InvalidRecord { .. } | Self::CsvError(_) | Self::SerializationError(_) => {
                ErrorCategory::Data
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Store => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::StoreUnavailable { .. } => {
                "The ticket and survey data could not be read.".to_string()
            }
            Self::InvalidRange { start, end } => {
                format!("The date range {} to {} is reversed.", start, end)
            }
            Self::InvalidWindow { .. } => "The date window is reversed.".to_string(),
            Self::InvalidTransition { ticket_id, .. } => {
                format!("Ticket {} cannot be answered in its current state.", ticket_id)
            }
            Self::InvalidRecord { record, .. } => {
                format!("The data contains an invalid record ({}).", record)
            }
            Self::CsvError(_) => "A data file is not valid CSV.".to_string(),
            Self::SerializationError(_) => "Results could not be serialized.".to_string(),
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. } => {
                format!("The configuration value '{}' is invalid.", field)
            }
            Self::IoError(_) => "A file system operation failed.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::StoreUnavailable { .. } => {
                "Check that the data directory exists and contains tickets.csv and surveys.csv"
            }
            Self::InvalidRange { .. } | Self::InvalidWindow { .. } => {
                "Pass the earlier date first"
            }
            Self::InvalidTransition { .. } => "Only pending tickets can be answered",
            Self::InvalidRecord { .. } | Self::CsvError(_) => {
                "Fix the offending row in the data file and retry"
            }
            Self::SerializationError(_) => "Report this as a bug",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file against the documented sections"
            }
            Self::IoError(_) => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
