use crate::utils::error::{AnalyticsError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(AnalyticsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AnalyticsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AnalyticsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(AnalyticsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Keyword lists must not contain blanks (a blank matches every text)
/// or case-insensitive duplicates.
pub fn validate_keywords(field_name: &str, keywords: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for keyword in keywords {
        validate_non_empty_string(field_name, keyword)?;
        if !seen.insert(keyword.trim().to_lowercase()) {
            return Err(AnalyticsError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: keyword.clone(),
                reason: "Duplicate keyword".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("store.data_dir", "./data").is_ok());
        assert!(validate_path("store.data_dir", "").is_err());
        assert!(validate_path("store.data_dir", "   ").is_err());
        assert!(validate_path("store.data_dir", "da\0ta").is_err());
    }

    #[test]
    fn test_validate_keywords() {
        let good = vec!["urgent".to_string(), "asap".to_string()];
        assert!(validate_keywords("classifier.high", &good).is_ok());

        let blank = vec!["urgent".to_string(), " ".to_string()];
        assert!(validate_keywords("classifier.high", &blank).is_err());

        let dup = vec!["Urgent".to_string(), "urgent".to_string()];
        assert!(validate_keywords("classifier.high", &dup).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("logging.format", "json", &["compact", "json"]).is_ok());
        assert!(validate_one_of("logging.format", "xml", &["compact", "json"]).is_err());
    }
}
