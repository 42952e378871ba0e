pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{CsvStore, MemoryStore};
pub use crate::config::AnalyticsConfig;
pub use crate::core::{classifier::KeywordClassifier, engine::AnalyticsEngine};
pub use crate::utils::error::{AnalyticsError, Result};
