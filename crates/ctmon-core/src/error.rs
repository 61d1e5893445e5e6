//! Error types for ctmon-core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("no records to export")]
    EmptyStore,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
