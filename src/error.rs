//! Application error types.

use thiserror::Error;

/// Application-level errors for bizsvc.
#[derive(Error, Debug)]
pub enum AppError {
    // Caller errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    // Data layer errors
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Mapping error: {0}")]
    Mapping(#[source] serde_json::Error),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
            AppError::Mapping(_) => "MAPPING_ERROR",
            AppError::Cancelled => "CANCELLED",
            AppError::Io(_) => "IO_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }
}
