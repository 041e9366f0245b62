//! Error types for the catmeta transformer

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not implemented: {0}")]
    Unimplemented(String),

    #[error("Missing dataset identifier: {0}")]
    MissingIdentifier(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
