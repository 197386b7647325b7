//! Configuration errors

use thiserror::Error;

/// Failure to read settings from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A setting that parsed but is out of range.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid host or port: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Template directory must not be empty")]
    EmptyTemplateDir,

    #[error("Render timeout must be greater than zero")]
    InvalidRenderTimeout,

    #[error("PDF engine must not be empty")]
    EmptyPdfEngine,

    #[error("Hours per day must be positive")]
    InvalidHoursPerDay,

    #[error("Default hourly rate must not be negative")]
    NegativeHourlyRate,

    #[error("Currency must be a three-letter code, got '{0}'")]
    InvalidCurrency(String),
}
