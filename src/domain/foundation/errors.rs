//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised while turning raw questionnaire answers into domain values.
///
/// These are the only domain failures that abort a request; data-quality
/// problems inside scheduling and costing are reported as notes instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}
