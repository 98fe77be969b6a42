//! SDK error types

use tenant_rules_core::CoreError;
use thiserror::Error;

/// SDK error type
///
/// Only loading and configuration fail. Evaluation never returns an error.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A rule document could not be parsed
    #[error("Failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid rule file
    #[error("Invalid rule file: {0}")]
    InvalidRuleFile(String),

    /// Core error (unknown template, operator, ...)
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SdkError {
    pub(crate) fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        SdkError::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
