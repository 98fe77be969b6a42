//! Runtime error types
//!
//! Errors here never escape the public evaluation functions. The action
//! applicator renders them into `Action <type> failed: <message>` strings.

use thiserror::Error;

/// Failure of a single action
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    /// A required action field is absent
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// Percentage is NaN or infinite
    #[error("percentage must be finite, got {0}")]
    InvalidPercentage(f64),

    /// Aggregate operation other than sum/count/avg
    #[error("unsupported aggregate operation")]
    UnsupportedOperation,

    /// The workflow accumulator key holds something other than an array
    #[error("'{key}' holds a {found} value, expected an array")]
    WorkflowAccumulator { key: String, found: &'static str },
}

/// Result type for action execution
pub type Result<T> = std::result::Result<T, ActionError>;
