//! Error types for Tenant Rules Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown aggregate operation: {0}")]
    UnknownAggregateOperation(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
