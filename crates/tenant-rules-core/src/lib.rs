//! Tenant Rules Core - Core types for the tenant business rule engine
//!
//! This crate provides the data model shared across the workspace:
//! - `Value`, the JSON-like runtime value rules are evaluated against
//! - Condition trees, actions and business rule definitions
//! - Fluent builders for conditions and actions
//! - Built-in rule templates per business type
//! - Error types
//!
//! Nothing in this crate evaluates rules; see `tenant-rules-runtime`.

pub mod ast;
pub mod builder;
pub mod error;
pub mod templates;
pub mod types;

// Re-export commonly used types
pub use ast::{
    Action, AggregateOperation, BusinessRule, ComparisonOperator, Condition, LogicalOperator,
    RawCondition, RuleType,
};
pub use error::CoreError;
pub use templates::RuleTemplate;
pub use types::Value;
