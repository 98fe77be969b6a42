//! Rule context module
//!
//! The context is the data a rule set is evaluated against: the entity
//! under evaluation plus whatever extra namespaces the host adds.

mod context;
mod field_lookup;

// Re-export public types
pub use context::RuleContext;
pub use field_lookup::{get_nested_value, split_path};
