//! Condition evaluation engine
//!
//! Walks a condition tree against a [`RuleContext`](crate::RuleContext).
//! Evaluation is total: missing fields, type mismatches and malformed
//! nodes all resolve to `false`.

mod condition;
mod operators;

#[cfg(test)]
mod tests;

pub use condition::{evaluate_condition, evaluate_condition_with_trace};
