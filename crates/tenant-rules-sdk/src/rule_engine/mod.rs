//! RuleEngine - Main API for evaluating tenant rules
//!
//! The module is organized into:
//! - `types`: the evaluation outcome returned to callers
//! - `engine`: the `RuleEngine` holding a loaded rule set
//! - `tests`: Unit tests (test-only)

mod engine;
mod types;

pub use engine::RuleEngine;
pub use types::EvaluationOutcome;
