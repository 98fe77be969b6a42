//! Tenant Rules Runtime - Evaluation engine for tenant business rules
//!
//! Evaluation is a pure, synchronous function of a rule set and a
//! [`RuleContext`]. Public entry points never fail: malformed conditions
//! do not match and failing actions become error strings in the result.
//!
//! ```rust
//! use tenant_rules_core::builder::{action, condition};
//! use tenant_rules_core::{BusinessRule, Value};
//! use tenant_rules_runtime::{evaluate_rules, merge_rule_results, EvaluateOptions, RuleContext};
//! use serde_json::json;
//!
//! let rules = vec![BusinessRule::new("luxury", "Luxury fee")
//!     .with_conditions(condition::greater_than("entity.total", 1000))
//!     .add_action(action::percentage_fee(10.0))];
//!
//! let context = RuleContext::new("order", json!({"total": 2000}));
//! let results = evaluate_rules(&rules, &context, EvaluateOptions::default());
//! let merged = merge_rule_results(&results);
//!
//! assert_eq!(merged.matched_rules, 1);
//! assert_eq!(merged.applied_values.get("fee"), Some(&Value::Number(200.0)));
//! ```

pub mod action;
pub mod context;
pub mod engine;
pub mod error;
pub mod executor;
pub mod observability;
pub mod result;

// Re-export main types
pub use action::{apply_actions, execute_action, ActionOutcome, Effect};
pub use context::RuleContext;
pub use engine::{evaluate_condition, evaluate_condition_with_trace};
pub use error::{ActionError, Result};
pub use executor::{evaluate_rule, evaluate_rules, trace_rule, EvaluateOptions, RuleExecutor};
pub use observability::{
    CollectingNotifier, Metrics, MetricsCollector, MetricsSnapshot, Notification, Notifier,
    TracingNotifier,
};
pub use result::{merge_rule_results, ConditionTrace, MergedResult, RuleResult, RuleTrace};
