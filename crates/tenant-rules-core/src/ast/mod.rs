//! Rule definitions
//!
//! The shapes tenants author: condition trees, typed actions and the
//! business rule that binds them together.

pub mod action;
pub mod condition;
pub mod operator;
pub mod rule;

pub use action::{Action, AggregateOperation, DEFAULT_FEE_FIELD, TRIGGERED_WORKFLOWS_KEY};
pub use condition::{Condition, RawCondition};
pub use operator::{ComparisonOperator, LogicalOperator};
pub use rule::{BusinessRule, RuleType};
