//! Evaluation results, merging and traces

mod merge;
mod rule_result;
mod trace;

pub use merge::{merge_rule_results, MergedResult};
pub use rule_result::RuleResult;
pub use trace::{ConditionTrace, RuleTrace};
