//! Per-rule evaluation result

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tenant_rules_core::{Action, Value};

/// Outcome of evaluating one rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    /// ID of the evaluated rule
    pub rule_id: String,

    /// Whether the rule was active and its condition held
    pub matched: bool,

    /// The rule's actions, unmodified, when matched
    pub actions: Vec<Action>,

    /// Explicit `error` messages and action failures, in action order
    pub errors: Vec<String>,

    /// Values derived by the rule's actions
    pub applied_values: HashMap<String, Value>,
}

impl RuleResult {
    /// A result for a rule that did not match
    pub fn not_matched(rule_id: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            ..Self::default()
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
