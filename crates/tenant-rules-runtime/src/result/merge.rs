//! Folding rule results into one outcome

use super::rule_result::RuleResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tenant_rules_core::ast::TRIGGERED_WORKFLOWS_KEY;
use tenant_rules_core::Value;

/// Combined outcome of a rule set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedResult {
    /// Applied values of every matched rule; later rules overwrite earlier keys
    pub applied_values: HashMap<String, Value>,

    /// Errors of every matched rule, in order, duplicates kept
    pub errors: Vec<String>,

    /// Number of matched results folded in
    pub matched_rules: usize,
}

impl MergedResult {
    /// Fold one more result in; non-matching results are ignored
    pub fn overlay(&mut self, result: &RuleResult) {
        if !result.matched {
            return;
        }
        self.matched_rules += 1;
        for (key, value) in &result.applied_values {
            self.applied_values.insert(key.clone(), value.clone());
        }
        self.errors.extend(result.errors.iter().cloned());
    }

    /// Any error means the caller must not proceed with the operation
    pub fn is_blocked(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Workflow ids under `_triggered_workflows`, as strings
    pub fn triggered_workflows(&self) -> Vec<String> {
        self.applied_values
            .get(TRIGGERED_WORKFLOWS_KEY)
            .and_then(Value::as_array)
            .map(|ids| ids.iter().map(Value::to_display_string).collect())
            .unwrap_or_default()
    }
}

/// Merge results in order
pub fn merge_rule_results(results: &[RuleResult]) -> MergedResult {
    let mut merged = MergedResult::default();
    for result in results {
        merged.overlay(result);
    }
    merged
}
