//! Outcome types for RuleEngine

use chrono::{DateTime, Utc};
use serde::Serialize;
use tenant_rules_core::ast::TRIGGERED_WORKFLOWS_KEY;
use tenant_rules_core::Value;
use tenant_rules_runtime::{MergedResult, RuleResult, RuleTrace};

/// Everything one evaluation produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOutcome {
    /// Tenant the rules were selected for, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Trigger event the rules were selected for, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_event: Option<String>,

    /// One result per evaluated rule, in priority order
    pub results: Vec<RuleResult>,

    /// Results folded together; later matches overwrite earlier keys
    pub merged: MergedResult,

    /// Workflow ids triggered by every matched rule, in evaluation order
    pub triggered_workflows: Vec<String>,

    /// Condition traces, present when tracing is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traces: Option<Vec<RuleTrace>>,

    /// Wall time spent evaluating
    pub duration_ms: u64,

    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationOutcome {
    /// True when any matched rule raised an error
    pub fn is_blocked(&self) -> bool {
        self.merged.is_blocked()
    }

    pub fn errors(&self) -> &[String] {
        &self.merged.errors
    }

    /// IDs of matched rules in evaluation order
    pub fn matched_rule_ids(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.matched)
            .map(|r| r.rule_id.as_str())
            .collect()
    }
}

/// Workflow ids of every matched result, in order
///
/// The merged map keeps only the last rule's list; callers dispatching
/// workflows need all of them.
pub(crate) fn collect_triggered_workflows(results: &[RuleResult]) -> Vec<String> {
    results
        .iter()
        .filter(|r| r.matched)
        .filter_map(|r| r.applied_values.get(TRIGGERED_WORKFLOWS_KEY))
        .filter_map(Value::as_array)
        .flatten()
        .map(Value::to_display_string)
        .collect()
}
