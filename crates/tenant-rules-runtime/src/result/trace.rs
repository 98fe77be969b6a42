//! Evaluation traces for explaining why a rule did or did not match

use serde::{Deserialize, Serialize};
use tenant_rules_core::Value;

/// Trace of a single condition node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionTrace {
    /// The node rendered as an expression (e.g. `entity.price > 1000`)
    pub expression: String,

    /// Field path of a leaf comparison
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// The resolved field value; absent when the path was undefined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_value: Option<Value>,

    /// The operator used (e.g. ">", "in", "contains")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    /// The literal compared against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_value: Option<Value>,

    /// The evaluation result
    pub result: bool,

    /// Children of a logical group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<Vec<ConditionTrace>>,

    /// `and`, `or` or `not` for groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
}

impl ConditionTrace {
    /// Create a trace with only an expression and a result
    pub fn new(expression: String, result: bool) -> Self {
        Self {
            expression,
            field: None,
            left_value: None,
            operator: None,
            right_value: None,
            result,
            nested: None,
            group_type: None,
        }
    }

    /// Create a leaf comparison trace
    pub fn comparison(
        expression: String,
        field: &str,
        left_value: Option<Value>,
        operator: &str,
        right_value: Option<Value>,
        result: bool,
    ) -> Self {
        Self {
            expression,
            field: Some(field.to_string()),
            left_value,
            operator: Some(operator.to_string()),
            right_value,
            result,
            nested: None,
            group_type: None,
        }
    }

    /// Create a logical group trace
    pub fn group(group_type: &str, nested: Vec<ConditionTrace>, result: bool) -> Self {
        Self {
            expression: format!("{}:[...]", group_type),
            field: None,
            left_value: None,
            operator: None,
            right_value: None,
            result,
            nested: Some(nested),
            group_type: Some(group_type.to_string()),
        }
    }

    pub fn with_expression(mut self, expression: String) -> Self {
        self.expression = expression;
        self
    }

    /// Leaf traces that evaluated to false, depth first
    pub fn failed_leaves(&self) -> Vec<&ConditionTrace> {
        match &self.nested {
            Some(children) => children.iter().flat_map(|c| c.failed_leaves()).collect(),
            None if !self.result => vec![self],
            None => Vec::new(),
        }
    }
}

/// Trace of a single rule evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTrace {
    /// The rule ID
    pub rule_id: String,

    /// The rule name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,

    /// Rule priority at evaluation time
    pub priority: i32,

    /// Whether the rule was active
    pub active: bool,

    /// Whether the rule matched
    pub matched: bool,

    /// Condition tree trace; absent for inactive or unconditional rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionTrace>,

    /// Execution time in microseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_us: Option<u64>,
}

impl RuleTrace {
    /// Create a new rule trace
    pub fn new(rule_id: String) -> Self {
        Self {
            rule_id,
            rule_name: None,
            priority: 0,
            active: true,
            matched: false,
            condition: None,
            execution_time_us: None,
        }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.rule_name = Some(name);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Mark the rule as inactive; inactive rules never match
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self.matched = false;
        self
    }

    pub fn set_matched(mut self, matched: bool) -> Self {
        self.matched = matched;
        self
    }

    /// Attach the condition tree trace
    pub fn with_condition(mut self, condition: ConditionTrace) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set execution time
    pub fn with_execution_time(mut self, us: u64) -> Self {
        self.execution_time_us = Some(us);
        self
    }
}
