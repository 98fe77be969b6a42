//! Static rule validation
//!
//! Finds authoring mistakes that evaluation silently tolerates: malformed
//! condition nodes, literals an operator can never match, incomplete or
//! unknown actions. Findings are warnings; a rule with warnings still
//! evaluates.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tenant_rules_core::{
    Action, BusinessRule, ComparisonOperator, Condition, LogicalOperator, Value,
};

/// A problem found in a rule definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub rule_id: String,
    /// Location inside the rule, e.g. `conditions.conditions[1]` or `actions[0]`
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.rule_id, self.path, self.message)
    }
}

struct Collector<'a> {
    rule_id: &'a str,
    warnings: Vec<ValidationWarning>,
}

impl Collector<'_> {
    fn warn(&mut self, path: &str, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            rule_id: self.rule_id.to_string(),
            path: path.to_string(),
            message: message.into(),
        });
    }

    fn check_condition(&mut self, condition: &Condition, path: &str) {
        match condition {
            Condition::And(children) | Condition::Or(children) | Condition::Not(children) => {
                if children.is_empty() {
                    self.warn(path, "logical group without conditions never matches");
                }
                if matches!(condition, Condition::Not(_)) && children.len() > 1 {
                    self.warn(
                        path,
                        format!("'not' uses only its first condition, {} ignored", children.len() - 1),
                    );
                }
                for (index, child) in children.iter().enumerate() {
                    self.check_condition(child, &format!("{}.conditions[{}]", path, index));
                }
            }
            Condition::Compare {
                field,
                operator,
                value,
            } => self.check_comparison(path, field, *operator, value.as_ref()),
            Condition::Malformed(raw) => {
                let reason = match (&raw.field, raw.operator.as_deref()) {
                    (_, None) => "condition without operator".to_string(),
                    (_, Some(op)) if op.parse::<LogicalOperator>().is_ok() => {
                        "logical group without conditions".to_string()
                    }
                    (None, Some(op)) => format!("condition '{}' without field", op),
                    (Some(field), Some(op)) if field.is_empty() => {
                        format!("condition '{}' without field", op)
                    }
                    (Some(_), Some(op)) => format!("unknown operator '{}'", op),
                };
                self.warn(path, format!("{}, never matches", reason));
            }
        }
    }

    fn check_comparison(
        &mut self,
        path: &str,
        field: &str,
        operator: ComparisonOperator,
        value: Option<&Value>,
    ) {
        if field.is_empty() || field.split('.').any(str::is_empty) {
            self.warn(path, format!("field path '{}' has an empty segment", field));
        }

        match operator {
            ComparisonOperator::In | ComparisonOperator::NotIn => {
                if !matches!(value, Some(Value::Array(_))) {
                    self.warn(path, format!("'{}' needs an array value, never matches", operator));
                }
            }
            op if op.is_numeric() => {
                if value.and_then(Value::to_number).is_none() {
                    self.warn(path, format!("'{}' needs a numeric value, never matches", operator));
                }
            }
            op if !op.is_unary() && value.is_none() => {
                self.warn(path, format!("'{}' without a value", operator));
            }
            _ => {}
        }
    }

    fn check_action(&mut self, action: &Action, path: &str) {
        if let Action::Unknown = action {
            self.warn(path, "unknown action type, skipped at evaluation");
            return;
        }
        for field in action.missing_fields() {
            self.warn(path, format!("{} action is missing '{}'", action.kind(), field));
        }
        if let Action::AddFee {
            percentage: Some(p), ..
        } = action
        {
            if !p.is_finite() || *p < 0.0 {
                self.warn(path, format!("percentage {} is not a finite non-negative number", p));
            }
        }
    }
}

/// Validate a single rule
pub fn validate_rule(rule: &BusinessRule) -> Vec<ValidationWarning> {
    let mut collector = Collector {
        rule_id: &rule.id,
        warnings: Vec::new(),
    };

    if rule.id.trim().is_empty() {
        collector.warn("id", "rule id is empty");
    }
    if rule.name.trim().is_empty() {
        collector.warn("name", "rule name is empty");
    }
    if let Some(condition) = &rule.conditions {
        collector.check_condition(condition, "conditions");
    }
    if rule.actions.is_empty() {
        collector.warn("actions", "rule has no actions");
    }
    for (index, action) in rule.actions.iter().enumerate() {
        collector.check_action(action, &format!("actions[{}]", index));
    }

    collector.warnings
}

/// Validate a rule set, including duplicate ids
pub fn validate_rules(rules: &[BusinessRule]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for rule in rules {
        if !seen.insert(rule.id.as_str()) {
            warnings.push(ValidationWarning {
                rule_id: rule.id.clone(),
                path: "id".to_string(),
                message: "duplicate rule id".to_string(),
            });
        }
        warnings.extend(validate_rule(rule));
    }

    warnings
}
