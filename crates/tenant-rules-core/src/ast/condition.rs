//! Condition trees
//!
//! Conditions are stored as loose JSON-Logic-like objects:
//!
//! ```json
//! { "field": "entity.price", "operator": ">", "value": 1000 }
//! { "operator": "and", "conditions": [ ... ] }
//! ```
//!
//! Tenant-authored data is not trusted to be well formed, so every object
//! deserializes. [`RawCondition`] carries the stored shape and [`Condition`]
//! is the typed tree the evaluator walks. Shapes that cannot be evaluated
//! become [`Condition::Malformed`], which never matches.

use super::operator::{ComparisonOperator, LogicalOperator};
use crate::types::Value;
use serde::{Deserialize, Deserializer, Serialize};

/// Stored shape of a condition node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawCondition {
    /// Dotted path resolved against the rule context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Comparison or logical operator name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    /// Literal to compare against; an explicit `null` is kept as `Some(Value::Null)`
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,

    /// Children of a logical node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<RawCondition>>,
}

impl RawCondition {
    /// True for `{}`, which rules treat as "no condition"
    pub fn is_blank(&self) -> bool {
        self == &RawCondition::default()
    }
}

pub(crate) fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A node in a boolean expression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCondition", into = "RawCondition")]
pub enum Condition {
    /// All children must be true
    And(Vec<Condition>),

    /// At least one child must be true
    Or(Vec<Condition>),

    /// Negates the first child. Stored as a list; extra children are ignored.
    Not(Vec<Condition>),

    /// Leaf comparison of a context field against a literal
    Compare {
        field: String,
        operator: ComparisonOperator,
        value: Option<Value>,
    },

    /// A node that cannot be evaluated (no field, unknown operator, or a
    /// logical operator without children)
    Malformed(RawCondition),
}

impl Condition {
    /// Create a leaf comparison
    pub fn compare(
        field: impl Into<String>,
        operator: ComparisonOperator,
        value: Option<Value>,
    ) -> Self {
        Condition::Compare {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Logical operator of this node, if it is a combinator
    pub fn logical_operator(&self) -> Option<LogicalOperator> {
        match self {
            Condition::And(_) => Some(LogicalOperator::And),
            Condition::Or(_) => Some(LogicalOperator::Or),
            Condition::Not(_) => Some(LogicalOperator::Not),
            _ => None,
        }
    }

    /// Children of a combinator node
    pub fn children(&self) -> &[Condition] {
        match self {
            Condition::And(children) | Condition::Or(children) | Condition::Not(children) => {
                children
            }
            _ => &[],
        }
    }

    /// Number of nodes in the tree, this node included
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Condition::node_count).sum::<usize>()
    }

    /// Render the node as a compact expression, e.g. `entity.price > 1000`
    pub fn to_expression_string(&self) -> String {
        match self {
            Condition::Compare {
                field,
                operator,
                value,
            } => match (operator.is_unary(), value) {
                (true, _) => format!("{} {}", field, operator),
                (false, Some(v)) => format!("{} {} {}", field, operator, literal_text(v)),
                (false, None) => format!("{} {} undefined", field, operator),
            },
            Condition::Not(children) => match children.first() {
                Some(child) => format!("not({})", child.to_expression_string()),
                None => "not()".to_string(),
            },
            Condition::And(children) | Condition::Or(children) => {
                let joiner = if matches!(self, Condition::And(_)) {
                    " and "
                } else {
                    " or "
                };
                let parts: Vec<String> =
                    children.iter().map(Condition::to_expression_string).collect();
                format!("({})", parts.join(joiner))
            }
            Condition::Malformed(raw) => format!(
                "<malformed {}>",
                raw.operator.as_deref().unwrap_or("without operator")
            ),
        }
    }
}

fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{:?}", s),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string(value).unwrap_or_else(|_| value.to_display_string())
        }
        other => other.to_display_string(),
    }
}

impl From<RawCondition> for Condition {
    fn from(raw: RawCondition) -> Self {
        let logical = raw
            .operator
            .as_deref()
            .and_then(|op| op.parse::<LogicalOperator>().ok());

        // Combinators need a non-empty child list; anything else falls through to leaf handling
        if let (Some(logical), Some(children)) = (logical, raw.conditions.as_ref()) {
            if !children.is_empty() {
                let children: Vec<Condition> =
                    children.iter().cloned().map(Condition::from).collect();
                return match logical {
                    LogicalOperator::And => Condition::And(children),
                    LogicalOperator::Or => Condition::Or(children),
                    LogicalOperator::Not => Condition::Not(children),
                };
            }
        }

        let operator = raw
            .operator
            .as_deref()
            .and_then(|op| op.parse::<ComparisonOperator>().ok());

        // An empty path resolves to nothing, so negated operators would match every entity
        match (raw.field.clone(), operator) {
            (Some(field), Some(operator)) if !field.is_empty() => Condition::Compare {
                field,
                operator,
                value: raw.value,
            },
            _ => Condition::Malformed(raw),
        }
    }
}

impl From<Condition> for RawCondition {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::And(children) => group(LogicalOperator::And, children),
            Condition::Or(children) => group(LogicalOperator::Or, children),
            Condition::Not(children) => group(LogicalOperator::Not, children),
            Condition::Compare {
                field,
                operator,
                value,
            } => RawCondition {
                field: Some(field),
                operator: Some(operator.as_str().to_string()),
                value,
                conditions: None,
            },
            Condition::Malformed(raw) => raw,
        }
    }
}

fn group(operator: LogicalOperator, children: Vec<Condition>) -> RawCondition {
    RawCondition {
        field: None,
        operator: Some(operator.as_str().to_string()),
        value: None,
        conditions: Some(children.into_iter().map(RawCondition::from).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(json: serde_json::Value) -> Condition {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_leaf_deserializes() {
        let condition = parse(json!({"field": "entity.price", "operator": ">", "value": 1000}));
        assert_eq!(
            condition,
            Condition::compare("entity.price", ComparisonOperator::Gt, Some(Value::Number(1000.0)))
        );
    }

    #[test]
    fn test_explicit_null_literal_is_kept() {
        let condition = parse(json!({"field": "entity.note", "operator": "==", "value": null}));
        assert_eq!(
            condition,
            Condition::compare("entity.note", ComparisonOperator::Eq, Some(Value::Null))
        );

        let condition = parse(json!({"field": "entity.note", "operator": "=="}));
        assert_eq!(
            condition,
            Condition::compare("entity.note", ComparisonOperator::Eq, None)
        );
    }

    #[test]
    fn test_nested_group_deserializes() {
        let condition = parse(json!({
            "operator": "or",
            "conditions": [
                {"field": "entity.status", "operator": "==", "value": "vip"},
                {"operator": "not", "conditions": [
                    {"field": "entity.tags", "operator": "is_empty"}
                ]}
            ]
        }));

        match &condition {
            Condition::Or(children) => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[1], Condition::Not(_)));
            }
            other => panic!("Expected Or, got {:?}", other),
        }
        assert_eq!(condition.node_count(), 4);
    }

    #[test]
    fn test_combinator_without_children_is_malformed() {
        assert!(matches!(parse(json!({"operator": "and"})), Condition::Malformed(_)));
        assert!(matches!(
            parse(json!({"operator": "and", "conditions": []})),
            Condition::Malformed(_)
        ));
    }

    #[test]
    fn test_leaf_without_field_or_with_unknown_operator_is_malformed() {
        assert!(matches!(
            parse(json!({"operator": "==", "value": 1})),
            Condition::Malformed(_)
        ));
        assert!(matches!(
            parse(json!({"field": "entity.x", "operator": "between", "value": [1, 2]})),
            Condition::Malformed(_)
        ));
    }

    #[test]
    fn test_leaf_with_empty_field_is_malformed() {
        for op in ["is_empty", "!=", "not_in", "not_contains"] {
            let condition = parse(json!({"field": "", "operator": op, "value": [1]}));
            assert!(matches!(condition, Condition::Malformed(_)), "operator {}", op);
        }
    }

    #[test]
    fn test_serializes_back_to_stored_shape() {
        let stored = json!({
            "operator": "and",
            "conditions": [
                {"field": "entity.price", "operator": ">=", "value": 10},
                {"field": "entity.name", "operator": "is_not_empty"}
            ]
        });
        let condition = parse(stored.clone());
        let value = serde_json::to_value(&condition).unwrap();

        let reparsed: Condition = serde_json::from_value(value).unwrap();
        assert_eq!(reparsed, condition);
    }

    #[test]
    fn test_expression_string() {
        let condition = Condition::And(vec![
            Condition::compare("entity.price", ComparisonOperator::Gt, Some(Value::from(1000))),
            Condition::compare("entity.sku", ComparisonOperator::StartsWith, Some(Value::from("PZ"))),
            Condition::compare("entity.notes", ComparisonOperator::IsEmpty, None),
        ]);

        assert_eq!(
            condition.to_expression_string(),
            "(entity.price > 1000 and entity.sku starts_with \"PZ\" and entity.notes is_empty)"
        );
    }

    #[test]
    fn test_blank_raw_condition() {
        let raw: RawCondition = serde_json::from_value(json!({})).unwrap();
        assert!(raw.is_blank());
    }
}
