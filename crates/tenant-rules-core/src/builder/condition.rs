//! Condition constructors

use crate::ast::{ComparisonOperator, Condition};
use crate::types::Value;

fn leaf(field: &str, operator: ComparisonOperator, value: impl Into<Value>) -> Condition {
    Condition::compare(field, operator, Some(value.into()))
}

pub fn equals(field: &str, value: impl Into<Value>) -> Condition {
    leaf(field, ComparisonOperator::Eq, value)
}

pub fn not_equals(field: &str, value: impl Into<Value>) -> Condition {
    leaf(field, ComparisonOperator::Ne, value)
}

pub fn greater_than(field: &str, value: impl Into<Value>) -> Condition {
    leaf(field, ComparisonOperator::Gt, value)
}

pub fn less_than(field: &str, value: impl Into<Value>) -> Condition {
    leaf(field, ComparisonOperator::Lt, value)
}

pub fn greater_than_or_equal(field: &str, value: impl Into<Value>) -> Condition {
    leaf(field, ComparisonOperator::Ge, value)
}

pub fn less_than_or_equal(field: &str, value: impl Into<Value>) -> Condition {
    leaf(field, ComparisonOperator::Le, value)
}

/// `field in values`
pub fn in_list<T: Into<Value>>(field: &str, values: Vec<T>) -> Condition {
    leaf(field, ComparisonOperator::In, values)
}

pub fn not_in_list<T: Into<Value>>(field: &str, values: Vec<T>) -> Condition {
    leaf(field, ComparisonOperator::NotIn, values)
}

pub fn contains(field: &str, value: impl Into<Value>) -> Condition {
    leaf(field, ComparisonOperator::Contains, value)
}

pub fn not_contains(field: &str, value: impl Into<Value>) -> Condition {
    leaf(field, ComparisonOperator::NotContains, value)
}

pub fn starts_with(field: &str, prefix: &str) -> Condition {
    leaf(field, ComparisonOperator::StartsWith, prefix)
}

pub fn ends_with(field: &str, suffix: &str) -> Condition {
    leaf(field, ComparisonOperator::EndsWith, suffix)
}

pub fn is_empty(field: &str) -> Condition {
    Condition::compare(field, ComparisonOperator::IsEmpty, None)
}

pub fn is_not_empty(field: &str) -> Condition {
    Condition::compare(field, ComparisonOperator::IsNotEmpty, None)
}

pub fn and(conditions: Vec<Condition>) -> Condition {
    Condition::And(conditions)
}

pub fn or(conditions: Vec<Condition>) -> Condition {
    Condition::Or(conditions)
}

pub fn not(condition: Condition) -> Condition {
    Condition::Not(vec![condition])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builders_produce_stored_shape() {
        let condition = and(vec![
            greater_than("entity.price", 1000),
            in_list("entity.category", vec!["wine", "spirits"]),
            not(is_empty("entity.custom_data.calories")),
        ]);

        assert_eq!(
            serde_json::to_value(&condition).unwrap(),
            json!({
                "operator": "and",
                "conditions": [
                    {"field": "entity.price", "operator": ">", "value": 1000},
                    {"field": "entity.category", "operator": "in", "value": ["wine", "spirits"]},
                    {"operator": "not", "conditions": [
                        {"field": "entity.custom_data.calories", "operator": "is_empty"}
                    ]}
                ]
            })
        );
    }

    #[test]
    fn test_every_comparison_builder_uses_its_operator() {
        let built = [
            (equals("f", 1), ComparisonOperator::Eq),
            (not_equals("f", 1), ComparisonOperator::Ne),
            (greater_than("f", 1), ComparisonOperator::Gt),
            (less_than("f", 1), ComparisonOperator::Lt),
            (greater_than_or_equal("f", 1), ComparisonOperator::Ge),
            (less_than_or_equal("f", 1), ComparisonOperator::Le),
            (in_list("f", vec![1]), ComparisonOperator::In),
            (not_in_list("f", vec![1]), ComparisonOperator::NotIn),
            (contains("f", "x"), ComparisonOperator::Contains),
            (not_contains("f", "x"), ComparisonOperator::NotContains),
            (starts_with("f", "x"), ComparisonOperator::StartsWith),
            (ends_with("f", "x"), ComparisonOperator::EndsWith),
            (is_empty("f"), ComparisonOperator::IsEmpty),
            (is_not_empty("f"), ComparisonOperator::IsNotEmpty),
        ];

        for (condition, expected) in built {
            match condition {
                Condition::Compare { operator, .. } => assert_eq!(operator, expected),
                other => panic!("Expected Compare, got {:?}", other),
            }
        }
    }
}
