//! Comparison operator implementations
//!
//! Every operator takes the resolved field value and the literal, either of
//! which may be undefined (`None`), and returns a plain bool.

mod comparison;
mod membership;
mod string;

use tenant_rules_core::{ComparisonOperator, Value};

pub(crate) use comparison::{execute_numeric, strict_equals};
pub(crate) use membership::{contains, is_member};
pub(crate) use string::{ends_with, starts_with};

/// Dispatch a leaf comparison
pub(crate) fn execute_compare(
    field_value: Option<&Value>,
    op: ComparisonOperator,
    literal: Option<&Value>,
) -> bool {
    match op {
        ComparisonOperator::Eq => strict_equals(field_value, literal),
        ComparisonOperator::Ne => !strict_equals(field_value, literal),
        ComparisonOperator::Gt
        | ComparisonOperator::Lt
        | ComparisonOperator::Ge
        | ComparisonOperator::Le => execute_numeric(field_value, op, literal),
        ComparisonOperator::In => match literal {
            Some(Value::Array(items)) => is_member(field_value, items),
            _ => false,
        },
        ComparisonOperator::NotIn => match literal {
            Some(Value::Array(items)) => !is_member(field_value, items),
            _ => false,
        },
        ComparisonOperator::Contains => contains(field_value, literal).unwrap_or(false),
        ComparisonOperator::NotContains => contains(field_value, literal).map_or(true, |hit| !hit),
        ComparisonOperator::StartsWith => starts_with(field_value, literal),
        ComparisonOperator::EndsWith => ends_with(field_value, literal),
        ComparisonOperator::IsEmpty => is_empty(field_value),
        ComparisonOperator::IsNotEmpty => !is_empty(field_value),
    }
}

/// Undefined, null, `""` and `[]` are empty; everything else, including `{}` and `0`, is not
pub(crate) fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}
