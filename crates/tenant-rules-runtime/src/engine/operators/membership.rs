//! Array membership and containment

use super::string::coerce_to_string;
use tenant_rules_core::Value;

/// Membership with NaN treated as equal to itself
pub(crate) fn is_member(needle: Option<&Value>, haystack: &[Value]) -> bool {
    match needle {
        Some(needle) => haystack.iter().any(|item| same_value_zero(item, needle)),
        None => false,
    }
}

fn same_value_zero(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.is_nan() && y.is_nan() => true,
        _ => a.strict_eq(b),
    }
}

/// Element membership for arrays, substring search for strings
///
/// Returns `None` when the field is neither, so callers can decide the
/// negated result independently.
pub(crate) fn contains(field_value: Option<&Value>, literal: Option<&Value>) -> Option<bool> {
    match field_value {
        Some(Value::Array(items)) => Some(is_member(literal, items)),
        Some(Value::String(s)) => {
            let needle = coerce_to_string(literal);
            Some(s.contains(needle.as_str()))
        }
        _ => None,
    }
}
