//! Equality and numeric ordering

use tenant_rules_core::{ComparisonOperator, Value};

/// Strict equality: no coercion, undefined only equals undefined
pub(crate) fn strict_equals(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(l), Some(r)) => l.strict_eq(r),
        _ => false,
    }
}

/// Numeric ordering after coercing both sides to numbers
///
/// Undefined and non-numeric values coerce to NaN, which fails every
/// comparison.
pub(crate) fn execute_numeric(
    left: Option<&Value>,
    op: ComparisonOperator,
    right: Option<&Value>,
) -> bool {
    let (l, r) = match (left.and_then(Value::to_number), right.and_then(Value::to_number)) {
        (Some(l), Some(r)) => (l, r),
        _ => {
            tracing::debug!(
                "Numeric comparison {} with non-numeric operand ({:?} vs {:?}), returning false",
                op,
                left,
                right
            );
            return false;
        }
    };

    match op {
        ComparisonOperator::Gt => l > r,
        ComparisonOperator::Lt => l < r,
        ComparisonOperator::Ge => l >= r,
        ComparisonOperator::Le => l <= r,
        _ => false,
    }
}
