//! Aggregation over context arrays

use crate::error::{ActionError, Result};
use tenant_rules_core::{AggregateOperation, Value};

/// Compute `operation` over `items`
///
/// `sum` and `avg` coerce every element to a number; an element with no
/// numeric reading turns the result into `NaN`. `count` only counts. An
/// empty array yields `0` for every operation.
pub fn compute_aggregate(operation: AggregateOperation, items: &[Value]) -> Result<f64> {
    match operation {
        AggregateOperation::Count => Ok(items.len() as f64),
        AggregateOperation::Sum => Ok(numeric_sum(items)),
        AggregateOperation::Avg => {
            if items.is_empty() {
                return Ok(0.0);
            }
            Ok(numeric_sum(items) / items.len() as f64)
        }
        AggregateOperation::Unsupported => Err(ActionError::UnsupportedOperation),
    }
}

fn numeric_sum(items: &[Value]) -> f64 {
    items
        .iter()
        .map(|item| item.to_number().unwrap_or(f64::NAN))
        .sum()
}
