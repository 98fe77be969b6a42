//! Field Lookup Utilities
//!
//! Helper functions for navigating nested values using dot-notation paths.
//! A miss at any segment yields `None` (undefined); lookups never fail.

use std::collections::HashMap;
use tenant_rules_core::Value;

/// Split a dotted path into segments
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('.').collect()
}

/// Get nested value from a map following a dotted path
///
/// Object segments are looked up by key; array segments accept a numeric
/// index (`entity.items.0.price`). Any other step returns `None`.
pub fn get_nested_value<'a>(data: &'a HashMap<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;

    let mut current = match data.get(first) {
        Some(v) => v,
        None => {
            tracing::debug!("Field not found: {}, treating as undefined", first);
            return None;
        }
    };

    for segment in segments {
        current = match step(current, segment) {
            Some(next) => next,
            None => {
                tracing::debug!(
                    "Cannot resolve '{}' in path '{}' on {} value, treating as undefined",
                    segment,
                    path,
                    current.type_name()
                );
                return None;
            }
        };
    }

    Some(current)
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}
