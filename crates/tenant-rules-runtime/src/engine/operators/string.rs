//! String prefix and suffix tests

use tenant_rules_core::Value;

/// String reading of a resolved value; an undefined value reads as `"undefined"`
pub(crate) fn coerce_to_string(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), Value::to_display_string)
}

pub(crate) fn starts_with(field_value: Option<&Value>, literal: Option<&Value>) -> bool {
    coerce_to_string(field_value).starts_with(coerce_to_string(literal).as_str())
}

pub(crate) fn ends_with(field_value: Option<&Value>, literal: Option<&Value>) -> bool {
    coerce_to_string(field_value).ends_with(coerce_to_string(literal).as_str())
}
