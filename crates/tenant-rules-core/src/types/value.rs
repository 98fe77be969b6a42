//! Runtime value types for rule evaluation
//!
//! The `Value` enum represents every value a rule can read from its context
//! or write into its applied values. It mirrors JSON, and the coercion
//! helpers follow the loose `Number(x)` / `String(x)` conversions that
//! storefront configuration has always been written against.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (f64 for simplicity, handles both int and float)
    Number(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (key-value map)
    Object(HashMap<String, Value>),
}

impl Value {
    /// Name of the variant, used in error messages and traces
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a direct child of an object value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Numeric coercion with `Number(x)` semantics.
    ///
    /// Returns `None` where the coercion yields NaN: objects, arrays with more
    /// than one element, and strings that are not numeric literals.
    /// `null`, `false`, `""` and `[]` all coerce to `0`.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Null => Some(0.0),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) if n.is_nan() => None,
            Value::Number(n) => Some(*n),
            Value::String(s) => parse_numeric_string(s),
            Value::Array(_) => parse_numeric_string(&self.to_display_string()),
            Value::Object(_) => None,
        }
    }

    /// String coercion with `String(x)` semantics.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    // Array joins render null elements as empty strings
                    Value::Null => String::new(),
                    other => other.to_display_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
        }
    }

    /// Strict equality: same variant, same content.
    ///
    /// Numbers compare by IEEE equality, so `NaN` is never equal to itself.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::String(l), Value::String(r)) => l == r,
            (Value::Array(l), Value::Array(r)) => {
                l.len() == r.len() && l.iter().zip(r).all(|(a, b)| a.strict_eq(b))
            }
            (Value::Object(l), Value::Object(r)) => {
                l.len() == r.len()
                    && l.iter()
                        .all(|(k, v)| r.get(k).is_some_and(|other| v.strict_eq(other)))
            }
            _ => false,
        }
    }
}

/// Integral numbers serialize as integers so `1000` stays `1000` in JSON output
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if is_integral(*n) => serializer.serialize_i64(*n as i64),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Object(map) => map.serialize(serializer),
        }
    }
}

fn is_integral(n: f64) -> bool {
    n.fract() == 0.0 && n.abs() < i64::MAX as f64
}

fn parse_numeric_string(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    // f64::from_str also accepts "inf" and "nan", which are not numeric literals here
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }

    s.parse::<f64>().ok()
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_form(n)
    } else {
        n.to_string()
    }
}

/// `1e21` renders as `1e+21`, `1.5e-7` stays as is
fn exponent_form(n: f64) -> String {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) if is_integral(n) => {
                serde_json::Value::Number((n as i64).into())
            }
            Value::Number(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(map) => {
                serde_json::Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_from_json() {
        let val = Value::from(json!({"price": 1500, "tags": ["vegan", null]}));

        assert_eq!(val.get("price"), Some(&Value::Number(1500.0)));
        assert_eq!(
            val.get("tags"),
            Some(&Value::Array(vec![Value::String("vegan".to_string()), Value::Null]))
        );
    }

    #[test]
    fn test_value_serde_json() {
        let val = Value::Object({
            let mut map = HashMap::new();
            map.insert("count".to_string(), Value::Number(42.0));
            map.insert("active".to_string(), Value::Bool(true));
            map
        });

        let json = serde_json::to_string(&val).unwrap();
        assert!(json.contains("count"));
        assert!(json.contains("42"));

        let deserialized: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(val, deserialized);
    }

    #[test]
    fn test_to_number_coercions() {
        assert_eq!(Value::Null.to_number(), Some(0.0));
        assert_eq!(Value::Bool(true).to_number(), Some(1.0));
        assert_eq!(Value::from("  42.5 ").to_number(), Some(42.5));
        assert_eq!(Value::from("").to_number(), Some(0.0));
        assert_eq!(Value::from("0x10").to_number(), Some(16.0));
        assert_eq!(Value::from("12abc").to_number(), None);
        assert_eq!(Value::from("inf").to_number(), None);
        assert_eq!(Value::from("-Infinity").to_number(), Some(f64::NEG_INFINITY));
        assert_eq!(Value::Array(vec![]).to_number(), Some(0.0));
        assert_eq!(Value::from(vec![7]).to_number(), Some(7.0));
        assert_eq!(Value::from(vec![1, 2]).to_number(), None);
        assert_eq!(Value::Object(HashMap::new()).to_number(), None);
    }

    #[test]
    fn test_to_display_string() {
        assert_eq!(Value::Number(1500.0).to_display_string(), "1500");
        assert_eq!(Value::Number(2.5).to_display_string(), "2.5");
        assert_eq!(Value::Number(-0.0).to_display_string(), "0");
        assert_eq!(Value::Bool(false).to_display_string(), "false");
        assert_eq!(Value::Null.to_display_string(), "null");
        assert_eq!(
            Value::Array(vec![Value::from(1), Value::Null, Value::from("a")]).to_display_string(),
            "1,,a"
        );
        assert_eq!(Value::Object(HashMap::new()).to_display_string(), "[object Object]");
    }

    #[test]
    fn test_display_of_extreme_magnitudes() {
        assert_eq!(Value::Number(1e21).to_display_string(), "1e+21");
        assert_eq!(Value::Number(-2.5e30).to_display_string(), "-2.5e+30");
        assert_eq!(Value::Number(1e-7).to_display_string(), "1e-7");
        assert_eq!(Value::Number(1.5e-7).to_display_string(), "1.5e-7");
        assert_eq!(Value::Number(1e20).to_display_string(), "100000000000000000000");
        assert_eq!(Value::Number(0.000001).to_display_string(), "0.000001");
    }

    #[test]
    fn test_strict_eq() {
        assert!(Value::from(5).strict_eq(&Value::Number(5.0)));
        assert!(!Value::from(5).strict_eq(&Value::from("5")));
        assert!(!Value::Null.strict_eq(&Value::Bool(false)));
        assert!(!Value::Number(f64::NAN).strict_eq(&Value::Number(f64::NAN)));
        assert!(Value::from(vec!["a", "b"]).strict_eq(&Value::from(vec!["a", "b"])));
    }

    #[test]
    fn test_round_trip_through_serde_json_value() {
        let original = json!({"items": [{"price": 10}, {"price": 2.5}], "note": null});
        let back: serde_json::Value = Value::from(original.clone()).into();
        assert_eq!(back, original);
    }
}
