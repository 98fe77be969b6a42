//! Rule context implementation

use super::field_lookup::get_nested_value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tenant_rules_core::Value;

/// Data a rule set is evaluated against
///
/// A flat map of top-level keys. `entity` and `entityType` are always
/// expected; hosts add more (`tenantConfig`, `customer`, ...) and every key
/// is addressable from condition fields by dotted path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleContext {
    values: HashMap<String, Value>,
}

impl RuleContext {
    pub const ENTITY: &'static str = "entity";
    pub const ENTITY_TYPE: &'static str = "entityType";
    pub const TENANT_CONFIG: &'static str = "tenantConfig";

    /// Create a context for one entity
    pub fn new(entity_type: impl Into<String>, entity: impl Into<Value>) -> Self {
        let mut values = HashMap::new();
        values.insert(Self::ENTITY.to_string(), entity.into());
        values.insert(
            Self::ENTITY_TYPE.to_string(),
            Value::String(entity_type.into()),
        );
        Self { values }
    }

    /// Builder method to add tenant configuration
    pub fn with_tenant_config(self, config: impl Into<Value>) -> Self {
        self.with_value(Self::TENANT_CONFIG, config)
    }

    /// Builder method to add an arbitrary top-level key
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn entity(&self) -> Option<&Value> {
        self.values.get(Self::ENTITY)
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.values.get(Self::ENTITY_TYPE).and_then(Value::as_str)
    }

    pub fn tenant_config(&self) -> Option<&Value> {
        self.values.get(Self::TENANT_CONFIG)
    }

    /// Resolve a dotted path; `None` means undefined
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        get_nested_value(&self.values, path)
    }

    /// Top-level keys the engine expects but the host did not supply
    pub fn missing_required_keys(&self) -> Vec<&'static str> {
        [Self::ENTITY, Self::ENTITY_TYPE]
            .into_iter()
            .filter(|key| !self.values.contains_key(*key))
            .collect()
    }

    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }
}

impl From<HashMap<String, Value>> for RuleContext {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

/// Objects become top-level keys; any other JSON value yields an empty context
impl From<serde_json::Value> for RuleContext {
    fn from(json: serde_json::Value) -> Self {
        match Value::from(json) {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_builder() {
        let ctx = RuleContext::new("order", json!({"total": 42}))
            .with_tenant_config(json!({"currency": "EUR"}))
            .with_value("channel", "web");

        assert_eq!(ctx.entity_type(), Some("order"));
        assert_eq!(ctx.resolve("entity.total"), Some(&Value::Number(42.0)));
        assert_eq!(ctx.resolve("tenantConfig.currency"), Some(&Value::from("EUR")));
        assert_eq!(ctx.resolve("channel"), Some(&Value::from("web")));
        assert!(ctx.missing_required_keys().is_empty());
    }

    #[test]
    fn test_context_from_json() {
        let ctx = RuleContext::from(json!({
            "entity": {"price": 1500},
            "entityType": "product",
            "tenantConfig": {"business_type": "restaurant"}
        }));

        assert_eq!(ctx.resolve("entity.price"), Some(&Value::Number(1500.0)));
        assert_eq!(ctx.tenant_config().and_then(|c| c.get("business_type")), Some(&Value::from("restaurant")));
    }

    #[test]
    fn test_context_from_non_object_json() {
        let ctx = RuleContext::from(json!([1, 2, 3]));
        assert!(ctx.values().is_empty());
        assert_eq!(ctx.missing_required_keys(), vec!["entity", "entityType"]);
    }

    #[test]
    fn test_context_serializes_flat() {
        let ctx = RuleContext::new("order", json!({"total": 10}));
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json, json!({"entity": {"total": 10}, "entityType": "order"}));

        let back: RuleContext = serde_json::from_value(json).unwrap();
        assert_eq!(back, ctx);
    }
}
