//! Business rule definitions

use super::action::Action;
use super::condition::{Condition, RawCondition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A named, tenant-scoped policy: a condition tree plus ordered actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRule {
    /// Stable rule ID
    pub id: String,

    /// Owning tenant; templates have none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Human-readable name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category tag, informational only
    #[serde(default)]
    pub rule_type: RuleType,

    /// When the host intends to run the rule (e.g. `on_order_create`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_event: Option<String>,

    /// Root of the condition tree; `None` always matches
    #[serde(
        default,
        deserialize_with = "deserialize_conditions",
        skip_serializing_if = "Option::is_none"
    )]
    pub conditions: Option<Condition>,

    /// Applied in order when the rule matches
    #[serde(default)]
    pub actions: Vec<Action>,

    /// Lower values evaluate first
    #[serde(default)]
    pub priority: i32,

    /// Inactive rules never match
    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// `null`, a missing key and `{}` all mean "no condition"
fn deserialize_conditions<'de, D>(deserializer: D) -> Result<Option<Condition>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCondition>::deserialize(deserializer)?;
    Ok(raw.filter(|raw| !raw.is_blank()).map(Condition::from))
}

impl BusinessRule {
    /// Create an active rule with no conditions and no actions
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        BusinessRule {
            id: id.into(),
            tenant_id: None,
            name: name.into(),
            description: None,
            rule_type: RuleType::default(),
            trigger_event: None,
            conditions: None,
            actions: Vec::new(),
            priority: 0,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the owning tenant
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_rule_type(mut self, rule_type: RuleType) -> Self {
        self.rule_type = rule_type;
        self
    }

    pub fn with_trigger_event(mut self, trigger_event: impl Into<String>) -> Self {
        self.trigger_event = Some(trigger_event.into());
        self
    }

    /// Set the root condition
    pub fn with_conditions(mut self, condition: Condition) -> Self {
        self.conditions = Some(condition);
        self
    }

    /// Append an action
    pub fn add_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Replace the action list
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// True if the rule belongs to `tenant_id` or to no tenant at all
    pub fn applies_to_tenant(&self, tenant_id: &str) -> bool {
        self.tenant_id.as_deref().map_or(true, |owner| owner == tenant_id)
    }
}

/// Category of a business rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Validation,
    Calculation,
    Workflow,
    Constraint,
    /// Any other category
    #[default]
    #[serde(other)]
    Custom,
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleType::Validation => "validation",
            RuleType::Calculation => "calculation",
            RuleType::Workflow => "workflow",
            RuleType::Constraint => "constraint",
            RuleType::Custom => "custom",
        };
        f.write_str(name)
    }
}
