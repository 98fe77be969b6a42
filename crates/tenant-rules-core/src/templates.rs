//! Built-in rule templates
//!
//! Templates are tenant-less starting points grouped by business type.
//! A tenant adopts one by instantiating it, which stamps a fresh id, the
//! tenant id and creation timestamps onto a regular [`BusinessRule`].

use crate::ast::{Action, BusinessRule, Condition, RuleType};
use crate::builder::{action, condition};
use crate::error::{CoreError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TRIGGER_ORDER_CREATE: &str = "on_order_create";
pub const TRIGGER_ORDER_UPDATE: &str = "on_order_update";
pub const TRIGGER_PRODUCT_SAVE: &str = "on_product_save";
pub const TRIGGER_BOOKING_CREATE: &str = "on_booking_create";

/// A reusable rule definition for one business type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTemplate {
    /// Unique template key, e.g. `restaurant.minimum_order`
    pub key: String,
    /// Business type the template targets
    pub business_type: String,
    pub name: String,
    pub description: String,
    pub rule_type: RuleType,
    pub trigger_event: String,
    pub conditions: Option<Condition>,
    pub actions: Vec<Action>,
    pub priority: i32,
}

impl RuleTemplate {
    /// Turn the template into a rule owned by `tenant_id`
    pub fn instantiate(&self, tenant_id: &str) -> BusinessRule {
        let now = Utc::now();
        let mut rule = BusinessRule::new(Uuid::new_v4().to_string(), self.name.clone())
            .with_tenant(tenant_id)
            .with_description(self.description.clone())
            .with_rule_type(self.rule_type)
            .with_trigger_event(self.trigger_event.clone())
            .with_actions(self.actions.clone())
            .with_priority(self.priority);
        rule.conditions = self.conditions.clone();
        rule.created_at = Some(now);
        rule.updated_at = Some(now);
        rule
    }

    /// The template as a tenant-less rule whose id is the template key
    pub fn to_rule(&self) -> BusinessRule {
        let mut rule = BusinessRule::new(self.key.clone(), self.name.clone())
            .with_description(self.description.clone())
            .with_rule_type(self.rule_type)
            .with_trigger_event(self.trigger_event.clone())
            .with_actions(self.actions.clone())
            .with_priority(self.priority);
        rule.conditions = self.conditions.clone();
        rule
    }
}

#[allow(clippy::too_many_arguments)]
fn template(
    business_type: &str,
    slug: &str,
    name: &str,
    description: &str,
    rule_type: RuleType,
    trigger_event: &str,
    conditions: Option<Condition>,
    actions: Vec<Action>,
    priority: i32,
) -> RuleTemplate {
    RuleTemplate {
        key: format!("{}.{}", business_type, slug),
        business_type: business_type.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        rule_type,
        trigger_event: trigger_event.to_string(),
        conditions,
        actions,
        priority,
    }
}

/// Every built-in template
pub fn builtin_templates() -> Vec<RuleTemplate> {
    vec![
        // Restaurant
        template(
            "restaurant",
            "minimum_order",
            "Minimum order amount",
            "Reject delivery orders below the minimum basket value",
            RuleType::Validation,
            TRIGGER_ORDER_CREATE,
            Some(condition::and(vec![
                condition::equals("entity.delivery_type", "delivery"),
                condition::less_than("entity.total", 15),
            ])),
            vec![action::error("Minimum order not met")],
            10,
        ),
        template(
            "restaurant",
            "delivery_fee",
            "Delivery fee",
            "Flat delivery fee for delivery orders",
            RuleType::Calculation,
            TRIGGER_ORDER_CREATE,
            Some(condition::equals("entity.delivery_type", "delivery")),
            vec![action::add_fee(Some("delivery_fee"), None, Some(5.into()))],
            20,
        ),
        template(
            "restaurant",
            "large_party_service_charge",
            "Large party service charge",
            "Percentage service charge on orders above 200",
            RuleType::Calculation,
            TRIGGER_ORDER_CREATE,
            Some(condition::greater_than("entity.total", 200)),
            vec![action::add_fee(Some("service_charge"), Some(10.0), None)],
            30,
        ),
        template(
            "restaurant",
            "calorie_label_required",
            "Calorie label required",
            "Menu items must declare calories before publishing",
            RuleType::Validation,
            TRIGGER_PRODUCT_SAVE,
            Some(condition::is_empty("entity.custom_data.calories")),
            vec![action::error("Calorie information is required")],
            10,
        ),
        // Retail
        template(
            "retail",
            "free_shipping",
            "Free shipping threshold",
            "Waive shipping on orders of 100 or more",
            RuleType::Calculation,
            TRIGGER_ORDER_CREATE,
            Some(condition::greater_than_or_equal("entity.total", 100)),
            vec![action::set_field("shipping_fee", 0)],
            20,
        ),
        template(
            "retail",
            "bulk_discount",
            "Bulk discount",
            "Count line items and grant a discount on large baskets",
            RuleType::Calculation,
            TRIGGER_ORDER_CREATE,
            Some(condition::greater_than_or_equal("entity.item_count", 10)),
            vec![
                action::count("entity.items", "line_count"),
                action::set_field("discount_percentage", 5),
            ],
            30,
        ),
        template(
            "retail",
            "high_value_review",
            "High value order review",
            "Send orders above 1000 to manual review",
            RuleType::Workflow,
            TRIGGER_ORDER_CREATE,
            Some(condition::greater_than("entity.total", 1000)),
            vec![
                action::notify("High value order requires review"),
                action::trigger_workflow("manual_review"),
            ],
            40,
        ),
        // Pharmacy
        template(
            "pharmacy",
            "prescription_required",
            "Prescription required",
            "Prescription-only products need a prescription reference",
            RuleType::Constraint,
            TRIGGER_ORDER_CREATE,
            Some(condition::and(vec![
                condition::equals("entity.requires_prescription", true),
                condition::is_empty("entity.prescription_id"),
            ])),
            vec![action::error("A valid prescription is required for this order")],
            5,
        ),
        template(
            "pharmacy",
            "controlled_substance_limit",
            "Controlled substance quantity limit",
            "Limit quantities of controlled substances per order",
            RuleType::Constraint,
            TRIGGER_ORDER_UPDATE,
            Some(condition::and(vec![
                condition::contains("entity.tags", "controlled"),
                condition::greater_than("entity.quantity", 2),
            ])),
            vec![
                action::error("Quantity limit exceeded for controlled substance"),
                action::notify("Controlled substance limit hit"),
            ],
            5,
        ),
        // Services
        template(
            "services",
            "booking_deposit",
            "Booking deposit",
            "Collect a 20% deposit on new bookings",
            RuleType::Calculation,
            TRIGGER_BOOKING_CREATE,
            None,
            vec![action::add_fee(Some("deposit"), Some(20.0), None)],
            10,
        ),
        template(
            "services",
            "booking_confirmation",
            "Booking confirmation workflow",
            "Start confirmation and reminder workflows for every booking",
            RuleType::Workflow,
            TRIGGER_BOOKING_CREATE,
            None,
            vec![
                action::trigger_workflow("booking_confirmation"),
                action::trigger_workflow("booking_reminder"),
            ],
            50,
        ),
    ]
}

/// Templates for one business type, in definition order
pub fn templates_for(business_type: &str) -> Vec<RuleTemplate> {
    builtin_templates()
        .into_iter()
        .filter(|t| t.business_type == business_type)
        .collect()
}

/// Look up a template by key
pub fn find_template(key: &str) -> Result<RuleTemplate> {
    builtin_templates()
        .into_iter()
        .find(|t| t.key == key)
        .ok_or_else(|| CoreError::TemplateNotFound(key.to_string()))
}

/// Distinct business types that have templates
pub fn business_types() -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for t in builtin_templates() {
        if !types.contains(&t.business_type) {
            types.push(t.business_type);
        }
    }
    types
}
