//! Tenant Rules SDK
//!
//! High-level API for loading tenant rule sets and evaluating them.
//!
//! ```rust
//! use tenant_rules_sdk::{RuleContext, RuleEngineBuilder, RuleFormat};
//! use serde_json::json;
//!
//! let engine = RuleEngineBuilder::new()
//!     .add_rule_content(
//!         "inline.yaml",
//!         RuleFormat::Yaml,
//!         r#"
//! id: min_order
//! name: Minimum order
//! trigger_event: on_order_create
//! conditions:
//!   field: entity.total
//!   operator: "<"
//!   value: 15
//! actions:
//!   - type: error
//!     message: Minimum order not met
//! "#,
//!     )
//!     .build()?;
//!
//! let context = RuleContext::new("order", json!({"total": 9}));
//! let outcome = engine.evaluate_for("acme", Some("on_order_create"), &context);
//! assert!(outcome.is_blocked());
//! # Ok::<(), tenant_rules_sdk::SdkError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod loader;
pub mod rule_engine;
pub mod validator;

// Re-export main types
pub use builder::RuleEngineBuilder;
pub use config::EngineConfig;
pub use error::{Result, SdkError};
pub use loader::{load_rules_file, parse_rules, RuleFormat};
pub use rule_engine::{EvaluationOutcome, RuleEngine};
pub use validator::{validate_rule, validate_rules, ValidationWarning};

// Re-export commonly used types from dependencies
pub use tenant_rules_core::{Action, BusinessRule, Condition, RuleTemplate, Value};
pub use tenant_rules_runtime::{
    CollectingNotifier, MergedResult, MetricsSnapshot, Notification, Notifier, RuleContext,
    RuleResult, RuleTrace, TracingNotifier,
};
