//! Builder pattern for RuleEngine

use crate::config::EngineConfig;
use crate::error::Result;
use crate::loader::{parse_rules, RuleFormat};
use crate::rule_engine::RuleEngine;
use std::path::PathBuf;
use std::sync::Arc;
use tenant_rules_core::templates::find_template;
use tenant_rules_core::BusinessRule;
use tenant_rules_runtime::Notifier;

enum RuleSource {
    Rules(Vec<BusinessRule>),
    Content {
        origin: String,
        format: RuleFormat,
        content: String,
    },
    Template {
        key: String,
        tenant_id: String,
    },
}

/// Builder for RuleEngine
///
/// # Example
///
/// ```rust
/// use tenant_rules_sdk::{RuleEngineBuilder, RuleFormat};
/// use tenant_rules_runtime::RuleContext;
/// use serde_json::json;
///
/// let engine = RuleEngineBuilder::new()
///     .add_rule_content(
///         "inline",
///         RuleFormat::Json,
///         r#"{"id": "fee", "name": "Fee", "actions": [{"type": "add_fee", "percentage": 10}]}"#,
///     )
///     .build()?;
///
/// let outcome = engine.evaluate(&RuleContext::new("order", json!({"total": 50})));
/// assert_eq!(outcome.merged.matched_rules, 1);
/// # Ok::<(), tenant_rules_sdk::SdkError>(())
/// ```
pub struct RuleEngineBuilder {
    config: EngineConfig,
    sources: Vec<RuleSource>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl RuleEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            sources: Vec::new(),
            notifier: None,
        }
    }

    /// Replace the configuration; rule files listed in it are loaded at build time
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a rule file
    pub fn add_rule_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rule_files.push(path.into());
        self
    }

    /// Add multiple rule files
    pub fn add_rule_files(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.rule_files.extend(paths);
        self
    }

    pub fn add_rule(mut self, rule: BusinessRule) -> Self {
        self.sources.push(RuleSource::Rules(vec![rule]));
        self
    }

    pub fn add_rules(mut self, rules: Vec<BusinessRule>) -> Self {
        self.sources.push(RuleSource::Rules(rules));
        self
    }

    /// Add rule content directly (alternative to file path)
    ///
    /// # Arguments
    /// * `origin` - Name used in parse errors
    /// * `format` - JSON or YAML
    /// * `content` - The rule document
    pub fn add_rule_content(
        mut self,
        origin: impl Into<String>,
        format: RuleFormat,
        content: impl Into<String>,
    ) -> Self {
        self.sources.push(RuleSource::Content {
            origin: origin.into(),
            format,
            content: content.into(),
        });
        self
    }

    /// Instantiate a built-in template for a tenant
    pub fn add_template(mut self, key: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        self.sources.push(RuleSource::Template {
            key: key.into(),
            tenant_id: tenant_id.into(),
        });
        self
    }

    /// Set the sink for `notify` actions (defaults to logging)
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn stop_on_first_match(mut self, enable: bool) -> Self {
        self.config.stop_on_first_match = enable;
        self
    }

    pub fn include_untriggered(mut self, enable: bool) -> Self {
        self.config.include_untriggered = enable;
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.config.enable_metrics = enable;
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.config.enable_tracing = enable;
        self
    }

    /// Build the rule engine
    ///
    /// Rule files load first, then every other source in the order it was
    /// added.
    pub fn build(self) -> Result<RuleEngine> {
        let mut rules = Vec::new();
        for source in self.sources {
            match source {
                RuleSource::Rules(batch) => rules.extend(batch),
                RuleSource::Content {
                    origin,
                    format,
                    content,
                } => rules.extend(parse_rules(&content, format, &origin)?),
                RuleSource::Template { key, tenant_id } => {
                    let rule = find_template(&key)?.instantiate(&tenant_id);
                    tracing::debug!("Instantiated template '{}' as rule '{}'", key, rule.id);
                    rules.push(rule);
                }
            }
        }

        RuleEngine::with_rules(self.config, rules, self.notifier)
    }
}

impl Default for RuleEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use tenant_rules_core::CoreError;

    #[test]
    fn test_builder() {
        let engine = RuleEngineBuilder::new()
            .enable_metrics(true)
            .build()
            .unwrap();
        assert!(engine.rules().is_empty());
        assert!(engine.metrics().is_some());
    }

    #[test]
    fn test_builder_with_multiple_options() {
        let builder = RuleEngineBuilder::new()
            .add_rule_file("test1.yaml")
            .add_rule_file("test2.json")
            .stop_on_first_match(true)
            .include_untriggered(false)
            .enable_tracing(true);

        assert_eq!(builder.config.rule_files.len(), 2);
        assert!(builder.config.stop_on_first_match);
        assert!(!builder.config.include_untriggered);
        assert!(builder.config.enable_tracing);
    }

    #[test]
    fn test_sources_keep_insertion_order() {
        let engine = RuleEngineBuilder::new()
            .add_rule(BusinessRule::new("a", "A"))
            .add_rule_content("inline", RuleFormat::Json, r#"[{"id": "b", "name": "B"}]"#)
            .add_template("retail.free_shipping", "acme")
            .add_rules(vec![BusinessRule::new("c", "C")])
            .build()
            .unwrap();

        let rules = engine.rules();
        assert_eq!(rules.len(), 4);
        assert_eq!(rules[0].id, "a");
        assert_eq!(rules[1].id, "b");
        assert_eq!(rules[2].tenant_id.as_deref(), Some("acme"));
        assert_eq!(rules[3].id, "c");
    }

    #[test]
    fn test_unknown_template_fails_build() {
        let err = RuleEngineBuilder::new()
            .add_template("retail.nope", "acme")
            .build()
            .err();
        assert!(matches!(
            err,
            Some(SdkError::Core(CoreError::TemplateNotFound(key))) if key == "retail.nope"
        ));
    }

    #[test]
    fn test_missing_rule_file_fails_build() {
        let err = RuleEngineBuilder::new()
            .add_rule_file("/definitely/not/here.json")
            .build()
            .err();
        assert!(matches!(err, Some(SdkError::Io(_))));
    }
}
