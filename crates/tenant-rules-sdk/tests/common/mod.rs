//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use std::io::Write;
use tenant_rules_sdk::{EngineConfig, EvaluationOutcome, RuleEngine, RuleEngineBuilder, Value};

/// Test helper to create a RuleEngine from inline YAML rule documents
pub struct TestEngine {
    documents: Vec<String>,
    config: EngineConfig,
}

impl TestEngine {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            config: EngineConfig::new(),
        }
    }

    /// Add one YAML document (a rule, a list, or a `rules:` wrapper)
    pub fn with_rules(mut self, yaml: &str) -> Self {
        self.documents.push(yaml.trim().to_string());
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Write the documents to a temporary `.yaml` file and build from it
    ///
    /// Going through a file exercises the same loader path as production.
    pub fn build(self) -> RuleEngine {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(self.documents.join("\n---\n").as_bytes())
            .expect("Failed to write temp file");

        RuleEngineBuilder::new()
            .with_config(self.config)
            .add_rule_file(file.path())
            .build()
            .expect("Failed to build engine")
    }
}

/// Build a `serde_json::Value` entity from key-value pairs
#[macro_export]
macro_rules! entity {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = serde_json::Map::new();
        $(
            map.insert($key.to_string(), serde_json::json!($value));
        )*
        serde_json::Value::Object(map)
    }};
}

/// Assertion helpers for EvaluationOutcome
pub trait OutcomeAssertions {
    fn assert_applied(&self, key: &str, expected: impl Into<Value>);
    fn assert_not_applied(&self, key: &str);
    fn assert_matched(&self, expected: &[&str]);
    fn assert_errors(&self, expected: &[&str]);
}

impl OutcomeAssertions for EvaluationOutcome {
    fn assert_applied(&self, key: &str, expected: impl Into<Value>) {
        let expected = expected.into();
        assert_eq!(
            self.merged.applied_values.get(key),
            Some(&expected),
            "applied value '{}' mismatch; applied: {:?}",
            key,
            self.merged.applied_values
        );
    }

    fn assert_not_applied(&self, key: &str) {
        assert!(
            !self.merged.applied_values.contains_key(key),
            "'{}' should not be applied; applied: {:?}",
            key,
            self.merged.applied_values
        );
    }

    fn assert_matched(&self, expected: &[&str]) {
        assert_eq!(self.matched_rule_ids(), expected, "matched rules mismatch");
    }

    fn assert_errors(&self, expected: &[&str]) {
        let errors: Vec<&str> = self.errors().iter().map(String::as_str).collect();
        assert_eq!(errors, expected, "errors mismatch");
    }
}
