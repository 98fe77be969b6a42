//! Rule file loading tests

use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tenant_rules_sdk::{
    load_rules_file, CollectingNotifier, EngineConfig, RuleContext, RuleEngine, RuleEngineBuilder,
    RuleFormat, SdkError, Value,
};

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_json_and_yml_files() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let json_path = write(
        &dir,
        "fees.json",
        r#"[{"id": "fee", "name": "Fee", "actions": [{"type": "add_fee", "percentage": 5}]}]"#,
    );
    let yml_path = write(
        &dir,
        "notes.yml",
        "id: note\nname: Note\nactions:\n  - type: notify\n    message: hi\n",
    );

    assert_eq!(load_rules_file(&json_path)?[0].id, "fee");
    assert_eq!(load_rules_file(&yml_path)?[0].id, "note");
    Ok(())
}

#[test]
fn test_config_files_load_before_builder_rules() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let first = write(&dir, "a.json", r#"{"id": "from_a", "name": "A"}"#);
    let second = write(&dir, "b.yaml", "- id: from_b\n  name: B\n");

    let engine = RuleEngineBuilder::new()
        .add_rule_content("inline", RuleFormat::Json, r#"{"id": "inline", "name": "Inline"}"#)
        .with_config(EngineConfig::new().with_rule_file(first))
        .add_rule_file(second)
        .build()?;

    let ids: Vec<&str> = engine.rules().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["from_a", "from_b", "inline"]);
    Ok(())
}

#[test]
fn test_engine_new_loads_config_files() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write(
        &dir,
        "rules.json",
        r#"{"rules": [{"id": "surcharge", "name": "Surcharge",
            "conditions": {"field": "entity.total", "operator": ">", "value": 100},
            "actions": [{"type": "add_fee", "field": "surcharge", "percentage": 2}]}]}"#,
    );

    let engine = RuleEngine::new(EngineConfig::new().with_rule_file(path))?;
    let outcome = engine.evaluate(&RuleContext::new("order", json!({"total": 500})));

    assert_eq!(outcome.merged.applied_values.get("surcharge"), Some(&Value::from(10)));
    Ok(())
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "rules.toml", "id = 'x'");

    let result = RuleEngineBuilder::new().add_rule_file(path).build();
    assert!(matches!(result, Err(SdkError::InvalidRuleFile(_))));
}

#[test]
fn test_parse_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.yaml", "id: [unclosed\n");

    match load_rules_file(&path) {
        Err(SdkError::Parse { origin, .. }) => assert!(origin.contains("broken.yaml")),
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_templates_through_builder() -> anyhow::Result<()> {
    let notifier = Arc::new(CollectingNotifier::new());
    let engine = RuleEngineBuilder::new()
        .add_template("retail.high_value_review", "shop-1")
        .with_notifier(notifier.clone())
        .build()?;

    let outcome = engine.evaluate_for(
        "shop-1",
        Some("on_order_create"),
        &RuleContext::new("order", json!({"total": 5000})),
    );

    assert_eq!(outcome.triggered_workflows, vec!["manual_review"]);
    assert_eq!(notifier.notifications().len(), 1);

    let other = engine.evaluate_for(
        "shop-2",
        Some("on_order_create"),
        &RuleContext::new("order", json!({"total": 5000})),
    );
    assert!(other.results.is_empty());
    Ok(())
}
