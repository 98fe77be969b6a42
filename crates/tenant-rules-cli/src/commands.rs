//! Subcommand implementations
//!
//! Each command writes its report to the given writer and returns a
//! [`Status`]; `main` maps that to the process exit code.

use crate::cli::{EvalArgs, TemplatesArgs, ValidateArgs};
use crate::config::CliConfig;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use std::process::ExitCode;
use tenant_rules_core::templates::{builtin_templates, find_template, templates_for};
use tenant_rules_sdk::{RuleContext, RuleEngineBuilder};

/// Result of a command that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// Validation found problems
    Invalid,
    /// A matched rule raised an error and `--fail-on-error` was set
    Blocked,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Ok => ExitCode::SUCCESS,
            Status::Invalid => ExitCode::from(1),
            Status::Blocked => ExitCode::from(2),
        }
    }
}

pub fn eval(args: &EvalArgs, config: &CliConfig, out: &mut dyn Write) -> Result<Status> {
    let mut config = config.clone();
    config.stop_on_first_match |= args.stop_on_first_match;
    config.enable_tracing |= args.explain;
    config.pretty |= args.pretty;

    let mut builder =
        RuleEngineBuilder::new().with_config(config.engine_config(&args.rules));
    if let Some(tenant) = &args.tenant {
        for key in &args.templates {
            builder = builder.add_template(key, tenant);
        }
    }
    let engine = builder.build().context("Failed to load rules")?;
    if engine.rules().is_empty() {
        bail!("No rules loaded; pass --rules or set rule_files in the configuration");
    }

    let context = read_context(&args.context)?;
    let outcome =
        engine.evaluate_selected(args.tenant.as_deref(), args.event.as_deref(), &context);

    write_json(out, &outcome, config.pretty)?;

    if let Some(snapshot) = engine.metrics() {
        tracing::info!("Metrics: {:?}", snapshot.counters);
    }

    if args.fail_on_error && outcome.is_blocked() {
        return Ok(Status::Blocked);
    }
    Ok(Status::Ok)
}

pub fn validate(args: &ValidateArgs, out: &mut dyn Write) -> Result<Status> {
    let mut builder = RuleEngineBuilder::new().enable_metrics(false);
    for path in &args.rules {
        builder = builder.add_rule_file(path);
    }
    let engine = builder.build().context("Failed to load rules")?;

    let warnings = engine.validate();
    for warning in &warnings {
        writeln!(out, "warning: {}", warning)?;
    }
    writeln!(
        out,
        "{} rules checked, {} warnings",
        engine.rules().len(),
        warnings.len()
    )?;

    Ok(if warnings.is_empty() {
        Status::Ok
    } else {
        Status::Invalid
    })
}

pub fn templates(args: &TemplatesArgs, out: &mut dyn Write) -> Result<Status> {
    if let Some(key) = &args.instantiate {
        let tenant = args
            .tenant
            .as_deref()
            .context("--instantiate requires --tenant")?;
        let rule = find_template(key)?.instantiate(tenant);
        write_json(out, &rule, args.pretty)?;
        return Ok(Status::Ok);
    }

    let templates = match &args.business_type {
        Some(business_type) => templates_for(business_type),
        None => builtin_templates(),
    };
    for template in &templates {
        writeln!(
            out,
            "{}\t{}\t{}",
            template.key, template.trigger_event, template.name
        )?;
    }
    Ok(Status::Ok)
}

fn read_context(path: &Path) -> Result<RuleContext> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read context from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read context file {}", path.display()))?
    };

    let document: serde_json::Value =
        serde_json::from_str(&content).context("Context is not valid JSON")?;
    if !document.is_object() {
        bail!("Context must be a JSON object, got {}", type_label(&document));
    }
    Ok(RuleContext::from(document))
}

fn type_label(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const RULES: &str = r#"
- id: min_order
  tenant_id: acme
  name: Minimum order
  trigger_event: on_order_create
  priority: 1
  conditions:
    field: entity.total
    operator: "<"
    value: 15
  actions:
    - type: error
      message: Minimum order not met
- id: fee
  name: Fee
  priority: 2
  actions:
    - type: add_fee
      percentage: 10
"#;

    fn fixture(dir: &TempDir, rules: &str, context: &str) -> (PathBuf, PathBuf) {
        let rules_path = dir.path().join("rules.yaml");
        let context_path = dir.path().join("context.json");
        fs::write(&rules_path, rules).unwrap();
        fs::write(&context_path, context).unwrap();
        (rules_path, context_path)
    }

    fn eval_args(rules: PathBuf, context: PathBuf) -> EvalArgs {
        EvalArgs {
            rules: vec![rules],
            templates: Vec::new(),
            context,
            tenant: None,
            event: None,
            stop_on_first_match: false,
            explain: false,
            fail_on_error: false,
            pretty: false,
        }
    }

    fn run_eval(args: &EvalArgs) -> (Status, serde_json::Value) {
        let mut out = Vec::new();
        let status = eval(args, &CliConfig::default(), &mut out).unwrap();
        (status, serde_json::from_slice(&out).unwrap())
    }

    #[test]
    fn test_eval_prints_outcome() {
        let dir = TempDir::new().unwrap();
        let (rules, context) = fixture(
            &dir,
            RULES,
            r#"{"entityType": "order", "entity": {"total": 10}}"#,
        );

        let (status, json) = run_eval(&eval_args(rules, context));
        assert_eq!(status, Status::Ok);
        assert_eq!(json["merged"]["matchedRules"], 2);
        assert_eq!(json["merged"]["appliedValues"]["fee"], 1);
        assert_eq!(json["merged"]["errors"][0], "Minimum order not met");
        assert!(json.get("traces").is_none());
    }

    #[test]
    fn test_eval_fail_on_error_and_explain() {
        let dir = TempDir::new().unwrap();
        let (rules, context) = fixture(
            &dir,
            RULES,
            r#"{"entityType": "order", "entity": {"total": 10}}"#,
        );

        let mut args = eval_args(rules, context);
        args.fail_on_error = true;
        args.explain = true;
        args.tenant = Some("acme".to_string());
        args.event = Some("on_order_create".to_string());

        let (status, json) = run_eval(&args);
        assert_eq!(status, Status::Blocked);
        assert_eq!(json["tenantId"], "acme");
        assert_eq!(json["traces"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_eval_tenant_filter() {
        let dir = TempDir::new().unwrap();
        let (rules, context) = fixture(
            &dir,
            RULES,
            r#"{"entityType": "order", "entity": {"total": 10}}"#,
        );

        let mut args = eval_args(rules, context);
        args.tenant = Some("globex".to_string());
        args.fail_on_error = true;

        let (status, json) = run_eval(&args);
        assert_eq!(status, Status::Ok);
        assert_eq!(json["merged"]["matchedRules"], 1);
    }

    #[test]
    fn test_eval_with_template() {
        let dir = TempDir::new().unwrap();
        let (rules, context) = fixture(
            &dir,
            "[]",
            r#"{"entityType": "order", "entity": {"total": 150}}"#,
        );

        let mut args = eval_args(rules, context);
        args.tenant = Some("shop".to_string());
        args.templates = vec!["retail.free_shipping".to_string()];

        let (_, json) = run_eval(&args);
        assert_eq!(json["merged"]["appliedValues"]["shipping_fee"], 0);
    }

    #[test]
    fn test_eval_without_rules_fails() {
        let dir = TempDir::new().unwrap();
        let (rules, context) = fixture(&dir, "[]", "{}");

        let mut out = Vec::new();
        let result = eval(&eval_args(rules, context), &CliConfig::default(), &mut out);
        assert!(result.is_err());
    }

    #[test]
    fn test_eval_rejects_non_object_context() {
        let dir = TempDir::new().unwrap();
        let (rules, context) = fixture(&dir, RULES, "[1, 2]");

        let mut out = Vec::new();
        let err = eval(&eval_args(rules, context), &CliConfig::default(), &mut out).unwrap_err();
        assert!(err.to_string().contains("an array"), "{}", err);
    }

    #[test]
    fn test_validate_reports_warnings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(
            &path,
            r#"[{"id": "bad", "name": "Bad",
                "conditions": {"field": "entity.x", "operator": "between", "value": 1},
                "actions": [{"type": "set_field", "field": "x", "value": 1}]}]"#,
        )
        .unwrap();

        let mut out = Vec::new();
        let status = validate(&ValidateArgs { rules: vec![path] }, &mut out).unwrap();
        let report = String::from_utf8(out).unwrap();

        assert_eq!(status, Status::Invalid);
        assert!(report.contains("warning: bad at conditions"), "{}", report);
        assert!(report.ends_with("1 rules checked, 1 warnings\n"), "{}", report);
    }

    #[test]
    fn test_validate_clean_rules() {
        let dir = TempDir::new().unwrap();
        let (rules, _) = fixture(&dir, RULES, "{}");

        let mut out = Vec::new();
        let status = validate(&ValidateArgs { rules: vec![rules] }, &mut out).unwrap();
        assert_eq!(status, Status::Ok);
        assert_eq!(String::from_utf8(out).unwrap(), "2 rules checked, 0 warnings\n");
    }

    #[test]
    fn test_templates_list_and_instantiate() {
        let mut out = Vec::new();
        let args = TemplatesArgs {
            business_type: Some("pharmacy".to_string()),
            instantiate: None,
            tenant: None,
            pretty: false,
        };
        templates(&args, &mut out).unwrap();
        let listing = String::from_utf8(out).unwrap();
        assert_eq!(listing.lines().count(), 2);
        assert!(listing.starts_with("pharmacy.prescription_required\t"));

        let mut out = Vec::new();
        let args = TemplatesArgs {
            business_type: None,
            instantiate: Some("services.booking_deposit".to_string()),
            tenant: Some("spa".to_string()),
            pretty: true,
        };
        templates(&args, &mut out).unwrap();
        let rule: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(rule["tenant_id"], "spa");
        assert_eq!(rule["trigger_event"], "on_booking_create");
    }
}
