//! Rule document loading
//!
//! A rule document is a single rule, a list of rules, or an object with a
//! `rules` list. JSON files hold one document; YAML files may hold several
//! separated by `---`.

use crate::error::{Result, SdkError};
use serde::Deserialize;
use std::path::Path;
use tenant_rules_core::BusinessRule;

/// Serialization format of a rule document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    Json,
    Yaml,
}

impl RuleFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(RuleFormat::Json),
            Some("yaml") | Some("yml") => Ok(RuleFormat::Yaml),
            _ => Err(SdkError::InvalidRuleFile(format!(
                "{}: expected a .json, .yaml or .yml extension",
                path.display()
            ))),
        }
    }
}

#[derive(Deserialize)]
struct RuleList {
    rules: Vec<BusinessRule>,
}

enum DocumentShape {
    Empty,
    List,
    Wrapped,
    Single,
}

fn shape_of(doc: &serde_json::Value) -> DocumentShape {
    match doc {
        serde_json::Value::Null => DocumentShape::Empty,
        serde_json::Value::Array(_) => DocumentShape::List,
        serde_json::Value::Object(map) if map.contains_key("rules") && !map.contains_key("id") => {
            DocumentShape::Wrapped
        }
        _ => DocumentShape::Single,
    }
}

fn rules_from_document(doc: serde_json::Value, origin: &str) -> Result<Vec<BusinessRule>> {
    let rules = match shape_of(&doc) {
        DocumentShape::Empty => Ok(Vec::new()),
        DocumentShape::List => serde_json::from_value::<Vec<BusinessRule>>(doc),
        DocumentShape::Wrapped => serde_json::from_value::<RuleList>(doc).map(|list| list.rules),
        DocumentShape::Single => serde_json::from_value::<BusinessRule>(doc).map(|rule| vec![rule]),
    };
    rules.map_err(|e| SdkError::parse(origin, e))
}

/// Parse rules from in-memory content
pub fn parse_rules(content: &str, format: RuleFormat, origin: &str) -> Result<Vec<BusinessRule>> {
    let rules = match format {
        RuleFormat::Json => {
            let doc: serde_json::Value =
                serde_json::from_str(content).map_err(|e| SdkError::parse(origin, e))?;
            rules_from_document(doc, origin)?
        }
        RuleFormat::Yaml => {
            let mut rules = Vec::new();
            for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
                let doc = serde_json::Value::deserialize(document).map_err(|e| {
                    SdkError::parse(format!("{} (document {})", origin, index + 1), e)
                })?;
                rules.extend(rules_from_document(doc, origin)?);
            }
            rules
        }
    };

    tracing::debug!("Parsed {} rules from {}", rules.len(), origin);
    Ok(rules)
}

/// Load rules from a JSON or YAML file
pub fn load_rules_file(path: &Path) -> Result<Vec<BusinessRule>> {
    let format = RuleFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let rules = parse_rules(&content, format, &path.display().to_string())?;
    tracing::info!("Loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}
