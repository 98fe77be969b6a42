//! Action definitions
//!
//! Actions are discriminated by `type`. Required fields are optional in the
//! type so that partially authored actions still load; the applicator
//! reports what is missing instead of the whole rule set failing to parse.

use super::condition::present_value;
use crate::error::CoreError;
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key under which triggered workflow ids accumulate in applied values
pub const TRIGGERED_WORKFLOWS_KEY: &str = "_triggered_workflows";

/// Key used by `add_fee` when no target field is given
pub const DEFAULT_FEE_FIELD: &str = "fee";

/// A typed effect applied when a rule matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Copy `value` into `applied_values[field]`
    SetField {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<String>,
        #[serde(
            default,
            deserialize_with = "present_value",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<Value>,
    },

    /// Percentage of `entity.total`, or a fixed `value`, stored under `field` (default `fee`)
    AddFee {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        percentage: Option<f64>,
        #[serde(
            default,
            deserialize_with = "present_value",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<Value>,
    },

    /// Raise a validation error
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Sum, count or average the array found at `source`
    Aggregate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        operation: Option<AggregateOperation>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },

    /// Emit a notification through the host's notifier
    Notify {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Queue a workflow id under `_triggered_workflows`
    TriggerWorkflow {
        #[serde(
            default,
            deserialize_with = "present_value",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<Value>,
    },

    /// Any `type` this engine does not know; skipped at evaluation time
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Wire name of the action type
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetField { .. } => "set_field",
            Action::AddFee { .. } => "add_fee",
            Action::Error { .. } => "error",
            Action::Aggregate { .. } => "aggregate",
            Action::Notify { .. } => "notify",
            Action::TriggerWorkflow { .. } => "trigger_workflow",
            Action::Unknown => "unknown",
        }
    }

    /// Names of required fields that are absent
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match self {
            Action::SetField { field, value } => {
                if field.is_none() {
                    missing.push("field");
                }
                if value.is_none() {
                    missing.push("value");
                }
            }
            Action::AddFee {
                percentage, value, ..
            } => {
                if percentage.is_none() && value.is_none() {
                    missing.push("percentage|value");
                }
            }
            Action::Error { message } | Action::Notify { message } => {
                if message.is_none() {
                    missing.push("message");
                }
            }
            Action::Aggregate {
                operation,
                source,
                field,
            } => {
                if operation.is_none() {
                    missing.push("operation");
                }
                if source.is_none() {
                    missing.push("source");
                }
                if field.is_none() {
                    missing.push("field");
                }
            }
            Action::TriggerWorkflow { value } => {
                if value.is_none() {
                    missing.push("value");
                }
            }
            Action::Unknown => {}
        }
        missing
    }
}

/// Aggregation applied by the `aggregate` action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOperation {
    Sum,
    Count,
    Avg,
    /// Operation name this engine does not support
    #[serde(other)]
    Unsupported,
}

impl AggregateOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateOperation::Sum => "sum",
            AggregateOperation::Count => "count",
            AggregateOperation::Avg => "avg",
            AggregateOperation::Unsupported => "unsupported",
        }
    }
}

impl FromStr for AggregateOperation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(AggregateOperation::Sum),
            "count" => Ok(AggregateOperation::Count),
            "avg" => Ok(AggregateOperation::Avg),
            other => Err(CoreError::UnknownAggregateOperation(other.to_string())),
        }
    }
}

impl fmt::Display for AggregateOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
