//! Action constructors

use crate::ast::{Action, AggregateOperation};
use crate::types::Value;

pub fn set_field(field: &str, value: impl Into<Value>) -> Action {
    Action::SetField {
        field: Some(field.to_string()),
        value: Some(value.into()),
    }
}

/// Fee from either a percentage of `entity.total` or a fixed value
pub fn add_fee(field: Option<&str>, percentage: Option<f64>, value: Option<Value>) -> Action {
    Action::AddFee {
        field: field.map(str::to_string),
        percentage,
        value,
    }
}

/// Percentage of `entity.total`, stored under `fee`
pub fn percentage_fee(percentage: f64) -> Action {
    add_fee(None, Some(percentage), None)
}

/// Fixed amount, stored under `fee`
pub fn fixed_fee(amount: f64) -> Action {
    add_fee(None, None, Some(Value::Number(amount)))
}

pub fn error(message: &str) -> Action {
    Action::Error {
        message: Some(message.to_string()),
    }
}

pub fn aggregate(operation: AggregateOperation, source: &str, field: &str) -> Action {
    Action::Aggregate {
        operation: Some(operation),
        source: Some(source.to_string()),
        field: Some(field.to_string()),
    }
}

pub fn sum(source: &str, field: &str) -> Action {
    aggregate(AggregateOperation::Sum, source, field)
}

pub fn count(source: &str, field: &str) -> Action {
    aggregate(AggregateOperation::Count, source, field)
}

pub fn avg(source: &str, field: &str) -> Action {
    aggregate(AggregateOperation::Avg, source, field)
}

pub fn notify(message: &str) -> Action {
    Action::Notify {
        message: Some(message.to_string()),
    }
}

pub fn trigger_workflow(workflow_id: &str) -> Action {
    Action::TriggerWorkflow {
        value: Some(Value::from(workflow_id)),
    }
}
