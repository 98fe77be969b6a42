//! Action applicator

use super::aggregate::compute_aggregate;
use crate::context::RuleContext;
use crate::error::{ActionError, Result};
use std::collections::HashMap;
use tenant_rules_core::ast::{DEFAULT_FEE_FIELD, TRIGGERED_WORKFLOWS_KEY};
use tenant_rules_core::{Action, Value};

const ENTITY_TOTAL: &str = "entity.total";

/// What a single successful action does to the outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write `value` under `key`, overwriting any earlier write
    Set { key: String, value: Value },
    /// Append a workflow id to `_triggered_workflows`
    AppendWorkflow(Value),
    /// Record a rule-authored validation error
    RaiseError(String),
    /// Surface a notification message
    Notify(String),
    /// Nothing to apply
    Nothing,
}

/// Accumulated result of applying an action list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutcome {
    pub applied_values: HashMap<String, Value>,
    pub errors: Vec<String>,
    /// `notify` messages in action order, for the host's notifier
    pub notifications: Vec<String>,
    /// Number of actions that failed, as opposed to `error` actions
    pub failed_actions: usize,
}

impl ActionOutcome {
    fn apply(&mut self, effect: Effect) -> Result<()> {
        match effect {
            Effect::Set { key, value } => {
                self.applied_values.insert(key, value);
            }
            Effect::AppendWorkflow(id) => {
                let slot = self
                    .applied_values
                    .entry(TRIGGERED_WORKFLOWS_KEY.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                match slot {
                    Value::Array(ids) => ids.push(id),
                    other => {
                        return Err(ActionError::WorkflowAccumulator {
                            key: TRIGGERED_WORKFLOWS_KEY.to_string(),
                            found: other.type_name(),
                        })
                    }
                }
            }
            Effect::RaiseError(message) => self.errors.push(message),
            Effect::Notify(message) => self.notifications.push(message),
            Effect::Nothing => {}
        }
        Ok(())
    }

    fn record_failure(&mut self, kind: &str, error: &ActionError) {
        tracing::warn!("Action {} failed: {}", kind, error);
        self.errors.push(format!("Action {} failed: {}", kind, error));
        self.failed_actions += 1;
    }
}

/// Apply actions in order against a context
///
/// Never fails: a failing action is rendered as `Action <type> failed:
/// <message>` into `errors` and the next action runs.
pub fn apply_actions(actions: &[Action], context: &RuleContext) -> ActionOutcome {
    let mut outcome = ActionOutcome::default();

    for action in actions {
        let applied = execute_action(action, context).and_then(|effect| outcome.apply(effect));
        if let Err(error) = applied {
            outcome.record_failure(action.kind(), &error);
        }
    }

    outcome
}

/// Compute the effect of one action without applying it
pub fn execute_action(action: &Action, context: &RuleContext) -> Result<Effect> {
    match action {
        Action::SetField { field, value } => Ok(Effect::Set {
            key: required(field.as_ref(), "field")?.clone(),
            value: required(value.as_ref(), "value")?.clone(),
        }),

        Action::AddFee {
            field,
            percentage,
            value,
        } => {
            let key = field.as_deref().unwrap_or(DEFAULT_FEE_FIELD).to_string();
            let fee = match (percentage, value) {
                (Some(percentage), _) => Value::Number(percentage_of_total(*percentage, context)?),
                (None, Some(value)) => value.clone(),
                (None, None) => {
                    tracing::warn!("add_fee without percentage or value, skipping");
                    return Ok(Effect::Nothing);
                }
            };
            Ok(Effect::Set { key, value: fee })
        }

        Action::Error { message } => Ok(Effect::RaiseError(
            required(message.as_ref(), "message")?.clone(),
        )),

        Action::Aggregate {
            operation,
            source,
            field,
        } => {
            let operation = *required(operation.as_ref(), "operation")?;
            let source = required(source.as_ref(), "source")?;
            let key = required(field.as_ref(), "field")?;

            match context.resolve(source) {
                Some(Value::Array(items)) => Ok(Effect::Set {
                    key: key.clone(),
                    value: Value::Number(compute_aggregate(operation, items)?),
                }),
                other => {
                    tracing::debug!(
                        "Aggregate source '{}' is {}, skipping",
                        source,
                        other.map_or("undefined", tenant_rules_core::Value::type_name)
                    );
                    Ok(Effect::Nothing)
                }
            }
        }

        Action::Notify { message } => Ok(Effect::Notify(
            required(message.as_ref(), "message")?.clone(),
        )),

        Action::TriggerWorkflow { value } => Ok(Effect::AppendWorkflow(
            required(value.as_ref(), "value")?.clone(),
        )),

        Action::Unknown => {
            tracing::warn!("Unknown action type, skipping");
            Ok(Effect::Nothing)
        }
    }
}

fn required<'a, T>(value: Option<&'a T>, name: &'static str) -> Result<&'a T> {
    value.ok_or(ActionError::MissingField(name))
}

/// `percentage` percent of `entity.total`
///
/// A missing or null total counts as zero; a total with no numeric reading
/// makes the fee `NaN`.
fn percentage_of_total(percentage: f64, context: &RuleContext) -> Result<f64> {
    if !percentage.is_finite() {
        return Err(ActionError::InvalidPercentage(percentage));
    }

    let total = match context.resolve(ENTITY_TOTAL) {
        None | Some(Value::Null) => 0.0,
        Some(total) => total.to_number().unwrap_or(f64::NAN),
    };

    Ok(total * percentage / 100.0)
}
