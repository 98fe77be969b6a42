//! Condition tree evaluation

use super::operators::execute_compare;
use crate::context::RuleContext;
use crate::result::ConditionTrace;
use tenant_rules_core::Condition;

/// Evaluate a condition tree against a context
///
/// `and`/`or` short-circuit; `not` negates its first child. Combinators
/// without children and malformed nodes evaluate to `false`.
pub fn evaluate_condition(condition: &Condition, context: &RuleContext) -> bool {
    match condition {
        Condition::And(children) => {
            !children.is_empty() && children.iter().all(|c| evaluate_condition(c, context))
        }
        Condition::Or(children) => children.iter().any(|c| evaluate_condition(c, context)),
        Condition::Not(children) => children
            .first()
            .is_some_and(|child| !evaluate_condition(child, context)),
        Condition::Compare { field, .. } if field.is_empty() => false,
        Condition::Compare {
            field,
            operator,
            value,
        } => execute_compare(context.resolve(field), *operator, value.as_ref()),
        Condition::Malformed(raw) => {
            tracing::debug!(
                "Malformed condition (field: {:?}, operator: {:?}), returning false",
                raw.field,
                raw.operator
            );
            false
        }
    }
}

/// Evaluate a condition tree and record how every node resolved
///
/// Groups evaluate all of their children so the trace is complete; the
/// result is identical to [`evaluate_condition`].
pub fn evaluate_condition_with_trace(condition: &Condition, context: &RuleContext) -> ConditionTrace {
    match condition {
        Condition::And(children) | Condition::Or(children) | Condition::Not(children) => {
            let nested: Vec<ConditionTrace> = children
                .iter()
                .map(|c| evaluate_condition_with_trace(c, context))
                .collect();
            let result = match condition {
                Condition::And(_) => !nested.is_empty() && nested.iter().all(|t| t.result),
                Condition::Or(_) => nested.iter().any(|t| t.result),
                _ => nested.first().is_some_and(|t| !t.result),
            };
            let group_type = condition
                .logical_operator()
                .map(|op| op.as_str())
                .unwrap_or_default();
            ConditionTrace::group(group_type, nested, result)
                .with_expression(condition.to_expression_string())
        }
        Condition::Compare { field, .. } if field.is_empty() => {
            ConditionTrace::new(condition.to_expression_string(), false)
        }
        Condition::Compare {
            field,
            operator,
            value,
        } => {
            let left = context.resolve(field);
            let result = execute_compare(left, *operator, value.as_ref());
            ConditionTrace::comparison(
                condition.to_expression_string(),
                field,
                left.cloned(),
                operator.as_str(),
                value.clone(),
                result,
            )
        }
        Condition::Malformed(_) => ConditionTrace::new(condition.to_expression_string(), false),
    }
}
