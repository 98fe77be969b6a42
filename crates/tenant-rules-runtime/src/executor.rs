//! Rule and rule set evaluation
//!
//! [`RuleExecutor`] evaluates rules against a context, dispatches `notify`
//! messages to its [`Notifier`] and optionally records metrics. The free
//! functions use a default executor that logs notifications.

use crate::action::apply_actions;
use crate::context::RuleContext;
use crate::engine::{evaluate_condition, evaluate_condition_with_trace};
use crate::observability::metrics::{
    ACTION_FAILURES, RULES_EVALUATED, RULES_MATCHED, RULES_SKIPPED_INACTIVE,
};
use crate::observability::{Metrics, MetricsCollector, Notification, Notifier, TracingNotifier};
use crate::result::{RuleResult, RuleTrace};
use std::borrow::Borrow;
use std::sync::Arc;
use std::time::Instant;
use tenant_rules_core::BusinessRule;

/// Options for rule set evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluateOptions {
    /// Stop after the first matching rule
    pub stop_on_first_match: bool,
}

impl EvaluateOptions {
    pub fn stop_on_first_match() -> Self {
        Self {
            stop_on_first_match: true,
        }
    }
}

/// Rule executor
#[derive(Clone)]
pub struct RuleExecutor {
    notifier: Arc<dyn Notifier>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl Default for RuleExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleExecutor {
    /// Executor that logs notifications and records no metrics
    pub fn new() -> Self {
        Self {
            notifier: Arc::new(TracingNotifier),
            metrics: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn metrics(&self) -> Option<&Arc<MetricsCollector>> {
        self.metrics.as_ref()
    }

    /// Evaluate one rule
    ///
    /// Inactive rules return an empty, non-matching result without
    /// touching their conditions. A rule without conditions always matches.
    pub fn evaluate_rule(&self, rule: &BusinessRule, context: &RuleContext) -> RuleResult {
        self.count(RULES_EVALUATED, 1);

        if !rule.is_active {
            tracing::debug!("Rule '{}' is inactive, skipping", rule.id);
            self.count(RULES_SKIPPED_INACTIVE, 1);
            return RuleResult::not_matched(rule.id.clone());
        }

        let matched = rule
            .conditions
            .as_ref()
            .map_or(true, |condition| evaluate_condition(condition, context));

        if !matched {
            tracing::debug!("Rule '{}' did not match", rule.id);
            return RuleResult::not_matched(rule.id.clone());
        }

        let outcome = apply_actions(&rule.actions, context);
        tracing::debug!(
            "Rule '{}' matched: {} applied values, {} errors",
            rule.id,
            outcome.applied_values.len(),
            outcome.errors.len()
        );

        self.count(RULES_MATCHED, 1);
        self.count(ACTION_FAILURES, outcome.failed_actions as u64);

        for message in outcome.notifications {
            self.notifier.notify(&Notification {
                rule_id: rule.id.clone(),
                entity_type: context.entity_type().map(str::to_string),
                message,
            });
        }

        RuleResult {
            rule_id: rule.id.clone(),
            matched: true,
            actions: rule.actions.clone(),
            errors: outcome.errors,
            applied_values: outcome.applied_values,
        }
    }

    /// Evaluate rules in ascending priority order
    ///
    /// Takes owned rules or references to them. The input slice is left
    /// untouched; rules with equal priority keep their relative order.
    pub fn evaluate_rules<R: Borrow<BusinessRule>>(
        &self,
        rules: &[R],
        context: &RuleContext,
        options: EvaluateOptions,
    ) -> Vec<RuleResult> {
        let start = Instant::now();
        let mut results = Vec::with_capacity(rules.len());

        for rule in sort_by_priority(rules) {
            let result = self.evaluate_rule(rule, context);
            let matched = result.matched;
            results.push(result);

            if matched && options.stop_on_first_match {
                tracing::debug!("Rule '{}' matched, stopping early", rule.id);
                break;
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_execution_time("rule_set", start.elapsed());
        }
        tracing::debug!(
            "Evaluated {} of {} rules in {:?}",
            results.len(),
            rules.len(),
            start.elapsed()
        );

        results
    }

    /// Trace how each rule's condition tree resolved
    ///
    /// Pure: actions are not applied and nothing is notified or counted.
    pub fn trace_rules<R: Borrow<BusinessRule>>(
        &self,
        rules: &[R],
        context: &RuleContext,
        options: EvaluateOptions,
    ) -> Vec<RuleTrace> {
        let mut traces = Vec::with_capacity(rules.len());
        for rule in sort_by_priority(rules) {
            let trace = trace_rule(rule, context);
            let matched = trace.matched;
            traces.push(trace);
            if matched && options.stop_on_first_match {
                break;
            }
        }
        traces
    }

    fn count(&self, name: &str, value: u64) {
        if let Some(metrics) = &self.metrics {
            if value > 0 {
                metrics.counter(name).add(value);
            }
        }
    }
}

fn sort_by_priority<R: Borrow<BusinessRule>>(rules: &[R]) -> Vec<&BusinessRule> {
    let mut ordered: Vec<&BusinessRule> =
        rules.iter().map(Borrow::<BusinessRule>::borrow).collect();
    // sort_by_key is stable
    ordered.sort_by_key(|rule| rule.priority);
    ordered
}

/// Trace a single rule's condition evaluation
pub fn trace_rule(rule: &BusinessRule, context: &RuleContext) -> RuleTrace {
    let start = Instant::now();
    let trace = RuleTrace::new(rule.id.clone())
        .with_name(rule.name.clone())
        .with_priority(rule.priority);

    if !rule.is_active {
        return trace.inactive();
    }

    let trace = match &rule.conditions {
        Some(condition) => {
            let condition_trace = evaluate_condition_with_trace(condition, context);
            let matched = condition_trace.result;
            trace.with_condition(condition_trace).set_matched(matched)
        }
        None => trace.set_matched(true),
    };

    trace.with_execution_time(start.elapsed().as_micros() as u64)
}

/// Evaluate one rule with a default executor
pub fn evaluate_rule(rule: &BusinessRule, context: &RuleContext) -> RuleResult {
    RuleExecutor::new().evaluate_rule(rule, context)
}

/// Evaluate a rule set with a default executor
pub fn evaluate_rules<R: Borrow<BusinessRule>>(
    rules: &[R],
    context: &RuleContext,
    options: EvaluateOptions,
) -> Vec<RuleResult> {
    RuleExecutor::new().evaluate_rules(rules, context, options)
}
