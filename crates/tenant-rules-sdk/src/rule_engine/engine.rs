//! Core RuleEngine implementation

use super::types::{collect_triggered_workflows, EvaluationOutcome};
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use crate::loader::load_rules_file;
use crate::validator::{validate_rules, ValidationWarning};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tenant_rules_core::BusinessRule;
use tenant_rules_runtime::{
    merge_rule_results, EvaluateOptions, MetricsCollector, MetricsSnapshot, Notifier,
    RuleContext, RuleExecutor, RuleTrace,
};

/// A loaded rule set plus the executor that evaluates it
///
/// The engine holds no per-call state; `evaluate*` can be called
/// concurrently from many threads.
pub struct RuleEngine {
    /// Rules in load order
    rules: Vec<BusinessRule>,

    /// Rule executor
    executor: RuleExecutor,

    /// Metrics collector
    metrics: Option<Arc<MetricsCollector>>,

    /// Configuration
    config: EngineConfig,
}

impl RuleEngine {
    /// Create an engine from configuration, loading its rule files
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_rules(config, Vec::new(), None)
    }

    /// Create an engine from configuration plus extra rules
    ///
    /// Rules from `config.rule_files` come first, then `extra` in order.
    pub(crate) fn with_rules(
        config: EngineConfig,
        extra: Vec<BusinessRule>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Result<Self> {
        for (index, path) in config.rule_files.iter().enumerate() {
            if config.rule_files[..index].contains(path) {
                return Err(SdkError::Config(format!(
                    "rule file {} is listed more than once",
                    path.display()
                )));
            }
        }

        let mut rules = Vec::new();
        for path in &config.rule_files {
            rules.extend(load_rules_file(path)?);
        }
        rules.extend(extra);

        for warning in validate_rules(&rules) {
            tracing::warn!("Rule validation: {}", warning);
        }

        let metrics = config
            .enable_metrics
            .then(|| Arc::new(MetricsCollector::new()));

        let mut executor = RuleExecutor::new();
        if let Some(notifier) = notifier {
            executor = executor.with_notifier(notifier);
        }
        if let Some(metrics) = &metrics {
            executor = executor.with_metrics(metrics.clone());
        }

        tracing::info!(
            "Rule engine ready: {} rules ({} active)",
            rules.len(),
            rules.iter().filter(|r| r.is_active).count()
        );

        Ok(Self {
            rules,
            executor,
            metrics,
            config,
        })
    }

    pub fn rules(&self) -> &[BusinessRule] {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current metrics, when enabled
    pub fn metrics(&self) -> Option<MetricsSnapshot> {
        self.metrics.as_ref().map(|m| m.snapshot())
    }

    /// Static warnings for the loaded rule set
    pub fn validate(&self) -> Vec<ValidationWarning> {
        validate_rules(&self.rules)
    }

    /// Rules applicable to a tenant and trigger event, in load order
    ///
    /// A rule applies to a tenant it belongs to or when it has no tenant.
    /// With an event, rules for that event apply, plus rules without a
    /// trigger event when `include_untriggered` is set. Without an event
    /// every rule applies.
    pub fn select_rules(
        &self,
        tenant_id: Option<&str>,
        trigger_event: Option<&str>,
    ) -> Vec<&BusinessRule> {
        self.rules
            .iter()
            .filter(|rule| tenant_id.map_or(true, |tenant| rule.applies_to_tenant(tenant)))
            .filter(|rule| match (trigger_event, rule.trigger_event.as_deref()) {
                (None, _) => true,
                (Some(event), Some(rule_event)) => event == rule_event,
                (Some(_), None) => self.config.include_untriggered,
            })
            .collect()
    }

    /// Evaluate every loaded rule
    pub fn evaluate(&self, context: &RuleContext) -> EvaluationOutcome {
        self.evaluate_selected(None, None, context)
    }

    /// Evaluate the rules selected for a tenant and trigger event
    pub fn evaluate_for(
        &self,
        tenant_id: &str,
        trigger_event: Option<&str>,
        context: &RuleContext,
    ) -> EvaluationOutcome {
        self.evaluate_selected(Some(tenant_id), trigger_event, context)
    }

    /// Explain how the selected rules' conditions resolve, without applying actions
    pub fn explain(
        &self,
        tenant_id: &str,
        trigger_event: Option<&str>,
        context: &RuleContext,
    ) -> Vec<RuleTrace> {
        let selected = self.select_rules(Some(tenant_id), trigger_event);
        self.executor
            .trace_rules(&selected, context, self.options())
    }

    fn options(&self) -> EvaluateOptions {
        EvaluateOptions {
            stop_on_first_match: self.config.stop_on_first_match,
        }
    }

    /// Evaluate the rules [`select_rules`](Self::select_rules) picks
    pub fn evaluate_selected(
        &self,
        tenant_id: Option<&str>,
        trigger_event: Option<&str>,
        context: &RuleContext,
    ) -> EvaluationOutcome {
        let start = Instant::now();

        let missing = context.missing_required_keys();
        if !missing.is_empty() {
            tracing::warn!("Rule context is missing {:?}", missing);
        }

        let selected = self.select_rules(tenant_id, trigger_event);
        tracing::debug!(
            "Selected {} of {} rules (tenant: {:?}, event: {:?})",
            selected.len(),
            self.rules.len(),
            tenant_id,
            trigger_event
        );

        let results = self
            .executor
            .evaluate_rules(&selected, context, self.options());
        let merged = merge_rule_results(&results);
        let triggered_workflows = collect_triggered_workflows(&results);
        let traces = self
            .config
            .enable_tracing
            .then(|| self.executor.trace_rules(&selected, context, self.options()));

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Evaluated {} rules: {} matched, {} errors in {}ms",
            results.len(),
            merged.matched_rules,
            merged.errors.len(),
            duration_ms
        );

        EvaluationOutcome {
            tenant_id: tenant_id.map(str::to_string),
            trigger_event: trigger_event.map(str::to_string),
            results,
            merged,
            triggered_workflows,
            traces,
            duration_ms,
            evaluated_at: Utc::now(),
        }
    }
}
