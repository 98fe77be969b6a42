//! Metrics collection for rule evaluation

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

pub const RULES_EVALUATED: &str = "rules_evaluated";
pub const RULES_MATCHED: &str = "rules_matched";
pub const RULES_SKIPPED_INACTIVE: &str = "rules_skipped_inactive";
pub const ACTION_FAILURES: &str = "action_failures";
pub const RULE_SET_DURATION: &str = "rule_set_duration";

/// Monotonic event count
#[derive(Debug)]
pub struct Counter {
    name: String,
    value: AtomicU64,
}

impl Counter {
    pub fn new(name: String) -> Self {
        Self {
            name,
            value: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inc(&self) {
        self.add(1);
    }

    pub fn add(&self, value: u64) {
        self.value.fetch_add(value, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.value.store(0, Ordering::Relaxed);
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Summary {
    count: usize,
    sum: f64,
    max: f64,
}

/// Running summary of observed values (count, sum, max)
///
/// Individual observations are not kept.
#[derive(Debug)]
pub struct Histogram {
    name: String,
    summary: Mutex<Summary>,
}

impl Histogram {
    pub fn new(name: String) -> Self {
        Self {
            name,
            summary: Mutex::new(Summary::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Observe a value
    pub fn observe(&self, value: f64) {
        let mut summary = self.summary.lock().unwrap_or_else(PoisonError::into_inner);
        summary.max = if summary.count == 0 {
            value
        } else {
            summary.max.max(value)
        };
        summary.count += 1;
        summary.sum += value;
    }

    /// Observe a duration in milliseconds
    pub fn observe_duration(&self, duration: Duration) {
        self.observe(duration.as_secs_f64() * 1000.0);
    }

    fn read(&self) -> Summary {
        *self.summary.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn count(&self) -> usize {
        self.read().count
    }

    pub fn sum(&self) -> f64 {
        self.read().sum
    }

    /// Largest observation, zero when empty
    pub fn max(&self) -> f64 {
        self.read().max
    }

    /// Mean observation, zero when empty
    pub fn avg(&self) -> f64 {
        let summary = self.read();
        if summary.count == 0 {
            0.0
        } else {
            summary.sum / summary.count as f64
        }
    }

    pub fn reset(&self) {
        *self.summary.lock().unwrap_or_else(PoisonError::into_inner) = Summary::default();
    }
}

/// Metrics trait
pub trait Metrics: Send + Sync {
    /// Get a counter
    fn counter(&self, name: &str) -> Arc<Counter>;

    /// Get a histogram
    fn histogram(&self, name: &str) -> Arc<Histogram>;

    /// Record execution time
    fn record_execution_time(&self, operation: &str, duration: Duration);
}

/// Point-in-time copy of every metric
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub counters: BTreeMap<String, u64>,
    /// Histogram name to (count, average)
    pub histograms: BTreeMap<String, (usize, f64)>,
}

impl MetricsSnapshot {
    /// Counter value, zero when never touched
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }
}

/// Metrics collector
#[derive(Default)]
pub struct MetricsCollector {
    counters: RwLock<HashMap<String, Arc<Counter>>>,
    histograms: RwLock<HashMap<String, Arc<Histogram>>>,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy out current values
    pub fn snapshot(&self) -> MetricsSnapshot {
        let counters = self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, c)| (name.clone(), c.get()))
            .collect();
        let histograms = self
            .histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, h)| (name.clone(), (h.count(), h.avg())))
            .collect();
        MetricsSnapshot {
            counters,
            histograms,
        }
    }

    /// Reset all metrics
    pub fn reset_all(&self) {
        for counter in self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
        {
            counter.reset();
        }
        for histogram in self
            .histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
        {
            histogram.reset();
        }
    }
}

impl Metrics for MetricsCollector {
    fn counter(&self, name: &str) -> Arc<Counter> {
        self.counters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Counter::new(name.to_string())))
            .clone()
    }

    fn histogram(&self, name: &str) -> Arc<Histogram> {
        self.histograms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Histogram::new(name.to_string())))
            .clone()
    }

    fn record_execution_time(&self, operation: &str, duration: Duration) {
        self.histogram(&format!("{}_duration", operation))
            .observe_duration(duration);
    }
}
