//! Observability module
//!
//! Provides evaluation metrics and the notification side channel used by
//! `notify` actions. Logging goes through `tracing` throughout the crate.

pub mod metrics;
pub mod notify;

pub use metrics::{Counter, Histogram, Metrics, MetricsCollector, MetricsSnapshot};
pub use notify::{CollectingNotifier, Notification, Notifier, TracingNotifier};
