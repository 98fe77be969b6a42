//! Notification side channel for `notify` actions

use serde::Serialize;
use std::sync::{Mutex, PoisonError};

/// A message raised by a matched rule's `notify` action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub rule_id: String,
    pub entity_type: Option<String>,
    pub message: String,
}

/// Host-provided sink for notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Logs notifications at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        tracing::info!(
            rule_id = %notification.rule_id,
            entity_type = notification.entity_type.as_deref().unwrap_or("unknown"),
            "Rule notification: {}",
            notification.message
        );
    }
}

/// Keeps notifications in memory
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: &Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}
