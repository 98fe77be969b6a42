//! Configuration types for RuleEngine

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rule files (JSON or YAML) loaded when the engine is built
    pub rule_files: Vec<PathBuf>,

    /// Stop a rule set evaluation after the first matching rule
    pub stop_on_first_match: bool,

    /// Include rules without a `trigger_event` when filtering by event
    pub include_untriggered: bool,

    /// Enable metrics collection
    pub enable_metrics: bool,

    /// Attach condition traces to every evaluation outcome
    pub enable_tracing: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            rule_files: Vec::new(),
            stop_on_first_match: false,
            include_untriggered: true,
            enable_metrics: true,
            enable_tracing: false,
        }
    }

    /// Add a rule file
    pub fn with_rule_file(mut self, path: PathBuf) -> Self {
        self.rule_files.push(path);
        self
    }

    pub fn stop_on_first_match(mut self, enable: bool) -> Self {
        self.stop_on_first_match = enable;
        self
    }

    pub fn include_untriggered(mut self, enable: bool) -> Self {
        self.include_untriggered = enable;
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
