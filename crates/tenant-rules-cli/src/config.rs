//! CLI configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tenant_rules_sdk::EngineConfig;

/// Settings read from `config/tenant-rules.*` and `TENANT_RULES_*` variables
///
/// Command line flags are applied on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Rule files loaded in addition to the ones given on the command line
    pub rule_files: Vec<PathBuf>,

    pub stop_on_first_match: bool,

    /// Include rules without a trigger event when `--event` is given
    pub include_untriggered: bool,

    /// Log collected metrics after evaluating
    pub enable_metrics: bool,

    /// Attach condition traces to evaluation output
    pub enable_tracing: bool,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rule_files: Vec::new(),
            stop_on_first_match: false,
            include_untriggered: true,
            enable_metrics: false,
            enable_tracing: false,
            pretty: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/tenant-rules").required(false))
            .add_source(config::Environment::with_prefix("TENANT_RULES"))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => {
                tracing::info!("No usable config ({}), using default configuration", e);
                Ok(Self::default())
            }
        }
    }

    /// Engine configuration for the given extra rule files
    pub fn engine_config(&self, rule_files: &[PathBuf]) -> EngineConfig {
        let mut engine = EngineConfig::new()
            .stop_on_first_match(self.stop_on_first_match)
            .include_untriggered(self.include_untriggered)
            .enable_metrics(self.enable_metrics)
            .enable_tracing(self.enable_tracing);
        engine.rule_files = self
            .rule_files
            .iter()
            .chain(rule_files)
            .cloned()
            .collect();
        engine
    }
}
