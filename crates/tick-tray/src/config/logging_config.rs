use crate::config::default_log_filter;

use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Tracing env-filter directive, e.g. `tick_tray=debug`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}
