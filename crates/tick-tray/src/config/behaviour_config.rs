use crate::config::default_autostart;

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Start the foreground session at app launch instead of waiting for
    /// the tray menu.
    #[serde(default = "default_autostart")]
    pub autostart: bool,
}
