mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod logging_config;

pub(crate) use {
    behaviour_config::BehaviourConfig, config::Config, logging_config::LoggingConfig,
};

pub(crate) const DEFAULT_AUTOSTART: bool = false;
pub(crate) const DEFAULT_LOG_FILTER: &str = "tick_tray=debug";

pub(crate) fn default_autostart() -> bool {
    DEFAULT_AUTOSTART
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
