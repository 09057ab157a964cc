/// Commands sent from UI surfaces to the main application.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Start the foreground session. Idempotent if one is already running.
    StartService,
    /// Deliver a raw notification-action payload to the running session.
    Deliver {
        /// Opaque payload from the notification server; `None` when the
        /// notification was dismissed rather than acted on.
        payload: Option<String>,
    },
    /// Request application shutdown.
    Shutdown,
}
