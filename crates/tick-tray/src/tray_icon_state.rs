/// Tray icon states corresponding to the service lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// No session running; ready to start one.
    Idle,
    /// Foreground session running, notification live.
    Running,
}
