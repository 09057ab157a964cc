use crate::{CoreResult, session::HighlightColor};

/// Snapshot handed to the render sink on each refresh.
///
/// Derived from the session on every tick and never stored beyond the
/// current notification render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    /// Whole seconds since the session started.
    pub elapsed_seconds: u64,
    /// Current highlight color.
    pub color: HighlightColor,
}

/// Destination for rendered notification states.
///
/// The production implementation talks to the desktop notification server;
/// tests substitute a recording sink. Implementations must reuse one stable
/// notification identity so repeated renders replace rather than duplicate.
pub trait RenderSink: Send + Sync {
    /// Draw or replace the persistent notification.
    fn render(&self, state: &DisplayState) -> CoreResult<()>;

    /// Withdraw the notification when the session ends.
    fn withdraw(&self) -> CoreResult<()>;
}
