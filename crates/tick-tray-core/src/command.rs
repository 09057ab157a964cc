//! Notification-action command protocol.
//!
//! Action taps arrive as opaque payload strings from the notification
//! server. All trust-boundary handling lives in [`Command::decode`]:
//! anything that is not a recognized wire name is a silent no-op.

/// Wire name carried by the "change color" notification action.
pub const RECOLOR_ACTION: &str = "recolor";

/// Wire name carried by the "stop service" notification action.
pub const STOP_ACTION: &str = "stop";

/// A decoded notification-action command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Re-randomize the session's highlight color and re-render.
    Recolor,
    /// Withdraw the notification and tear the session down.
    Stop,
}

impl Command {
    /// Decode an opaque action payload.
    ///
    /// Absent and unrecognized payloads both decode to `None`. The action
    /// channel does not guarantee type integrity end-to-end, so a malformed
    /// payload is never surfaced as an error.
    pub fn decode(payload: Option<&str>) -> Option<Self> {
        match payload? {
            RECOLOR_ACTION => Some(Self::Recolor),
            STOP_ACTION => Some(Self::Stop),
            _ => None,
        }
    }

    /// The wire name this command travels under.
    pub fn action_key(&self) -> &'static str {
        match self {
            Self::Recolor => RECOLOR_ACTION,
            Self::Stop => STOP_ACTION,
        }
    }
}

/// What the host should do with the session after a command delivery.
///
/// Mirrors a durable-background-task contract: a [`KeepAlive`] delivery asks
/// the host to recreate the session if its resources are reclaimed, with the
/// command payload NOT redelivered (at-most-once per tap). Only an explicit
/// stop reports [`Terminate`] -- resurrecting a session the user just stopped
/// would be a bug.
///
/// [`KeepAlive`]: Disposition::KeepAlive
/// [`Terminate`]: Disposition::Terminate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Disposition {
    /// Keep the session alive; restart it if the host kills it.
    KeepAlive,
    /// The session is done; do not restart it.
    Terminate,
}
