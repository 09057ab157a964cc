//! Stable, reusable notification-action triggers.
//!
//! The notification server hands back only the action key of a tapped
//! button, so the key must stay identical across every re-render for taps
//! to keep routing to the same command. One trigger exists per command
//! kind, created lazily on first request and reused for the life of the
//! process.

use crate::Command;

use std::sync::Arc;

use once_cell::sync::OnceCell;

/// An action button attached to the rendered notification.
///
/// Wraps the command it delivers together with the wire key and the label
/// the notification server shows on the button.
#[derive(Debug, PartialEq, Eq)]
pub struct Trigger {
    command: Command,
    label: &'static str,
}

impl Trigger {
    fn for_command(command: Command) -> Self {
        let label = match command {
            Command::Recolor => "Change color",
            Command::Stop => "Stop service",
        };
        Self { command, label }
    }

    /// The command a tap on this trigger delivers.
    pub fn command(&self) -> Command {
        self.command
    }

    /// Wire name the notification server echoes back on tap.
    pub fn action_key(&self) -> &'static str {
        self.command.action_key()
    }

    /// Button label shown to the user.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// One-trigger-per-command memoization table.
///
/// `get_or_init` gives the double-checked first-access guarantee: under
/// concurrent first requests exactly one `Trigger` is constructed per
/// command, and every request returns the same `Arc`.
#[derive(Debug, Default)]
pub struct TriggerCache {
    recolor: OnceCell<Arc<Trigger>>,
    stop: OnceCell<Arc<Trigger>>,
}

impl TriggerCache {
    /// Create an empty cache; triggers are built on first request.
    pub fn new() -> Self {
        Self::default()
    }

    /// The singleton trigger for `command`.
    pub fn get(&self, command: Command) -> Arc<Trigger> {
        let cell = match command {
            Command::Recolor => &self.recolor,
            Command::Stop => &self.stop,
        };
        Arc::clone(cell.get_or_init(|| Arc::new(Trigger::for_command(command))))
    }
}
