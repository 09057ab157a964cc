//! Desktop notification rendering for the foreground session.
//!
//! One notification record per session, re-shown under a stable numeric id
//! so every update replaces the previous render instead of stacking a new
//! one. Action buttons carry the command wire names; taps come back from
//! the notification server as action-key strings and are forwarded into
//! the app's command channel as opaque payloads.

use crate::AppCommand;

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use error_location::ErrorLocation;
use notify_rust::{Hint, Notification, NotificationHandle, Timeout};
use tick_tray_core::{Command, CoreResult, DisplayState, RenderSink, ServiceError, TriggerCache};
use tokio::sync::mpsc;
use tracing::debug;

/// Stable id under which every render of the session notification is shown.
const NOTIFICATION_ID: u32 = 1;

/// Fixed notification title.
const NOTIFICATION_TITLE: &str = "Tick-Tray";

/// Hint key carrying the highlight color as `#rrggbb`.
const COLOR_HINT: &str = "x-tick-tray-color";

/// Synthetic action key notify-rust reports when the notification closes
/// instead of being acted on.
const CLOSE_SENTINEL: &str = "__closed";

/// Render sink backed by the desktop notification server.
pub struct NotificationSink {
    triggers: Arc<TriggerCache>,
    command_tx: mpsc::Sender<AppCommand>,
    waiter_armed: Arc<AtomicBool>,
}

impl NotificationSink {
    /// Create a sink forwarding action taps into `command_tx`.
    pub fn new(triggers: Arc<TriggerCache>, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self {
            triggers,
            command_tx,
            waiter_armed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Keep one blocking waiter listening for an action tap on the handle.
    ///
    /// Every tap and every dismissal ends the wait; the next render re-arms
    /// it. The CAS keeps waiters from stacking up, one per render.
    fn arm_waiter(&self, handle: NotificationHandle) {
        if self
            .waiter_armed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let command_tx = self.command_tx.clone();
        let armed = Arc::clone(&self.waiter_armed);

        // Blocking task: wait_for_action parks on the notification server's
        // signal. Forwarding failure only means the app is shutting down.
        let _ = tokio::task::spawn_blocking(move || {
            handle.wait_for_action(|action| {
                let payload = (action != CLOSE_SENTINEL).then(|| action.to_string());
                if command_tx
                    .blocking_send(AppCommand::Deliver { payload })
                    .is_err()
                {
                    debug!("Command channel closed, dropping notification action");
                }
                armed.store(false, Ordering::SeqCst);
            });
        });
    }
}

impl RenderSink for NotificationSink {
    #[track_caller]
    fn render(&self, state: &DisplayState) -> CoreResult<()> {
        let recolor = self.triggers.get(Command::Recolor);
        let stop = self.triggers.get(Command::Stop);

        let handle = Notification::new()
            .summary(NOTIFICATION_TITLE)
            .body(&state.elapsed_seconds.to_string())
            .id(NOTIFICATION_ID)
            .hint(Hint::Custom(COLOR_HINT.to_string(), state.color.to_hex()))
            .hint(Hint::Resident(true))
            .timeout(Timeout::Never)
            .action(recolor.action_key(), recolor.label())
            .action(stop.action_key(), stop.label())
            .show()
            .map_err(|e| ServiceError::RenderFailed {
                reason: format!("Failed to show notification: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.arm_waiter(handle);

        Ok(())
    }

    #[track_caller]
    fn withdraw(&self) -> CoreResult<()> {
        // Replace under the same id, then close the replacement: the
        // CloseNotification round-trip removes the record entirely.
        let handle = Notification::new()
            .summary(NOTIFICATION_TITLE)
            .id(NOTIFICATION_ID)
            .timeout(Timeout::Milliseconds(1))
            .show()
            .map_err(|e| ServiceError::WithdrawFailed {
                reason: format!("Failed to replace notification: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        handle.close();

        Ok(())
    }
}
