use crate::session::{RenderSink, ServiceSession, sleep_duration};

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Periodic refresh loop that keeps the elapsed-seconds text honest.
///
/// Each tick recomputes the display text and the delay to the next
/// whole-second boundary from absolute timestamps, so the counter advances
/// exactly on boundaries and delayed ticks catch up instead of drifting.
pub struct RefreshScheduler {
    session: Arc<ServiceSession>,
    sink: Arc<dyn RenderSink>,
}

impl RefreshScheduler {
    /// Create a scheduler rendering `session` into `sink`.
    pub fn new(session: Arc<ServiceSession>, sink: Arc<dyn RenderSink>) -> Self {
        Self { session, sink }
    }

    /// Run until the stop signal fires or the session terminates.
    ///
    /// The loop has no terminal state of its own; cancellation interrupts
    /// the pending sleep immediately. A failed render is logged and
    /// swallowed -- one bad render must not stop future ticks.
    #[instrument(skip_all, fields(session_id = %self.session.id()))]
    pub async fn run(self, mut stop_rx: watch::Receiver<bool>) {
        self.session.mark_running();
        info!("Refresh loop started");

        loop {
            if self.session.is_terminated() {
                break;
            }

            let elapsed_ms = self.session.elapsed_ms();
            let state = self.session.display_state_at(elapsed_ms);

            if let Err(e) = self.sink.render(&state) {
                warn!(error = ?e, "Notification render failed, retrying next tick");
            }

            tokio::select! {
                _ = stop_rx.changed() => {
                    debug!("Refresh loop cancelled");
                    break;
                }
                _ = tokio::time::sleep(sleep_duration(elapsed_ms)) => {}
            }
        }

        info!("Refresh loop stopped");
    }
}
