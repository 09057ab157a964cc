use crate::{
    Command, Disposition,
    session::{Clock, DisplayState, HighlightColor, RenderSink, elapsed_seconds},
};

use std::{
    sync::{
        Arc,
        atomic::{AtomicU8, AtomicU32, Ordering},
    },
    time::Duration,
};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Lifecycle phase of a [`ServiceSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SessionPhase {
    /// Session exists but the refresh loop has not started.
    Created = 0,
    /// Refresh loop is running.
    Running = 1,
    /// Session is torn down; no further renders may be observed.
    Terminated = 2,
}

impl SessionPhase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Created,
            1 => Self::Running,
            _ => Self::Terminated,
        }
    }
}

/// One foreground session: a start timestamp fixed at creation, a mutable
/// highlight color, and a `Created -> Running -> Terminated` lifecycle.
///
/// The color and phase are single scalars with no cross-field invariant,
/// so both live in atomics and the session needs no lock. The command
/// router ([`deliver`]) and the refresh loop may touch them concurrently.
///
/// [`deliver`]: ServiceSession::deliver
pub struct ServiceSession {
    id: Uuid,
    clock: Arc<dyn Clock>,
    start: Duration,
    color: AtomicU32,
    phase: AtomicU8,
}

impl ServiceSession {
    /// Create a session, capturing the start timestamp exactly once.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let start = clock.now();
        Self {
            id: Uuid::new_v4(),
            clock,
            start,
            color: AtomicU32::new(HighlightColor::random_bright().pack()),
            phase: AtomicU8::new(SessionPhase::Created as u8),
        }
    }

    /// Session ID for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        SessionPhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// Whether the session has been torn down.
    pub fn is_terminated(&self) -> bool {
        self.phase() == SessionPhase::Terminated
    }

    /// Current highlight color.
    pub fn color(&self) -> HighlightColor {
        HighlightColor::unpack(self.color.load(Ordering::Relaxed))
    }

    fn set_color(&self, color: HighlightColor) {
        self.color.store(color.pack(), Ordering::Relaxed);
    }

    /// Milliseconds since the session started. Never negative: the clock is
    /// monotonic and `start` was read from the same clock.
    pub(crate) fn elapsed_ms(&self) -> u64 {
        self.clock.now().saturating_sub(self.start).as_millis() as u64
    }

    /// Derive the display state for the current instant.
    pub fn display_state(&self) -> DisplayState {
        self.display_state_at(self.elapsed_ms())
    }

    pub(crate) fn display_state_at(&self, elapsed_ms: u64) -> DisplayState {
        DisplayState {
            elapsed_seconds: elapsed_seconds(0, elapsed_ms),
            color: self.color(),
        }
    }

    pub(crate) fn mark_running(&self) {
        let _ = self.phase.compare_exchange(
            SessionPhase::Created as u8,
            SessionPhase::Running as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    /// Route one command delivery into the session.
    ///
    /// Absent and undecodable payloads are silent no-ops that leave every
    /// session field untouched. `Recolor` re-renders immediately with the
    /// new color and the current elapsed time, independent of the periodic
    /// loop's own next wake. `Stop` is terminal.
    #[instrument(skip(self, sink), fields(session_id = %self.id))]
    pub fn deliver(&self, payload: Option<&str>, sink: &dyn RenderSink) -> Disposition {
        if self.is_terminated() {
            debug!("Command delivered to terminated session, ignoring");
            return Disposition::Terminate;
        }

        match Command::decode(payload) {
            None => {
                debug!(?payload, "Undecodable command payload, ignoring");
                Disposition::KeepAlive
            }
            Some(Command::Recolor) => {
                let color = HighlightColor::random_bright();
                self.set_color(color);
                if let Err(e) = sink.render(&self.display_state()) {
                    warn!(error = ?e, "Render after recolor failed");
                }
                info!(color = %color.to_hex(), "Highlight color changed");
                Disposition::KeepAlive
            }
            Some(Command::Stop) => {
                info!("Stop command received");
                self.shut_down(sink);
                Disposition::Terminate
            }
        }
    }

    /// Tear the session down and withdraw its notification.
    ///
    /// Only the first call performs the withdrawal; later calls are no-ops,
    /// so the stop command and an app-level shutdown can race safely.
    pub fn shut_down(&self, sink: &dyn RenderSink) {
        let previous = self
            .phase
            .swap(SessionPhase::Terminated as u8, Ordering::SeqCst);

        if SessionPhase::from_u8(previous) != SessionPhase::Terminated {
            if let Err(e) = sink.withdraw() {
                warn!(session_id = %self.id, error = ?e, "Notification withdrawal failed");
            }
            info!(session_id = %self.id, "Session terminated");
        }
    }
}

impl std::fmt::Debug for ServiceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceSession")
            .field("id", &self.id)
            .field("start", &self.start)
            .field("color", &self.color())
            .field("phase", &self.phase())
            .finish()
    }
}
