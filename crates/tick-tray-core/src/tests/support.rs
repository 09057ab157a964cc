//! Shared fakes: a hand-advanced clock, a tokio-timer clock, and a render
//! sink that records every state it is asked to draw.

use crate::{Clock, CoreResult, DisplayState, RenderSink};

use std::{
    sync::{
        Mutex,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

/// Test clock advanced by hand, millisecond resolution.
pub(crate) struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub(crate) fn new() -> Self {
        Self {
            now_ms: AtomicU64::new(0),
        }
    }

    pub(crate) fn advance_ms(&self, delta: u64) {
        let _ = self.now_ms.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms.load(Ordering::SeqCst))
    }
}

/// Clock that reads tokio's timer, so paused-time tests control it.
pub(crate) struct TokioClock {
    origin: tokio::time::Instant,
}

impl TokioClock {
    pub(crate) fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Render sink that records renders and counts withdrawals.
#[derive(Default)]
pub(crate) struct RecordingSink {
    renders: Mutex<Vec<DisplayState>>,
    withdrawals: AtomicUsize,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::unwrap_used)]
    pub(crate) fn renders(&self) -> Vec<DisplayState> {
        self.renders.lock().unwrap().clone()
    }

    /// Just the elapsed-seconds texts, in render order.
    pub(crate) fn texts(&self) -> Vec<u64> {
        self.renders().iter().map(|s| s.elapsed_seconds).collect()
    }

    pub(crate) fn withdrawals(&self) -> usize {
        self.withdrawals.load(Ordering::SeqCst)
    }
}

impl RenderSink for RecordingSink {
    #[allow(clippy::unwrap_used)]
    fn render(&self, state: &DisplayState) -> CoreResult<()> {
        self.renders.lock().unwrap().push(*state);
        Ok(())
    }

    fn withdraw(&self) -> CoreResult<()> {
        let _ = self.withdrawals.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
