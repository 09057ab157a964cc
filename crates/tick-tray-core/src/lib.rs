//! Tick-Tray Core Library
//!
//! Host-independent logic for a persistent elapsed-time notification:
//! the session state machine, the second-boundary refresh scheduler, and
//! the notification-action command protocol.
//!
//! The clock and the notification surface are both injected, so the whole
//! lifecycle can be driven in tests without a desktop session.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tick_tray_core::{RefreshScheduler, RenderSink, ServiceSession, SystemClock};
//! use tokio::sync::watch;
//!
//! async fn start(sink: Arc<dyn RenderSink>) {
//!     let session = Arc::new(ServiceSession::new(Arc::new(SystemClock::new())));
//!     let (stop_tx, stop_rx) = watch::channel(false);
//!
//!     tokio::spawn(RefreshScheduler::new(Arc::clone(&session), sink).run(stop_rx));
//!
//!     // ... later: stop_tx.send(true) cancels the refresh loop.
//!     drop(stop_tx);
//! }
//! ```

mod command;
mod error;
mod session;
mod trigger;

pub use {
    command::{Command, Disposition, RECOLOR_ACTION, STOP_ACTION},
    error::{Result as CoreResult, ServiceError},
    session::{
        Clock, DisplayState, HighlightColor, RefreshScheduler, RenderSink, ServiceSession,
        SessionPhase, SystemClock,
    },
    trigger::{Trigger, TriggerCache},
};

#[cfg(test)]
mod tests;
