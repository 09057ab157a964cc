mod clock;
mod color;
mod render;
mod scheduler;
#[allow(clippy::module_inception)]
mod session;
mod timeline;

pub use {
    clock::{Clock, SystemClock},
    color::HighlightColor,
    render::{DisplayState, RenderSink},
    scheduler::RefreshScheduler,
    session::{ServiceSession, SessionPhase},
};

pub(crate) use timeline::{elapsed_seconds, sleep_duration};
