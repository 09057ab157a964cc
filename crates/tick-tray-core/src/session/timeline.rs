//! Second-boundary arithmetic for the refresh loop.

use std::time::Duration;

const SECOND_MS: u64 = 1000;

/// Floor on the computed tick delay.
///
/// A render that runs long can push `now` past the boundary it slept
/// toward; without the floor the next delay would be zero and the loop
/// would spin.
const MIN_TICK_MS: u64 = 100;

/// Whole seconds elapsed between `start_ms` and `now_ms`.
pub(crate) fn elapsed_seconds(start_ms: u64, now_ms: u64) -> u64 {
    now_ms.saturating_sub(start_ms) / SECOND_MS
}

/// Delay until the displayed second next increments, floored at 100ms.
///
/// Recomputed from the absolute elapsed time on every tick, so delayed
/// ticks land back on the true boundary instead of accumulating drift.
pub(crate) fn sleep_duration(elapsed_ms: u64) -> Duration {
    let to_boundary = SECOND_MS - elapsed_ms % SECOND_MS;
    Duration::from_millis(to_boundary.max(MIN_TICK_MS))
}
