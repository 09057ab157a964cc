use crate::session::{elapsed_seconds, sleep_duration};

use std::time::Duration;

const MIN_TICK: Duration = Duration::from_millis(100);

/// WHAT: Elapsed seconds is the floor of elapsed milliseconds over 1000
/// WHY: The displayed counter must advance exactly on whole-second boundaries
#[test]
fn given_timestamps_when_computing_elapsed_seconds_then_floored() {
    // Given/When/Then: Boundary cases on both sides of each second
    assert_eq!(elapsed_seconds(0, 0), 0);
    assert_eq!(elapsed_seconds(0, 999), 0);
    assert_eq!(elapsed_seconds(0, 1000), 1);
    assert_eq!(elapsed_seconds(0, 1999), 1);
    assert_eq!(elapsed_seconds(500, 1499), 0);
    assert_eq!(elapsed_seconds(500, 1500), 1);
}

/// WHAT: A clock reading before the start timestamp yields zero, not underflow
/// WHY: The counter is non-negative by contract
#[test]
fn given_now_before_start_when_computing_elapsed_seconds_then_zero() {
    // Given/When/Then: Saturating subtraction protects the invariant
    assert_eq!(elapsed_seconds(5000, 0), 0);
}

/// WHAT: Sleep duration is the time to the next second boundary
/// WHY: Waking exactly on the boundary avoids redundant renders
#[test]
fn given_elapsed_times_when_computing_sleep_then_time_to_next_boundary() {
    // Given/When/Then: Distance to the boundary, floored at the minimum tick
    assert_eq!(sleep_duration(0), Duration::from_millis(1000));
    assert_eq!(sleep_duration(1), Duration::from_millis(999));
    assert_eq!(sleep_duration(900), MIN_TICK);
    assert_eq!(sleep_duration(950), MIN_TICK);
    assert_eq!(sleep_duration(999), MIN_TICK);
    assert_eq!(sleep_duration(1000), Duration::from_millis(1000));
    assert_eq!(sleep_duration(1234), Duration::from_millis(766));
}

/// WHAT: Sleep duration never drops below 100ms
/// WHY: A render that overruns the boundary must not turn the loop into a spin
#[test]
fn given_any_elapsed_time_when_computing_sleep_then_at_least_min_tick() {
    // Given/When/Then: Exhaustive sweep over several boundary periods
    for elapsed_ms in 0..5000 {
        assert!(
            sleep_duration(elapsed_ms) >= MIN_TICK,
            "sleep for elapsed {}ms fell below the floor",
            elapsed_ms
        );
    }
}
