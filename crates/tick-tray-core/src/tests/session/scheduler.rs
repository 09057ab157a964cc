use crate::{
    CoreResult, DisplayState, Disposition, RECOLOR_ACTION, RefreshScheduler, RenderSink,
    STOP_ACTION, ServiceSession,
    tests::support::{RecordingSink, TokioClock},
};

use error_location::ErrorLocation;

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::sync::watch;

/// Sink whose renders always fail, counting the attempts.
#[derive(Default)]
struct FailingSink {
    attempts: AtomicUsize,
}

impl RenderSink for FailingSink {
    #[track_caller]
    fn render(&self, _state: &DisplayState) -> CoreResult<()> {
        let _ = self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(crate::ServiceError::RenderFailed {
            reason: "notification server unavailable".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn withdraw(&self) -> CoreResult<()> {
        Ok(())
    }
}

fn spawn_scheduler(
    session: &Arc<ServiceSession>,
    sink: &Arc<RecordingSink>,
) -> (watch::Sender<bool>, tokio::task::JoinHandle<()>) {
    let (stop_tx, stop_rx) = watch::channel(false);
    let scheduler = RefreshScheduler::new(Arc::clone(session), Arc::clone(sink) as Arc<dyn RenderSink>);
    (stop_tx, tokio::spawn(scheduler.run(stop_rx)))
}

/// WHAT: The counter renders 0 immediately, then once per second boundary
/// WHY: Ticks must land exactly on boundaries, never early and never doubled
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_running_scheduler_when_time_passes_then_renders_on_second_boundaries() {
    // Given: A scheduler on a paused-time clock
    let session = Arc::new(ServiceSession::new(Arc::new(TokioClock::new())));
    let sink = Arc::new(RecordingSink::new());
    let (stop_tx, task) = spawn_scheduler(&session, &sink);

    // When: 999ms pass
    tokio::time::sleep(Duration::from_millis(999)).await;

    // Then: Only the immediate render has happened
    assert_eq!(sink.texts(), vec![0]);

    // When: The 1s boundary passes
    tokio::time::sleep(Duration::from_millis(51)).await;

    // Then: Exactly one more render, showing 1
    assert_eq!(sink.texts(), vec![0, 1]);

    let _ = stop_tx.send(true);
    task.await.unwrap();
}

/// WHAT: A recolor mid-interval renders at once without disturbing the cadence
/// WHY: Command renders are independent of the periodic loop's next wake
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_recolor_between_ticks_when_delivered_then_extra_render_and_cadence_kept() {
    // Given: A scheduler that has rendered 0 and 1
    let session = Arc::new(ServiceSession::new(Arc::new(TokioClock::new())));
    let sink = Arc::new(RecordingSink::new());
    let (stop_tx, task) = spawn_scheduler(&session, &sink);
    tokio::time::sleep(Duration::from_millis(1050)).await;
    assert_eq!(sink.texts(), vec![0, 1]);

    // When: A recolor arrives at t=1500
    tokio::time::sleep(Duration::from_millis(450)).await;
    let disposition = session.deliver(Some(RECOLOR_ACTION), sink.as_ref());

    // Then: An immediate render with text 1 and the session's new color
    assert_eq!(disposition, Disposition::KeepAlive);
    let renders = sink.renders();
    assert_eq!(renders.len(), 3);
    assert_eq!(renders[2].elapsed_seconds, 1);
    assert_eq!(renders[2].color, session.color());

    // When: The 2s boundary passes
    tokio::time::sleep(Duration::from_millis(550)).await;

    // Then: The periodic loop still woke at t=2000
    assert_eq!(sink.texts(), vec![0, 1, 1, 2]);

    let _ = stop_tx.send(true);
    task.await.unwrap();
}

/// WHAT: Stop cancels the pending sleep and prevents all further renders
/// WHY: Stop is terminal; no render may be observed after it is processed
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_stop_mid_interval_when_processed_then_no_further_renders() {
    // Given: A scheduler that has rendered once and sleeps toward t=1000
    let session = Arc::new(ServiceSession::new(Arc::new(TokioClock::new())));
    let sink = Arc::new(RecordingSink::new());
    let (stop_tx, task) = spawn_scheduler(&session, &sink);
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(sink.texts(), vec![0]);

    // When: A stop command is processed and its disposition applied
    let disposition = session.deliver(Some(STOP_ACTION), sink.as_ref());
    assert_eq!(disposition, Disposition::Terminate);
    let _ = stop_tx.send(true);
    task.await.unwrap();

    // Then: Time passing produces no further renders
    tokio::time::sleep(Duration::from_millis(3000)).await;
    assert_eq!(sink.texts(), vec![0]);
    assert_eq!(sink.withdrawals(), 1);
}

/// WHAT: The stop signal alone interrupts a pending sleep immediately
/// WHY: Session teardown must not wait out the remainder of a tick
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_sleeping_scheduler_when_stop_signal_sent_then_loop_exits_at_once() {
    // Given: A scheduler sleeping toward the next boundary
    let session = Arc::new(ServiceSession::new(Arc::new(TokioClock::new())));
    let sink = Arc::new(RecordingSink::new());
    let (stop_tx, task) = spawn_scheduler(&session, &sink);
    tokio::time::sleep(Duration::from_millis(200)).await;

    // When: The stop signal fires mid-sleep
    let _ = stop_tx.send(true);
    task.await.unwrap();

    // Then: Only the initial render was ever observed
    assert_eq!(sink.texts(), vec![0]);
}

/// WHAT: A failing render does not stop the loop
/// WHY: A single failed render must not terminate the session
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_failing_sink_when_renders_fail_then_loop_keeps_ticking() {
    // Given: A scheduler whose sink rejects every render
    let session = Arc::new(ServiceSession::new(Arc::new(TokioClock::new())));
    let sink = Arc::new(FailingSink::default());
    let (stop_tx, stop_rx) = watch::channel(false);
    let scheduler =
        RefreshScheduler::new(Arc::clone(&session), Arc::clone(&sink) as Arc<dyn RenderSink>);
    let task = tokio::spawn(scheduler.run(stop_rx));

    // When: Three seconds pass
    tokio::time::sleep(Duration::from_millis(3050)).await;

    // Then: The loop attempted a render on every boundary regardless
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 4);

    let _ = stop_tx.send(true);
    task.await.unwrap();
}
