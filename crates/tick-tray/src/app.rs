use crate::{AppCommand, AppError, AppResult, NotificationSink, TrayCommand, TrayIconState, config::Config};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tao::event_loop::EventLoopProxy;
use tick_tray_core::{
    Disposition, RefreshScheduler, RenderSink, ServiceSession, SystemClock, TriggerCache,
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument};
use tray_icon::menu::MenuEvent;

/// A started foreground session and its refresh-loop plumbing.
pub(crate) struct RunningSession {
    session: Arc<ServiceSession>,
    sink: Arc<NotificationSink>,
    stop_tx: watch::Sender<bool>,
    task: tokio::task::JoinHandle<()>,
}

/// Main application state.
///
/// Runs on the async runtime thread. Communicates tray icon updates
/// back to the main thread via `tray_proxy` because `TrayIcon` is `!Send`
/// and must remain on the UI thread.
pub struct App {
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) config: Config,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) start_menu_id: tray_icon::menu::MenuId,
    pub(crate) exit_menu_id: tray_icon::menu::MenuId,
    pub(crate) triggers: Arc<TriggerCache>,
    pub(crate) session: Option<RunningSession>,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Tick-Tray starting");

        // Tray event forwarding via single persistent blocking task.
        //
        // MenuEvent::receiver() returns a crossbeam_channel::Receiver which
        // HAS blocking recv() -- zero polling, instant response, one thread.
        //
        // Shutdown: when tray_event_rx is dropped (main loop breaks),
        // tray_event_tx.blocking_send() fails, breaking the blocking loop.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        if self.config.behavior.autostart {
            info!("Autostart enabled, starting session");
            self.start_service().await;
        }

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    if let Err(e) = self.handle_tray_event(event).await {
                        error!(error = ?e, "Failed to handle tray event");
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        AppCommand::StartService => {
                            self.start_service().await;
                        }
                        AppCommand::Deliver { payload } => {
                            self.deliver(payload.as_deref()).await;
                        }
                        AppCommand::Shutdown => {
                            info!("Shutdown requested");
                            break;
                        }
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        self.stop_service().await;

        drop(tray_event_rx);

        match tokio::time::timeout(Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        let _ = self.tray_proxy.send_event(TrayCommand::Shutdown);
        info!("Tick-Tray shut down successfully");

        Ok(())
    }

    /// Start the foreground session.
    ///
    /// Idempotent: a start request while a session is already running logs
    /// and does nothing, so the menu item can be clicked repeatedly without
    /// spawning duplicate sessions or duplicate notifications.
    #[instrument(skip(self))]
    async fn start_service(&mut self) {
        if let Some(running) = &self.session {
            if !running.session.is_terminated() {
                info!(
                    session_id = %running.session.id(),
                    "Start requested but session already running"
                );
                return;
            }
        }

        let session = Arc::new(ServiceSession::new(Arc::new(SystemClock::new())));
        let sink = Arc::new(NotificationSink::new(
            Arc::clone(&self.triggers),
            self.command_tx.clone(),
        ));

        let (stop_tx, stop_rx) = watch::channel(false);
        let scheduler = RefreshScheduler::new(
            Arc::clone(&session),
            Arc::clone(&sink) as Arc<dyn RenderSink>,
        );
        let task = tokio::spawn(scheduler.run(stop_rx));

        let _ = self
            .tray_proxy
            .send_event(TrayCommand::SetState(TrayIconState::Running));

        info!(session_id = %session.id(), "Foreground session started");

        self.session = Some(RunningSession {
            session,
            sink,
            stop_tx,
            task,
        });
    }

    /// Route a notification-action payload into the running session.
    ///
    /// With no session running this is a no-op: a dismissal or a stale tap
    /// arriving after teardown has nothing left to act on.
    #[instrument(skip(self))]
    async fn deliver(&mut self, payload: Option<&str>) {
        let disposition = match &self.session {
            Some(running) => running.session.deliver(payload, running.sink.as_ref()),
            None => {
                debug!("Command delivery with no running session, ignoring");
                return;
            }
        };

        if disposition == Disposition::Terminate {
            self.stop_service().await;
        }
    }

    /// Stop the running session, if any: tear the session down, cancel the
    /// refresh loop, and return the tray to idle.
    #[instrument(skip(self))]
    async fn stop_service(&mut self) {
        let Some(running) = self.session.take() else {
            return;
        };

        running.session.shut_down(running.sink.as_ref());
        let _ = running.stop_tx.send(true);

        match tokio::time::timeout(Duration::from_secs(1), running.task).await {
            Ok(Ok(())) => info!("Refresh loop stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Refresh loop task panicked"),
            Err(_) => info!("Refresh loop did not stop within timeout"),
        }

        let _ = self
            .tray_proxy
            .send_event(TrayCommand::SetState(TrayIconState::Idle));

        info!(session_id = %running.session.id(), "Foreground session stopped");
    }

    /// Handle tray menu events.
    #[instrument(skip(self))]
    async fn handle_tray_event(&mut self, event: MenuEvent) -> AppResult<()> {
        let event_id = &event.id;

        if *event_id == self.start_menu_id {
            info!("Start requested from tray menu");
            self.command_tx
                .send(AppCommand::StartService)
                .await
                .map_err(|e| AppError::ChannelSendFailed {
                    message: format!("Failed to send start command: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        } else if *event_id == self.exit_menu_id {
            info!("Exit requested from tray menu");
            self.command_tx
                .send(AppCommand::Shutdown)
                .await
                .map_err(|e| AppError::ChannelSendFailed {
                    message: format!("Failed to send shutdown command: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        Ok(())
    }
}
