//! Tick-Tray: a tray-launched background service that keeps a persistent
//! desktop notification counting the seconds since it started.

mod app;
mod app_command;
mod config;
mod error;
mod notifier;
#[cfg(test)]
mod tests;
mod tray_command;
mod tray_icon_state;
mod tray_manager;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    notifier::NotificationSink,
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
};

use crate::config::Config;

use std::sync::Arc;

use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tick_tray_core::TriggerCache;
use tokio::sync::mpsc;
use tracing::error;

/// Application entry point.
fn main() {
    // Config is loaded before the subscriber so the log filter can come
    // from it; a load failure falls back to the default filter so the
    // failure itself gets logged.
    let config = Config::load();

    let filter = config
        .as_ref()
        .map(|c| c.logging.filter.clone())
        .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::fmt().with_env_filter(filter.as_str()).init();

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new() {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    let mut config = Some(config);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                match cmd {
                    TrayCommand::SetState(state) => {
                        if let Err(e) = tray_manager.update_state(state) {
                            error!(error = ?e, "Failed to update tray icon");
                        }
                    }
                    TrayCommand::Shutdown => {
                        *control_flow = ControlFlow::ExitWithCode(0);
                    }
                }
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                // Init fires once; the take() guard makes a second firing
                // harmless.
                let Some(config) = config.take() else {
                    return;
                };

                let (command_tx, command_rx) = mpsc::channel(32);

                let tray_proxy = tray_proxy.clone();
                let start_menu_id = tray_manager.start_item_id().clone();
                let exit_menu_id = tray_manager.exit_item_id().clone();

                // Spawn tokio runtime on separate thread.
                // TrayManager stays on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let app = App {
                            tray_proxy,
                            config,
                            command_tx,
                            command_rx,
                            start_menu_id,
                            exit_menu_id,
                            triggers: Arc::new(TriggerCache::new()),
                            session: None,
                        };

                        if let Err(e) = app.run().await {
                            error!(error = ?e, "App error");
                        }
                    });
                });
            }
            _ => {}
        }
    });
}
