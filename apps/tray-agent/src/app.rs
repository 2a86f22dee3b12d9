//! Application orchestrator: wires connection, cache, dispatcher and tray.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use synctray_daemon_connection::{DaemonClient, MessageSender};
use synctray_image_cache::ImageCache;
use synctray_tray::{MenuAction, TrayEvent, TrayHandle, run_ui_loop};

use crate::backend::LoggingBackend;
use crate::config::Config;
use crate::{dispatch, emit};

/// Indicator icon fetched at startup.
const DEFAULT_TRAY_ICON: &str = "/images/tray/tray.png";

/// How often the main loop polls for tray click events.
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the agent. Returns only on a startup failure; both shutdown paths
/// terminate the process directly.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let cache_dir = std::env::temp_dir().join(format!("synctray-{}", std::process::id()));
    let cache = Arc::new(ImageCache::new(
        config.asset_base_url.clone(),
        cache_dir,
    )?);

    let (client, inbound) = DaemonClient::connect(&config.daemon_url, &config.client_id).await?;
    let sender = client.sender();
    info!(url = %config.daemon_url, "connected to sync daemon");

    // UI-affine thread: sole owner of menu state and widget calls. The
    // event sender half goes to the indicator binding; it stays unused
    // when running with the logging backend.
    let (tray, _event_tx, update_rx) = TrayHandle::new();
    let _ui_thread = std::thread::spawn(move || {
        let mut backend = LoggingBackend;
        run_ui_loop(update_rx, &mut backend);
    });

    // Baseline menu and indicator icon before any daemon command arrives.
    let updates = tray.updates();
    updates.initialize_default_menu();
    match cache.resolve(DEFAULT_TRAY_ICON).await {
        Ok(path) => updates.set_icon(path),
        Err(e) => warn!("default tray icon unavailable: {e}"),
    }

    let mut dispatcher = tokio::spawn(dispatch::dispatch_loop(
        inbound,
        Arc::clone(&cache),
        tray.updates(),
        sender.clone(),
    ));

    info!("tray agent ready");

    let mut poll = tokio::time::interval(EVENT_POLL_INTERVAL);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("SIGINT received, shutting down");
                let _ = sender.send_action(&emit::action_for(&MenuAction::Quit)).await;
                graceful_exit(&tray, config.exit_grace_secs).await;
            }

            _ = &mut dispatcher => {
                // Inbound queue closed: the daemon is gone. No retry.
                error!("connection to sync daemon lost");
                std::process::exit(1);
            }

            _ = poll.tick() => {
                while let Some(TrayEvent::MenuClicked(action)) = tray.try_recv_event() {
                    handle_click(&sender, &tray, config.exit_grace_secs, action).await;
                }
            }
        }
    }
}

/// Relays one menu click to the daemon; quit also ends the process.
async fn handle_click(
    sender: &MessageSender,
    tray: &TrayHandle,
    grace_secs: u64,
    action: MenuAction,
) {
    info!(?action, "menu item clicked");
    let outbound = emit::action_for(&action);
    if let Err(e) = sender.send_action(&outbound).await {
        warn!("failed to send action: {e}");
    }

    if action == MenuAction::Quit {
        graceful_exit(tray, grace_secs).await;
    }
}

/// Graceful termination: give the write pump time to flush the quit
/// frame, stop the UI loop, exit cleanly.
async fn graceful_exit(tray: &TrayHandle, grace_secs: u64) -> ! {
    tokio::time::sleep(Duration::from_secs(grace_secs)).await;
    tray.updates().shutdown();
    std::process::exit(0);
}
