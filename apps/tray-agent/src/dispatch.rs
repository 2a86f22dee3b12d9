//! Inbound command dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use synctray_daemon_connection::MessageSender;
use synctray_image_cache::{CacheError, ImageCache};
use synctray_protocol::{ProtocolError, TrayAction, TrayCommand, parse_command};
use synctray_tray::{FolderEntry, TrayUpdates};

/// Identifier fetched when a notification arrives with an empty image
/// field.
const DEFAULT_NOTIFICATION_IMAGE: &str = "/logo48.png";

/// Errors contained within a single frame's handling.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("asset fetch failed: {0}")]
    Asset(#[from] CacheError),
}

/// Consumes inbound frames until the connection closes.
///
/// A bad frame is logged and the loop keeps going; only the inbound queue
/// closing — the transport-fatal case — ends it. Handler replies, when
/// they exist, are forwarded to the daemon.
pub async fn dispatch_loop(
    mut inbound: mpsc::Receiver<String>,
    cache: Arc<ImageCache>,
    tray: TrayUpdates,
    sender: MessageSender,
) {
    while let Some(frame) = inbound.recv().await {
        debug!(%frame, "received request");
        match handle_frame(&frame, &cache, &tray).await {
            Ok(Some(reply)) => {
                if let Err(e) = sender.send_action(&reply).await {
                    warn!("failed to send reply: {e}");
                }
            }
            Ok(None) => {}
            Err(e) => warn!("failed to handle frame: {e}"),
        }
    }
}

/// Routes one frame to its handler.
///
/// All current handlers complete without a reply; the return type leaves
/// room for an acknowledgement extension.
pub async fn handle_frame(
    frame: &str,
    cache: &ImageCache,
    tray: &TrayUpdates,
) -> Result<Option<TrayAction>, DispatchError> {
    match parse_command(frame)? {
        TrayCommand::DisplayNotification {
            summary,
            body,
            image,
        } => {
            // An empty image means "use the default logo"; a non-empty
            // value is a local path the daemon already resolved.
            let icon = if image.is_empty() {
                cache.resolve(DEFAULT_NOTIFICATION_IMAGE).await?
            } else {
                PathBuf::from(image)
            };
            tray.notify(summary, body, icon);
            Ok(None)
        }
        TrayCommand::UpdateTrayIcon { image_file_name } => {
            let path = cache.resolve(&image_file_name).await?;
            tray.set_icon(path);
            Ok(None)
        }
        TrayCommand::UpdateTrayStatusText { text } => {
            tray.set_status_text(text);
            Ok(None)
        }
        TrayCommand::UpdateTrayMenu { folders } => {
            tray.set_folders(
                folders
                    .into_iter()
                    .map(|f| FolderEntry {
                        path: f.path,
                        status: f.status,
                    })
                    .collect(),
            );
            Ok(None)
        }
    }
}
