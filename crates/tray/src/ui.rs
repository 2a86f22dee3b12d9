//! UI-affine update loop and its channel interface.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use tracing::debug;

use crate::menu::{FolderEntry, MenuAction, MenuItem, MenuState};

/// A state change posted to the UI thread.
#[derive(Debug, Clone)]
pub enum TrayUpdate {
    /// Show a desktop notification with a fully-resolved icon path.
    Notify {
        summary: String,
        body: String,
        icon: PathBuf,
    },
    /// Swap the indicator icon.
    SetIcon(PathBuf),
    /// Update the status line in place; the menu is not rebuilt.
    SetStatusText(String),
    /// Replace the folder snapshot and rebuild the menu.
    SetFolders(Vec<FolderEntry>),
    /// Stop the UI loop.
    Shutdown,
}

/// A user interaction reported by the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayEvent {
    /// A menu item was clicked.
    MenuClicked(MenuAction),
}

/// Rendering boundary implemented by the OS indicator binding.
///
/// Every method is called only from the UI loop's thread.
pub trait TrayBackend {
    /// Replaces the whole context menu.
    fn set_menu(&mut self, items: &[MenuItem]);
    /// Updates the status row's label without rebuilding the menu.
    fn set_status_label(&mut self, text: &str);
    /// Updates the indicator icon.
    fn set_icon(&mut self, path: &Path);
    /// Shows a desktop notification.
    fn show_notification(&mut self, summary: &str, body: &str, icon: &Path);
}

/// Clonable update side of the tray channel. Safe to use from any thread.
#[derive(Debug, Clone)]
pub struct TrayUpdates {
    update_tx: mpsc::Sender<TrayUpdate>,
}

impl TrayUpdates {
    /// Queues a desktop notification.
    pub fn notify(&self, summary: String, body: String, icon: PathBuf) {
        let _ = self.update_tx.send(TrayUpdate::Notify {
            summary,
            body,
            icon,
        });
    }

    /// Queues an indicator icon change.
    pub fn set_icon(&self, path: PathBuf) {
        let _ = self.update_tx.send(TrayUpdate::SetIcon(path));
    }

    /// Queues a status line change.
    pub fn set_status_text(&self, text: String) {
        let _ = self.update_tx.send(TrayUpdate::SetStatusText(text));
    }

    /// Queues a wholesale folder snapshot replacement.
    pub fn set_folders(&self, folders: Vec<FolderEntry>) {
        let _ = self.update_tx.send(TrayUpdate::SetFolders(folders));
    }

    /// Queues the baseline menu build: default status, no folders.
    /// Called once at startup before any daemon command arrives.
    pub fn initialize_default_menu(&self) {
        self.set_folders(Vec::new());
    }

    /// Asks the UI loop to stop.
    pub fn shutdown(&self) {
        let _ = self.update_tx.send(TrayUpdate::Shutdown);
    }
}

/// Handle held by the agent core: update side plus the event receiver.
pub struct TrayHandle {
    updates: TrayUpdates,
    event_rx: mpsc::Receiver<TrayEvent>,
}

impl TrayHandle {
    /// Creates the tray channel pair.
    ///
    /// Returns `(handle, event_sender, update_receiver)`. The sender and
    /// receiver go to the UI thread: the receiver feeds [`run_ui_loop`],
    /// the sender is wired into the backend's click callbacks.
    pub fn new() -> (Self, mpsc::Sender<TrayEvent>, mpsc::Receiver<TrayUpdate>) {
        let (update_tx, update_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let handle = Self {
            updates: TrayUpdates { update_tx },
            event_rx,
        };
        (handle, event_tx, update_rx)
    }

    /// Returns a clonable update sender for use from other tasks.
    pub fn updates(&self) -> TrayUpdates {
        self.updates.clone()
    }

    /// Tries to receive a tray event (non-blocking).
    pub fn try_recv_event(&self) -> Option<TrayEvent> {
        self.event_rx.try_recv().ok()
    }
}

/// Runs the UI-affine loop until [`TrayUpdate::Shutdown`] or until every
/// update sender is gone.
///
/// This loop is the sole owner of the [`MenuState`]; each update is
/// applied to the state and rendered through the backend within a single
/// iteration, so no other thread can ever observe a partially rebuilt
/// menu.
pub fn run_ui_loop<B: TrayBackend>(update_rx: mpsc::Receiver<TrayUpdate>, backend: &mut B) {
    let mut state = MenuState::default();

    while let Ok(update) = update_rx.recv() {
        match update {
            TrayUpdate::Notify {
                summary,
                body,
                icon,
            } => backend.show_notification(&summary, &body, &icon),
            TrayUpdate::SetIcon(path) => backend.set_icon(&path),
            TrayUpdate::SetStatusText(text) => {
                state.status_text = text;
                backend.set_status_label(&state.status_text);
            }
            TrayUpdate::SetFolders(folders) => {
                state.folders = folders;
                backend.set_menu(&state.build_menu());
            }
            TrayUpdate::Shutdown => {
                debug!("tray UI loop shutting down");
                break;
            }
        }
    }
}
