//! Rendering boundary.
//!
//! The OS indicator binding implements [`TrayBackend`] and forwards menu
//! clicks through the tray event channel. When the agent runs without a
//! binding, this backend logs each render call instead.

use std::path::Path;

use synctray_tray::{MenuItem, TrayBackend};
use tracing::info;

pub struct LoggingBackend;

impl TrayBackend for LoggingBackend {
    fn set_menu(&mut self, items: &[MenuItem]) {
        info!(rows = items.len(), "tray menu rebuilt");
    }

    fn set_status_label(&mut self, text: &str) {
        info!(%text, "status label updated");
    }

    fn set_icon(&mut self, path: &Path) {
        info!(path = %path.display(), "indicator icon updated");
    }

    fn show_notification(&mut self, summary: &str, body: &str, icon: &Path) {
        info!(%summary, %body, icon = %icon.display(), "notification");
    }
}
