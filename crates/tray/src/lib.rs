//! Tray menu model and UI-affine update loop.
//!
//! All renderable state (status text, folder list, menu structure) is
//! owned by a single loop running on the UI thread. Other threads never
//! touch that state; they post [`TrayUpdate`] messages instead, and user
//! clicks travel back as [`TrayEvent`] messages:
//! - [`TrayUpdate`]: state changes from the agent core to the UI thread
//! - [`TrayEvent`]: user interactions from the UI thread to the agent core
//!
//! The OS indicator, menu widgets, and notification service sit behind the
//! [`TrayBackend`] trait; this crate carries no GUI dependency.

mod menu;
mod ui;

pub use menu::{FolderEntry, MenuAction, MenuItem, MenuState};
pub use ui::{TrayBackend, TrayEvent, TrayHandle, TrayUpdate, TrayUpdates, run_ui_loop};
