//! Outbound user-interaction frames sent to the daemon.

use serde::{Deserialize, Serialize};

/// A user interaction relayed to the daemon.
///
/// Serializes to `{"action": "<name>"}`, plus a `folder` field for
/// folder-scoped clicks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TrayAction {
    TrayMenuClickedNew,
    TrayMenuClickedPreferences,
    TrayMenuClickedDonate,
    TrayMenuClickedWebsite,
    TrayMenuClickedQuit,
    TrayMenuClickedFolder { folder: String },
}
