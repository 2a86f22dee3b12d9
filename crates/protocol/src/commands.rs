//! Inbound state-update commands from the daemon.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::types::Folder;

/// Action tags the agent understands. Anything else is reported as
/// [`ProtocolError::UnrecognizedAction`] instead of being dropped silently.
const KNOWN_ACTIONS: &[&str] = &[
    "display_notification",
    "update_tray_menu",
    "update_tray_icon",
    "update_tray_status_text",
];

/// A decoded state-update command.
///
/// The wire tag is the `action` field; payload fields sit beside it in the
/// same JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TrayCommand {
    /// Show a desktop notification. An empty `image` means the agent
    /// substitutes its default logo; a non-empty value is a local path
    /// supplied by the daemon and used as-is.
    DisplayNotification {
        summary: String,
        body: String,
        #[serde(default)]
        image: String,
    },
    /// Replace the folder snapshot and rebuild the context menu.
    UpdateTrayMenu {
        #[serde(deserialize_with = "folders_in_order")]
        folders: Vec<Folder>,
    },
    /// Swap the indicator icon to a fetched asset.
    UpdateTrayIcon {
        #[serde(rename = "imageFileName")]
        image_file_name: String,
    },
    /// Update the status line without rebuilding the menu.
    UpdateTrayStatusText { text: String },
}

/// Errors from decoding an inbound frame.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("frame has no action field")]
    MissingAction,

    #[error("unrecognized action '{0}'")]
    UnrecognizedAction(String),

    #[error("invalid payload for action '{action}': {source}")]
    InvalidPayload {
        action: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct ActionProbe {
    action: Option<String>,
}

/// Decodes one inbound frame into a [`TrayCommand`].
///
/// The action tag is probed first so an unknown tag yields a distinct
/// error from a known tag with a broken payload.
pub fn parse_command(frame: &str) -> Result<TrayCommand, ProtocolError> {
    let probe: ActionProbe =
        serde_json::from_str(frame).map_err(ProtocolError::Malformed)?;
    let action = probe.action.ok_or(ProtocolError::MissingAction)?;

    if !KNOWN_ACTIONS.contains(&action.as_str()) {
        return Err(ProtocolError::UnrecognizedAction(action));
    }

    serde_json::from_str(frame)
        .map_err(|source| ProtocolError::InvalidPayload { action, source })
}

/// Deserializes the `folders` map keeping document order.
///
/// The daemon keys folders by an opaque id; only the values matter to the
/// menu, but their arrival order must survive, so the map is walked
/// entry-by-entry instead of going through an unordered collection.
fn folders_in_order<'de, D>(deserializer: D) -> Result<Vec<Folder>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FoldersVisitor;

    impl<'de> Visitor<'de> for FoldersVisitor {
        type Value = Vec<Folder>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of folder ids to folder entries")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut folders = Vec::new();
            while let Some((_, folder)) = map.next_entry::<String, Folder>()? {
                folders.push(folder);
            }
            Ok(folders)
        }
    }

    deserializer.deserialize_map(FoldersVisitor)
}
