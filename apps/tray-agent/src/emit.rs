//! Turns tray menu clicks into outbound protocol actions.

use synctray_protocol::TrayAction;
use synctray_tray::MenuAction;

/// Maps a menu click to its wire action.
pub fn action_for(click: &MenuAction) -> TrayAction {
    match click {
        MenuAction::NewSyncFolder => TrayAction::TrayMenuClickedNew,
        MenuAction::Preferences => TrayAction::TrayMenuClickedPreferences,
        MenuAction::Donate => TrayAction::TrayMenuClickedDonate,
        MenuAction::Website => TrayAction::TrayMenuClickedWebsite,
        MenuAction::Quit => TrayAction::TrayMenuClickedQuit,
        MenuAction::Folder(path) => TrayAction::TrayMenuClickedFolder {
            folder: path.clone(),
        },
    }
}
