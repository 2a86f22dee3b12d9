//! Context menu model.

/// Actions that can be triggered from the tray context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// "New sync folder" clicked.
    NewSyncFolder,
    /// "Preferences" clicked.
    Preferences,
    /// "Donate" clicked.
    Donate,
    /// "Website" clicked.
    Website,
    /// "Exit" clicked.
    Quit,
    /// A folder entry clicked; carries the folder's literal path.
    Folder(String),
}

/// A sync folder row in the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    /// Absolute folder path.
    pub path: String,
    /// Sync status shown next to the folder name.
    pub status: String,
}

/// A single menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Display text. Empty for separators.
    pub label: String,
    /// Whether the item is enabled (clickable).
    pub enabled: bool,
    /// Action triggered on click, if any.
    pub action: Option<MenuAction>,
}

impl MenuItem {
    fn label(text: impl Into<String>) -> Self {
        Self {
            label: text.into(),
            enabled: false,
            action: None,
        }
    }

    fn action(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            enabled: true,
            action: Some(action),
        }
    }

    /// A separator row.
    pub fn separator() -> Self {
        Self {
            label: String::new(),
            enabled: false,
            action: None,
        }
    }

    /// Returns `true` if this item is a separator.
    pub fn is_separator(&self) -> bool {
        self.label.is_empty() && self.action.is_none()
    }
}

/// Current state used to build the context menu.
///
/// Owned exclusively by the UI loop; see [`crate::run_ui_loop`].
#[derive(Debug, Clone)]
pub struct MenuState {
    /// Status line shown at the top of the menu.
    pub status_text: String,
    /// Folder rows, in the order the daemon sent them.
    pub folders: Vec<FolderEntry>,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            status_text: "Synced".into(),
            folders: Vec::new(),
        }
    }
}

impl MenuState {
    /// Builds the full menu from the current state.
    ///
    /// The structure is fixed: status line, separator, the two global
    /// actions, separator, one row per folder (plus a trailing separator
    /// only when at least one folder exists), the footer actions,
    /// separator, exit.
    pub fn build_menu(&self) -> Vec<MenuItem> {
        let mut items = vec![
            MenuItem::label(&self.status_text),
            MenuItem::separator(),
            MenuItem::action("New sync folder", MenuAction::NewSyncFolder),
            MenuItem::action("Preferences", MenuAction::Preferences),
            MenuItem::separator(),
        ];

        for folder in &self.folders {
            items.push(MenuItem::action(
                format!("{}({})", base_name(&folder.path), folder.status),
                MenuAction::Folder(folder.path.clone()),
            ));
        }
        if !self.folders.is_empty() {
            items.push(MenuItem::separator());
        }

        items.push(MenuItem::action("Donate", MenuAction::Donate));
        items.push(MenuItem::action("Website", MenuAction::Website));
        items.push(MenuItem::separator());
        items.push(MenuItem::action("Exit", MenuAction::Quit));

        items
    }
}

/// Last path component, tolerant of both separator styles.
fn base_name(path: &str) -> &str {
    path.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path)
}
