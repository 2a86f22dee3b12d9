use serde::{Deserialize, Serialize};

/// A sync folder snapshot as reported by the daemon.
///
/// The agent never mutates folders; each `update_tray_menu` command
/// replaces the previous snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Absolute path of the folder on the local machine.
    #[serde(rename = "folder")]
    pub path: String,
    /// Human-readable sync status, e.g. "Syncing" or "Up to date".
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_wire_field_names() {
        let json = r#"{"folder":"/home/u/Docs","status":"Syncing"}"#;
        let folder: Folder = serde_json::from_str(json).unwrap();
        assert_eq!(folder.path, "/home/u/Docs");
        assert_eq!(folder.status, "Syncing");
    }

    #[test]
    fn folder_json_roundtrip() {
        let folder = Folder {
            path: "/srv/shared".into(),
            status: "Up to date".into(),
        };
        let json = serde_json::to_string(&folder).unwrap();
        assert!(json.contains("\"folder\":\"/srv/shared\""));
        let parsed: Folder = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, folder);
    }
}
