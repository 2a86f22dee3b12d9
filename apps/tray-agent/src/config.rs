//! Agent configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/synctray/agent.toml`
//! - Windows: `%APPDATA%/synctray/agent.toml`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Agent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// WebSocket endpoint of the sync daemon.
    #[serde(default = "default_daemon_url")]
    pub daemon_url: String,

    /// Base URL for image asset fetches.
    #[serde(default = "default_asset_base_url")]
    pub asset_base_url: String,

    /// Role identifier sent in the connection header.
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Seconds to wait after sending the quit action before exiting,
    /// giving the write pump time to flush the frame.
    #[serde(default = "default_exit_grace_secs")]
    pub exit_grace_secs: u64,
}

fn default_daemon_url() -> String {
    "ws://127.0.0.1:8080/api/ws".into()
}

fn default_asset_base_url() -> String {
    "http://127.0.0.1:8080".into()
}

fn default_client_id() -> String {
    "tray-agent".into()
}

fn default_exit_grace_secs() -> u64 {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daemon_url: default_daemon_url(),
            asset_base_url: default_asset_base_url(),
            client_id: default_client_id(),
            exit_grace_secs: default_exit_grace_secs(),
        }
    }
}

impl Config {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("synctray").join("agent.toml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("synctray")
            .join("agent.toml"))
    }
}
