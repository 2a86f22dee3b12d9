//! Wire protocol for the tray agent's channel to the sync daemon.
//!
//! Inbound frames are JSON objects tagged by an `action` field; the daemon
//! drives the tray with four state-update commands. Outbound frames carry
//! user interactions back to the daemon. Both directions are plain text
//! WebSocket frames, one JSON document per frame.

pub mod actions;
pub mod commands;
pub mod types;

pub use actions::TrayAction;
pub use commands::{ProtocolError, TrayCommand, parse_command};
pub use types::Folder;
