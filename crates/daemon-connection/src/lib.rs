//! Persistent WebSocket channel to the sync daemon.
//!
//! The agent opens exactly one connection for its lifetime, identified by
//! a static `client_id` header. Inbound frames are queued in order for the
//! dispatcher; outbound frames funnel through a clonable sender that is
//! safe under concurrent use. There is no reconnect: once the channel
//! closes or errors, the inbound queue closes and the agent treats that
//! as fatal.

mod client;
mod pumps;

pub use client::{ConnectionError, DaemonClient, MessageSender};
