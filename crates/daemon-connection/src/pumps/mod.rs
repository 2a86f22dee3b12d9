//! Read and write pumps for the daemon connection.
//!
//! The write pump also owns transport keepalive, pinging whenever the
//! outbound queue goes idle.

pub(crate) mod read;
pub(crate) mod write;
