//! Structured logging with a fail-fast diagnostic stream.

use std::io::{self, Write};

use tracing_subscriber::EnvFilter;

/// Wraps stdout for the subscriber. The daemon supervises this process
/// through its stdout pipe; a write failure means the supervisor is gone,
/// so the agent dies on the spot without trying to log the failure
/// through the very stream that just broke.
pub struct FailFastStdout(io::Stdout);

impl Write for FailFastStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.write(buf) {
            Ok(n) => Ok(n),
            Err(_) => std::process::abort(),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.flush() {
            Ok(()) => Ok(()),
            Err(_) => std::process::abort(),
        }
    }
}

/// Initializes the global subscriber. One line per event, `info` unless
/// overridden from the environment.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(|| FailFastStdout(io::stdout()))
        .init();
}
