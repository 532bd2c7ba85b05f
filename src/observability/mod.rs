//! Observability module for the Auth0 client.
//!
//! Operations emit `tracing` spans and events; this module configures the
//! subscriber and keeps credentials out of anything that gets logged.

mod logging;

pub use logging::{init_tracing, redact, LogConfig, LogLevel};

use std::time::{Duration, Instant};

/// Request timer for measuring operation duration.
#[derive(Debug)]
pub struct RequestTimer {
    start: Instant,
    operation: &'static str,
}

impl RequestTimer {
    /// Starts timing `operation`.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Returns the elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns the operation name.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Logs completion of the operation with its outcome.
    pub fn finish(self, success: bool) {
        let elapsed_ms = u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX);
        if success {
            tracing::debug!(operation = self.operation, elapsed_ms, "Operation succeeded");
        } else {
            tracing::warn!(operation = self.operation, elapsed_ms, "Operation failed");
        }
    }
}
