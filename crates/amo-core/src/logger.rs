//! Logger capability
//!
//! User-facing progress messages are not written to a global logger. The
//! host hands a `ReleaseLogger` to each lifecycle call and the workflow
//! reports through it.

/// Progress and warning sink provided by the release host
pub trait ReleaseLogger: Send + Sync {
    /// Report normal progress
    fn log(&self, message: &str);

    /// Report a non-fatal problem
    fn warn(&self, message: &str);
}

/// Forwards messages to `tracing` under the `amo_release` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ReleaseLogger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!(target: "amo_release", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "amo_release", "{}", message);
    }
}
