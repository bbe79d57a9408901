//! Error types module
//!
//! Every error surfaced to the release host carries a machine-readable code
//! (e.g. `EBADRESPONSE`), a short message and an optional details blob. The
//! `ErrorMetadata` trait lets each crate's error enum self-describe those
//! properties so the host adapter can report them uniformly.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for problems the user can fix (configuration, manifest)
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error reporting - defines how an error should be presented
/// to the release host.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "EBADRESPONSE")
    fn error_code(&self) -> &'static str;

    /// Structured diagnostic detail suitable for logging
    fn details(&self) -> Option<String>;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Pre-flight configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("The plugin configuration is invalid.")]
    InvalidPluginConfig { details: String },

    #[error("The environment variables are invalid.")]
    InvalidEnv { details: String },
}

impl ErrorMetadata for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidPluginConfig { .. } => "EINVALIDPLUGINCONFIG",
            ConfigError::InvalidEnv { .. } => "EINVALIDENV",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ConfigError::InvalidPluginConfig { details } | ConfigError::InvalidEnv { details } => {
                Some(details.clone())
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Warn
    }
}
