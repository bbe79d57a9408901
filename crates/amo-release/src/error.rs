//! Errors surfaced to the release host.

use amo_api_client::ApiError;
use amo_core::{ConfigError, ErrorMetadata, LogLevel};
use std::io;
use std::path::PathBuf;

pub type ReleaseResult<T> = Result<T, ReleaseError>;

#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("The add-on directory is not found at {}.", path.display())]
    AddonDirNotFound { path: PathBuf },

    #[error("manifest.json is not found at {}.", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("An invalid manifest was read from {}.", path.display())]
    InvalidManifest { path: PathBuf, details: String },

    #[error("The path template {template:?} could not be rendered.")]
    InvalidTemplate { template: String, details: String },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to archive {}: {details}", path.display())]
    Archive { path: PathBuf, details: String },

    #[error("git archive failed: {details}")]
    GitArchive { details: String },

    /// Several pre-flight checks failed
    #[error("{} conditions are not met.", .0.len())]
    Aggregate(Vec<ReleaseError>),
}

impl ReleaseError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReleaseError::Io {
            path: path.into(),
            source,
        }
    }

    /// Flatten into the individual errors the host should report.
    pub fn errors(&self) -> Vec<&ReleaseError> {
        match self {
            ReleaseError::Aggregate(errors) => errors.iter().flat_map(|e| e.errors()).collect(),
            other => vec![other],
        }
    }
}

impl ErrorMetadata for ReleaseError {
    fn error_code(&self) -> &'static str {
        match self {
            ReleaseError::Config(err) => err.error_code(),
            ReleaseError::AddonDirNotFound { .. } => "EADDONDIRNOTFOUND",
            ReleaseError::ManifestNotFound { .. } => "EMANIFESTJSONNOTFOUND",
            ReleaseError::InvalidManifest { .. } => "EINVALIDMANIFEST",
            ReleaseError::InvalidTemplate { .. } => "EINVALIDTEMPLATE",
            ReleaseError::Api(err) => err.error_code(),
            ReleaseError::Io { .. } => "EIO",
            ReleaseError::Archive { .. } => "EARCHIVE",
            ReleaseError::GitArchive { .. } => "EGITARCHIVE",
            ReleaseError::Aggregate(_) => "EAGGREGATE",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ReleaseError::Config(err) => err.details(),
            ReleaseError::InvalidManifest { details, .. }
            | ReleaseError::InvalidTemplate { details, .. } => Some(details.clone()),
            ReleaseError::Api(err) => err.details(),
            ReleaseError::Aggregate(errors) => Some(
                errors
                    .iter()
                    .map(|e| format!("{}: {}", e.error_code(), e))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            _ => None,
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            ReleaseError::Config(err) => err.log_level(),
            ReleaseError::Api(err) => err.log_level(),
            ReleaseError::AddonDirNotFound { .. }
            | ReleaseError::ManifestNotFound { .. }
            | ReleaseError::InvalidManifest { .. }
            | ReleaseError::InvalidTemplate { .. }
            | ReleaseError::Aggregate(_) => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}
