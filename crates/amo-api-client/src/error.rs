//! Error taxonomy of the request layer and the upload workflow.

use amo_core::{ErrorMetadata, LogLevel};
use std::io;
use std::path::PathBuf;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx status, or a body that does not match the expected shape
    #[error("A bad response was received from {url} with status {status}.")]
    BadResponse {
        url: String,
        status: u16,
        body: String,
    },

    /// The upload was processed and rejected by the service
    #[error("Validation failed.")]
    ValidationFailure { report: String },

    #[error("Validation timed out.")]
    ValidationTimeout,

    /// Network failure, propagated unchanged
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Failed to sign the API token: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),

    #[error("Failed to encode the request body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid request URL {url}: {details}")]
    InvalidUrl { url: String, details: String },

    #[error("Failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ApiError {
    pub fn bad_response(url: impl Into<String>, status: u16, body: &serde_json::Value) -> Self {
        ApiError::BadResponse {
            url: url.into(),
            status,
            body: inspect(body),
        }
    }
}

/// Render a JSON value on a single line with no depth limit.
pub fn inspect(value: &serde_json::Value) -> String {
    value.to_string()
}

impl ErrorMetadata for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadResponse { .. } => "EBADRESPONSE",
            ApiError::ValidationFailure { .. } => "EVALIDATIONFAILURE",
            ApiError::ValidationTimeout => "EVALIDATIONTIMEOUT",
            ApiError::Transport(_) => "ETRANSPORT",
            ApiError::TokenSigning(_) => "ETOKENSIGNING",
            ApiError::Serialization(_) => "ESERIALIZATION",
            ApiError::InvalidUrl { .. } => "EINVALIDURL",
            ApiError::File { .. } => "EIO",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::BadResponse { body, .. } => Some(body.clone()),
            ApiError::ValidationFailure { report } => Some(report.clone()),
            _ => None,
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            ApiError::ValidationFailure { .. } | ApiError::InvalidUrl { .. } => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}
