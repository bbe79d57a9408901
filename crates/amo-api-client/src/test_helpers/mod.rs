//! Test helpers for workflow unit tests
//!
//! This module provides a scripted `AddonsApi` and a logger that records
//! messages, so the upload workflow can be exercised without a server.

pub mod mock_api;

pub use mock_api::{ApiCall, CallRecord, MockAddonsApi, PollResponse, RecordingLogger};

use amo_core::Upload;

/// Upload that has not been processed yet
pub fn pending(uuid: &str) -> Upload {
    Upload {
        uuid: uuid.to_string(),
        processed: false,
        valid: false,
        validation: None,
    }
}

/// Upload the service has finished checking
pub fn processed(uuid: &str, valid: bool, validation: Option<serde_json::Value>) -> Upload {
    Upload {
        uuid: uuid.to_string(),
        processed: true,
        valid,
        validation,
    }
}
