//! Scripted `AddonsApi` for testing without HTTP
//!
//! Every call is recorded with the (possibly paused) tokio clock so tests
//! can assert on ordering and spacing.

use amo_core::{Channel, ReleaseLogger, Upload, Version};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

use crate::api::{AddonsApi, CreateVersionRequest};
use crate::error::{ApiError, ApiResult};

/// Scripted answer to `get_upload`
#[derive(Debug, Clone)]
pub enum PollResponse {
    Upload(Upload),
    /// Non-2xx status with a JSON body
    Status(u16, JsonValue),
}

#[derive(Debug, Clone)]
pub enum ApiCall {
    CreateUpload {
        addon_zip: PathBuf,
        channel: Channel,
    },
    GetUpload {
        uuid: String,
    },
    CreateVersion {
        addon_id: String,
        request: CreateVersionRequest,
    },
    PatchVersionSource {
        addon_id: String,
        version_id: u64,
        source_zip: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct CallRecord {
    pub call: ApiCall,
    pub at: Instant,
}

/// Mock add-on API
///
/// Poll responses are served in order; the last one repeats forever.
#[derive(Clone)]
pub struct MockAddonsApi {
    created_upload: Upload,
    polls: Arc<Mutex<VecDeque<PollResponse>>>,
    version_id: u64,
    create_upload_failure: Option<(u16, JsonValue)>,
    create_version_failure: Option<(u16, JsonValue)>,
    calls: Arc<Mutex<Vec<CallRecord>>>,
}

impl MockAddonsApi {
    pub fn new(created_upload: Upload, polls: Vec<PollResponse>, version_id: u64) -> Self {
        Self {
            created_upload,
            polls: Arc::new(Mutex::new(polls.into())),
            version_id,
            create_upload_failure: None,
            create_version_failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer `create_upload` with a non-2xx status
    pub fn with_create_upload_failure(mut self, status: u16, body: JsonValue) -> Self {
        self.create_upload_failure = Some((status, body));
        self
    }

    /// Answer `create_version` with a non-2xx status
    pub fn with_create_version_failure(mut self, status: u16, body: JsonValue) -> Self {
        self.create_version_failure = Some((status, body));
        self
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().unwrap().clone()
    }

    pub fn poll_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|record| matches!(record.call, ApiCall::GetUpload { .. }))
            .count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(CallRecord {
            call,
            at: Instant::now(),
        });
    }

    fn next_poll(&self) -> PollResponse {
        let mut polls = self.polls.lock().unwrap();
        if polls.len() > 1 {
            polls.pop_front().unwrap()
        } else {
            polls.front().cloned().expect("no poll responses scripted")
        }
    }

    fn url(path: &str) -> String {
        format!("https://addons.mozilla.org/api/v5/addons/{}", path)
    }
}

#[async_trait]
impl AddonsApi for MockAddonsApi {
    async fn create_upload(&self, addon_zip: &Path, channel: Channel) -> ApiResult<Upload> {
        self.record(ApiCall::CreateUpload {
            addon_zip: addon_zip.to_path_buf(),
            channel,
        });
        if let Some((status, body)) = &self.create_upload_failure {
            return Err(ApiError::bad_response(Self::url("upload/"), *status, body));
        }
        Ok(self.created_upload.clone())
    }

    async fn get_upload(&self, uuid: &str) -> ApiResult<Upload> {
        self.record(ApiCall::GetUpload {
            uuid: uuid.to_string(),
        });
        match self.next_poll() {
            PollResponse::Upload(upload) => Ok(upload),
            PollResponse::Status(status, body) => Err(ApiError::bad_response(
                Self::url(&format!("upload/{}/", uuid)),
                status,
                &body,
            )),
        }
    }

    async fn create_version(
        &self,
        addon_id: &str,
        request: &CreateVersionRequest,
    ) -> ApiResult<Version> {
        self.record(ApiCall::CreateVersion {
            addon_id: addon_id.to_string(),
            request: request.clone(),
        });
        if let Some((status, body)) = &self.create_version_failure {
            return Err(ApiError::bad_response(
                Self::url(&format!("addon/{}/versions/", addon_id)),
                *status,
                body,
            ));
        }
        Ok(Version {
            id: self.version_id,
        })
    }

    async fn patch_version_source(
        &self,
        addon_id: &str,
        version_id: u64,
        source_zip: &Path,
    ) -> ApiResult<Version> {
        self.record(ApiCall::PatchVersionSource {
            addon_id: addon_id.to_string(),
            version_id,
            source_zip: source_zip.to_path_buf(),
        });
        Ok(Version { id: version_id })
    }
}

/// Logger that keeps every message in order
#[derive(Default)]
pub struct RecordingLogger {
    messages: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ReleaseLogger for RecordingLogger {
    fn log(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}
