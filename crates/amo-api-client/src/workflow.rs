//! Upload workflow
//!
//! Upload the add-on archive, wait for the service to validate it, create a
//! version from the accepted upload and optionally attach a source archive.
//! Steps run strictly in order and stop at the first failure.

use amo_core::{Application, Channel, ReleaseLogger, Upload, Version};
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{AddonsApi, CreateVersionRequest};
use crate::error::{inspect, ApiError, ApiResult};

/// Delay between two upload status fetches
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Budget for the whole validation poll, starting with the first fetch
pub const VALIDATION_TIMEOUT: Duration = Duration::from_millis(300_000);

/// Inputs of `update_addon`
#[derive(Debug, Clone)]
pub struct UpdateAddonParams {
    pub addon_id: String,
    pub addon_zip_path: PathBuf,
    pub channel: Channel,
    pub approval_notes: Option<String>,
    pub compatibility: Vec<Application>,
    /// Rendered HTML, submitted under `en-US`
    pub release_notes: Option<String>,
    pub source_zip_path: Option<PathBuf>,
}

/// Outcome of observing one upload status
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    Pending,
    Succeeded,
    Failed { report: String },
}

impl PollState {
    pub fn observe(upload: &Upload) -> Self {
        if !upload.processed {
            PollState::Pending
        } else if upload.is_accepted() {
            PollState::Succeeded
        } else {
            PollState::Failed {
                report: upload
                    .validation
                    .as_ref()
                    .map(inspect)
                    .unwrap_or_else(|| "null".to_string()),
            }
        }
    }
}

async fn poll_until_processed(api: &dyn AddonsApi, uuid: &str) -> ApiResult<()> {
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        let upload = api.get_upload(uuid).await?;

        match PollState::observe(&upload) {
            PollState::Pending => {
                tracing::debug!(upload_id = %uuid, attempt, "Upload not processed yet");
                tokio::time::sleep(POLL_INTERVAL).await;
            }
            PollState::Succeeded => {
                tracing::info!(upload_id = %uuid, attempt, "Upload passed validation");
                return Ok(());
            }
            PollState::Failed { report } => {
                tracing::warn!(upload_id = %uuid, attempt, "Upload failed validation");
                return Err(ApiError::ValidationFailure { report });
            }
        }
    }
}

/// Poll an upload until it is processed.
///
/// The first fetch is immediate. A fetch error ends the wait at once. When
/// `VALIDATION_TIMEOUT` elapses first, the pending fetch or delay is
/// dropped and `ApiError::ValidationTimeout` is returned.
pub async fn await_validation(api: &dyn AddonsApi, uuid: &str) -> ApiResult<()> {
    match tokio::time::timeout(VALIDATION_TIMEOUT, poll_until_processed(api, uuid)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(upload_id = %uuid, "Timed out waiting for validation");
            Err(ApiError::ValidationTimeout)
        }
    }
}

/// Publish a new version of an add-on.
pub async fn update_addon(
    api: &dyn AddonsApi,
    params: &UpdateAddonParams,
    logger: &dyn ReleaseLogger,
) -> ApiResult<Version> {
    logger.log("Uploading the add-on...");
    let upload = api
        .create_upload(&params.addon_zip_path, params.channel)
        .await?;
    tracing::info!(upload_id = %upload.uuid, channel = %params.channel, "Upload created");

    logger.log("Waiting for validation...");
    await_validation(api, &upload.uuid).await?;

    logger.log("Creating a version...");
    let request = CreateVersionRequest::new(upload.uuid.clone(), params.compatibility.clone())
        .with_approval_notes(params.approval_notes.clone())
        .with_release_notes(params.release_notes.clone());
    let version = api.create_version(&params.addon_id, &request).await?;
    tracing::info!(addon_id = %params.addon_id, version_id = version.id, "Version created");

    if let Some(source_zip_path) = &params.source_zip_path {
        logger.log("Uploading the source code...");
        api.patch_version_source(&params.addon_id, version.id, source_zip_path)
            .await?;
        tracing::info!(version_id = version.id, "Source code attached");
    }

    Ok(version)
}
