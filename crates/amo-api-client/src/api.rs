//! Add-on API endpoints.

use amo_core::{Application, Channel, Upload, Version};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio_util::io::ReaderStream;

use crate::error::{ApiError, ApiResult};
use crate::schema::{UPLOAD_SHAPE, VERSION_SHAPE};
use crate::{ApiClient, RequestBody};

/// Locale key under which release notes are submitted
pub const RELEASE_NOTES_LOCALE: &str = "en-US";

/// Body of `POST addon/{addonId}/versions/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateVersionRequest {
    /// UUID of a processed, valid upload
    pub upload: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_notes: Option<String>,
    pub compatibility: Vec<Application>,
    /// Locale → HTML
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<BTreeMap<String, String>>,
}

impl CreateVersionRequest {
    pub fn new(upload: impl Into<String>, compatibility: Vec<Application>) -> Self {
        Self {
            upload: upload.into(),
            approval_notes: None,
            compatibility,
            release_notes: None,
        }
    }

    pub fn with_approval_notes(mut self, notes: Option<String>) -> Self {
        self.approval_notes = notes;
        self
    }

    pub fn with_release_notes(mut self, notes: Option<String>) -> Self {
        self.release_notes = notes.map(|html| {
            let mut by_locale = BTreeMap::new();
            by_locale.insert(RELEASE_NOTES_LOCALE.to_string(), html);
            by_locale
        });
        self
    }
}

/// Operations the upload workflow needs from the service.
#[async_trait]
pub trait AddonsApi: Send + Sync {
    /// `POST upload/`
    async fn create_upload(&self, addon_zip: &Path, channel: Channel) -> ApiResult<Upload>;

    /// `GET upload/{uuid}/`
    async fn get_upload(&self, uuid: &str) -> ApiResult<Upload>;

    /// `POST addon/{addonId}/versions/`
    async fn create_version(
        &self,
        addon_id: &str,
        request: &CreateVersionRequest,
    ) -> ApiResult<Version>;

    /// `PATCH addon/{addonId}/versions/{id}/` with a source archive
    async fn patch_version_source(
        &self,
        addon_id: &str,
        version_id: u64,
        source_zip: &Path,
    ) -> ApiResult<Version>;
}

/// Multipart part that streams a zip file from disk.
async fn zip_part(path: &Path) -> ApiResult<Part> {
    let file_error = |source| ApiError::File {
        path: path.to_path_buf(),
        source,
    };

    let file = tokio::fs::File::open(path).await.map_err(file_error)?;
    let length = file.metadata().await.map_err(file_error)?.len();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let body = Body::wrap_stream(ReaderStream::new(file));
    Ok(Part::stream_with_length(body, length)
        .file_name(file_name)
        .mime_str("application/zip")?)
}

#[async_trait]
impl AddonsApi for ApiClient {
    async fn create_upload(&self, addon_zip: &Path, channel: Channel) -> ApiResult<Upload> {
        let form = Form::new()
            .part("upload", zip_part(addon_zip).await?)
            .text("channel", channel.as_str());

        self.request(Method::POST, "upload/", RequestBody::Multipart(form), &UPLOAD_SHAPE)
            .await
    }

    async fn get_upload(&self, uuid: &str) -> ApiResult<Upload> {
        self.request(
            Method::GET,
            &format!("upload/{}/", uuid),
            RequestBody::Empty,
            &UPLOAD_SHAPE,
        )
        .await
    }

    async fn create_version(
        &self,
        addon_id: &str,
        request: &CreateVersionRequest,
    ) -> ApiResult<Version> {
        let body = serde_json::to_value(request)?;

        self.request(
            Method::POST,
            &format!("addon/{}/versions/", addon_id),
            RequestBody::Json(body),
            &VERSION_SHAPE,
        )
        .await
    }

    async fn patch_version_source(
        &self,
        addon_id: &str,
        version_id: u64,
        source_zip: &Path,
    ) -> ApiResult<Version> {
        let form = Form::new().part("source", zip_part(source_zip).await?);

        self.request(
            Method::PATCH,
            &format!("addon/{}/versions/{}/", addon_id, version_id),
            RequestBody::Multipart(form),
            &VERSION_SHAPE,
        )
        .await
    }
}
