//! HTTP client for the addons.mozilla.org add-on API.
//!
//! Every request is signed with a fresh JWT and sent under the fixed
//! `/api/v5/addons/` prefix. Responses are read as JSON when the service
//! says so and as text otherwise; non-2xx statuses and bodies that do not
//! match the endpoint's shape both surface as `ApiError::BadResponse`.
//!
//! The `workflow` module drives the upload → validate → version sequence on
//! top of the `AddonsApi` trait, which `ApiClient` implements.

pub mod api;
pub mod auth;
pub mod error;
pub mod schema;
pub mod workflow;

#[cfg(test)]
mod test_helpers;

use amo_core::Env;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub use api::{AddonsApi, CreateVersionRequest, RELEASE_NOTES_LOCALE};
pub use auth::Credentials;
pub use error::{ApiError, ApiResult};
pub use schema::{FieldSpec, FieldType, Shape, ShapeMismatch, UPLOAD_SHAPE, VERSION_SHAPE};
pub use workflow::{
    await_validation, update_addon, PollState, UpdateAddonParams, POLL_INTERVAL,
    VALIDATION_TIMEOUT,
};

/// Versioned path prefix of the add-on API
pub const API_PREFIX: &str = "/api/v5/addons/";

/// Only connecting is bounded; large uploads may take arbitrarily long.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Request payload
#[derive(Debug)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Multipart form; file parts stream from disk
    Multipart(reqwest::multipart::Form),
}

/// A 2xx response with its parsed body
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    pub status: u16,
    pub body: Value,
}

/// HTTP client for the add-on API with per-request JWT auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(base_url: &str, credentials: Credentials) -> ApiResult<Self> {
        let base_url = Url::parse(base_url).map_err(|err| ApiError::InvalidUrl {
            url: base_url.to_string(),
            details: err.to_string(),
        })?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Create client from the validated plugin environment.
    pub fn from_env(env: &Env) -> ApiResult<Self> {
        Self::new(
            env.base_url(),
            Credentials::new(env.amo_api_key.clone(), env.amo_api_secret.clone()),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path (e.g. `upload/`) against the API prefix.
    pub fn build_url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(API_PREFIX)
            .and_then(|prefix| prefix.join(path))
            .map_err(|err| ApiError::InvalidUrl {
                url: format!("{}{}", API_PREFIX, path),
                details: err.to_string(),
            })
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> ApiResult<reqwest::RequestBuilder> {
        let token = self.credentials.sign_token()?;
        Ok(request.header(AUTHORIZATION, format!("JWT {}", token)))
    }

    /// Perform one request and return the parsed body of a 2xx response.
    pub async fn send(&self, method: Method, path: &str, body: RequestBody) -> ApiResult<ApiResponse> {
        let url = self.build_url(path)?;
        tracing::debug!(method = %method, url = %url, "Sending add-on API request");

        let mut request = self.client.request(method, url);
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(json) => request.json(&json),
            RequestBody::Multipart(form) => request.multipart(form),
        };
        request = self.apply_auth(request)?;

        let response = request.send().await?;

        let url = response.url().to_string();
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);
        let text = response.text().await?;

        let body = if is_json {
            match serde_json::from_str(&text) {
                Ok(body) => body,
                Err(err) => {
                    tracing::debug!(url = %url, error = %err, "Response declared JSON but did not parse");
                    return Err(ApiError::bad_response(url, status.as_u16(), &Value::String(text)));
                }
            }
        } else {
            Value::String(text)
        };

        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Add-on API returned an error status");
            return Err(ApiError::bad_response(url, status.as_u16(), &body));
        }

        Ok(ApiResponse {
            url,
            status: status.as_u16(),
            body,
        })
    }

    /// Perform one request and decode the body against `shape`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        shape: &Shape,
    ) -> ApiResult<T> {
        let response = self.send(method, path, body).await?;
        shape.decode(&response.body).map_err(|mismatch| {
            tracing::debug!(url = %response.url, error = %mismatch, "Response body did not match the expected shape");
            ApiError::bad_response(response.url.clone(), response.status, &response.body)
        })
    }
}
