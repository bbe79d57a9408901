//! `publish` lifecycle step

use amo_api_client::{update_addon, AddonsApi, ApiClient, ApiError, UpdateAddonParams};
use amo_core::{Env, PluginConfig, ReleaseLogger};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::context::ReleaseContext;
use crate::error::ReleaseResult;
use crate::release_notes::render_release_notes;
use crate::template::apply_context;

pub const RELEASE_NAME: &str = "Firefox Add-ons";

/// Where the release can be found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedRelease {
    pub name: String,
    pub url: String,
}

/// Inputs of the upload workflow for this release.
pub fn update_params(
    config: &PluginConfig,
    context: &ReleaseContext,
    logger: &dyn ReleaseLogger,
) -> ReleaseResult<UpdateAddonParams> {
    let config = config.resolve();
    let addon_zip_path = apply_context(&config.addon_zip_path, context)?;
    let source_zip_path = apply_context(&config.source_zip_path, context)?;

    let notes = context
        .next_release
        .notes
        .as_deref()
        .filter(|notes| !notes.is_empty());
    let release_notes = match (config.submit_release_notes, notes) {
        (true, Some(notes)) => Some(render_release_notes(notes)),
        (true, None) => {
            logger.warn("Release notes are empty. Skipping submission of release notes.");
            None
        }
        (false, _) => None,
    };

    Ok(UpdateAddonParams {
        addon_id: config.addon_id,
        addon_zip_path: PathBuf::from(addon_zip_path),
        channel: config.channel,
        approval_notes: config.approval_notes,
        compatibility: config.compatibility,
        release_notes,
        source_zip_path: config.submit_source.then(|| PathBuf::from(source_zip_path)),
    })
}

/// Listing page of an add-on.
pub fn listing_url(client: &ApiClient, addon_id: &str) -> ReleaseResult<String> {
    let path = format!("/en-US/firefox/addon/{}/", addon_id);
    let url = client
        .base_url()
        .join(&path)
        .map_err(|err| ApiError::InvalidUrl {
            url: path,
            details: err.to_string(),
        })?;
    Ok(url.to_string())
}

/// Run the upload workflow against an arbitrary API.
pub async fn publish_with(
    api: &dyn AddonsApi,
    config: &PluginConfig,
    context: &ReleaseContext,
) -> ReleaseResult<()> {
    let logger = context.logger.as_ref();
    let params = update_params(config, context, logger)?;
    let version = update_addon(api, &params, logger).await?;
    tracing::info!(
        addon_id = %params.addon_id,
        version_id = version.id,
        version = %context.next_release.version,
        "Published add-on version"
    );
    Ok(())
}

/// Upload the prepared archive to addons.mozilla.org and create a version.
pub async fn publish(
    config: &PluginConfig,
    context: &ReleaseContext,
) -> ReleaseResult<PublishedRelease> {
    let env = Env::from_map(&context.env)?;
    let client = ApiClient::from_env(&env)?;

    publish_with(&client, config, context).await?;

    Ok(PublishedRelease {
        name: RELEASE_NAME.to_string(),
        url: listing_url(&client, &config.addon_id)?,
    })
}
