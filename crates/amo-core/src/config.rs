//! Configuration module
//!
//! This module provides the plugin option schema and the environment schema
//! checked at verification time, and the defaults applied before `prepare`
//! and `publish` run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use validator::Validate;

use crate::error::ConfigError;
use crate::models::{Application, Channel};

/// Default add-on archive location; a path template.
pub const DEFAULT_ADDON_ZIP_PATH: &str = "./amo-release/${nextRelease.version}.zip";
/// Default source archive location; a path template.
pub const DEFAULT_SOURCE_ZIP_PATH: &str = "./amo-release/${nextRelease.version}-src.zip";
/// Default service base URL when AMO_BASE_URL is unset.
pub const DEFAULT_BASE_URL: &str = "https://addons.mozilla.org/";

/// Plugin options as written in the host's release configuration.
///
/// Unknown keys are ignored so hosts may pass their own bookkeeping fields
/// (such as the plugin path) alongside ours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    #[validate(length(min = 1, message = "addonId must not be empty"))]
    pub addon_id: String,
    #[validate(length(min = 1, message = "addonDirPath must not be empty"))]
    pub addon_dir_path: String,
    pub addon_zip_path: Option<String>,
    pub channel: Option<Channel>,
    pub approval_notes: Option<String>,
    pub compatibility: Option<Vec<Application>>,
    pub submit_release_notes: Option<bool>,
    pub submit_source: Option<bool>,
    pub source_zip_path: Option<String>,
}

/// Plugin options with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub addon_id: String,
    pub addon_dir_path: PathBuf,
    /// Path template, rendered against the release context
    pub addon_zip_path: String,
    pub channel: Channel,
    /// Never `Some("")`
    pub approval_notes: Option<String>,
    pub compatibility: Vec<Application>,
    pub submit_release_notes: bool,
    pub submit_source: bool,
    /// Path template, rendered against the release context
    pub source_zip_path: String,
}

impl PluginConfig {
    /// Parse and validate raw plugin options.
    pub fn from_value(raw: &serde_json::Value) -> Result<Self, ConfigError> {
        let config: PluginConfig = serde_json::from_value(raw.clone()).map_err(|err| {
            ConfigError::InvalidPluginConfig {
                details: err.to_string(),
            }
        })?;

        config
            .validate()
            .map_err(|err| ConfigError::InvalidPluginConfig {
                details: err.to_string(),
            })?;

        Ok(config)
    }

    /// Apply defaults.
    pub fn resolve(&self) -> ResolvedConfig {
        ResolvedConfig {
            addon_id: self.addon_id.clone(),
            addon_dir_path: PathBuf::from(&self.addon_dir_path),
            addon_zip_path: self
                .addon_zip_path
                .clone()
                .unwrap_or_else(|| DEFAULT_ADDON_ZIP_PATH.to_string()),
            channel: self.channel.unwrap_or_default(),
            approval_notes: self
                .approval_notes
                .clone()
                .filter(|notes| !notes.is_empty()),
            compatibility: self
                .compatibility
                .clone()
                .unwrap_or_else(|| vec![Application::Firefox]),
            submit_release_notes: self.submit_release_notes.unwrap_or(false),
            submit_source: self.submit_source.unwrap_or(false),
            source_zip_path: self
                .source_zip_path
                .clone()
                .unwrap_or_else(|| DEFAULT_SOURCE_ZIP_PATH.to_string()),
        }
    }
}

/// Environment variables the plugin reads.
///
/// Deserialized with `envy`, which lowercases variable names, so
/// `AMO_API_KEY` lands in `amo_api_key`.
#[derive(Clone, Deserialize, Validate)]
pub struct Env {
    #[validate(length(min = 1, message = "AMO_API_KEY must not be empty"))]
    pub amo_api_key: String,
    #[validate(length(min = 1, message = "AMO_API_SECRET must not be empty"))]
    pub amo_api_secret: String,
    #[validate(url(message = "AMO_BASE_URL must be a valid URL"))]
    pub amo_base_url: Option<String>,
}

impl Env {
    /// Parse and validate the host-provided environment.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let env: Env = envy::from_iter(vars.iter().map(|(k, v)| (k.clone(), v.clone())))
            .map_err(|err| ConfigError::InvalidEnv {
                details: err.to_string(),
            })?;

        env.validate().map_err(|err| ConfigError::InvalidEnv {
            details: err.to_string(),
        })?;

        Ok(env)
    }

    pub fn base_url(&self) -> &str {
        self.amo_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

// The secret must never reach logs.
impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("amo_api_key", &self.amo_api_key)
            .field("amo_api_secret", &"[REDACTED]")
            .field("amo_base_url", &self.amo_base_url)
            .finish()
    }
}
