//! Release host integration
//!
//! Hosts drive a plugin through three lifecycle steps. Each step receives
//! the raw plugin options as written in the release configuration; they are
//! parsed and validated here before use.

use amo_core::PluginConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::context::ReleaseContext;
use crate::error::ReleaseResult;
use crate::prepare::{prepare, PreparedArtifacts};
use crate::publish::{publish, PublishedRelease};
use crate::verify::verify_conditions;

/// Trait that release plugins implement
#[async_trait]
pub trait ReleasePlugin: Send + Sync + Debug {
    /// Plugin name/identifier
    fn name(&self) -> &str;

    /// Check options and environment before anything is released
    async fn verify_conditions(
        &self,
        config: &Value,
        env: &HashMap<String, String>,
    ) -> ReleaseResult<()>;

    /// Produce release artifacts
    async fn prepare(&self, config: &Value, context: &ReleaseContext)
        -> ReleaseResult<PreparedArtifacts>;

    /// Publish the prepared artifacts
    async fn publish(&self, config: &Value, context: &ReleaseContext)
        -> ReleaseResult<PublishedRelease>;
}

/// Publishes browser extensions to addons.mozilla.org
#[derive(Debug, Clone, Copy, Default)]
pub struct AmoPlugin;

#[async_trait]
impl ReleasePlugin for AmoPlugin {
    fn name(&self) -> &str {
        "amo-release"
    }

    async fn verify_conditions(
        &self,
        config: &Value,
        env: &HashMap<String, String>,
    ) -> ReleaseResult<()> {
        verify_conditions(config, env).await
    }

    async fn prepare(
        &self,
        config: &Value,
        context: &ReleaseContext,
    ) -> ReleaseResult<PreparedArtifacts> {
        let config = PluginConfig::from_value(config)?;
        prepare(&config, context).await
    }

    async fn publish(
        &self,
        config: &Value,
        context: &ReleaseContext,
    ) -> ReleaseResult<PublishedRelease> {
        let config = PluginConfig::from_value(config)?;
        publish(&config, context).await
    }
}
