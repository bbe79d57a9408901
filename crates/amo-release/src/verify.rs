//! `verifyConditions` lifecycle step

use amo_core::{Env, PluginConfig};
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use std::path::Path;

use crate::error::{ReleaseError, ReleaseResult};
use crate::manifest::manifest_path;

async fn exists(path: &Path) -> ReleaseResult<bool> {
    match tokio::fs::metadata(path).await {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(ReleaseError::io(path, err)),
    }
}

/// Check the plugin options, the add-on directory and the environment.
///
/// Every failed check is collected and returned together as
/// `ReleaseError::Aggregate`. Only unexpected filesystem errors abort early.
pub async fn verify_conditions(
    raw_config: &Value,
    env: &HashMap<String, String>,
) -> ReleaseResult<()> {
    let mut errors = Vec::new();

    match PluginConfig::from_value(raw_config) {
        Err(err) => errors.push(ReleaseError::from(err)),
        Ok(config) => {
            let addon_dir = Path::new(&config.addon_dir_path);
            if !exists(addon_dir).await? {
                errors.push(ReleaseError::AddonDirNotFound {
                    path: addon_dir.to_path_buf(),
                });
            } else {
                let manifest = manifest_path(addon_dir);
                if !exists(&manifest).await? {
                    errors.push(ReleaseError::ManifestNotFound { path: manifest });
                }
            }
        }
    }

    if let Err(err) = Env::from_map(env) {
        errors.push(ReleaseError::from(err));
    }

    if errors.is_empty() {
        tracing::debug!("All release conditions are met");
        Ok(())
    } else {
        tracing::warn!(count = errors.len(), "Release conditions are not met");
        Err(ReleaseError::Aggregate(errors))
    }
}
