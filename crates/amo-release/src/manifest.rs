//! manifest.json stamping

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, ReleaseResult};

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

pub fn manifest_path(addon_dir: &Path) -> PathBuf {
    addon_dir.join(MANIFEST_FILE_NAME)
}

/// Replace `version` in a manifest, keeping every other key in place.
///
/// Output is pretty-printed with two-space indentation and a trailing
/// newline.
pub fn stamp_version(path: &Path, raw: &str, version: &str) -> ReleaseResult<String> {
    let invalid = |details: String| ReleaseError::InvalidManifest {
        path: path.to_path_buf(),
        details,
    };

    let mut manifest: Map<String, Value> = match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Err(invalid(format!(
                "expected a JSON object, found {}",
                match other {
                    Value::Array(_) => "an array",
                    Value::String(_) => "a string",
                    Value::Number(_) => "a number",
                    Value::Bool(_) => "a boolean",
                    _ => "null",
                }
            )))
        }
        Err(err) => return Err(invalid(err.to_string())),
    };

    manifest.insert("version".to_string(), Value::String(version.to_string()));

    let mut rendered =
        serde_json::to_string_pretty(&manifest).map_err(|err| invalid(err.to_string()))?;
    rendered.push('\n');
    Ok(rendered)
}

/// Rewrite `<addon_dir>/manifest.json` with the given version.
pub async fn update_manifest(addon_dir: &Path, version: &str) -> ReleaseResult<PathBuf> {
    let path = manifest_path(addon_dir);
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|err| ReleaseError::io(&path, err))?;

    let stamped = stamp_version(&path, &raw, version)?;
    tokio::fs::write(&path, stamped)
        .await
        .map_err(|err| ReleaseError::io(&path, err))?;

    tracing::debug!(path = %path.display(), version, "Stamped manifest version");
    Ok(path)
}
