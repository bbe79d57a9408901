//! Shared fixtures for lifecycle integration tests.

#![allow(dead_code)]

use amo_core::ReleaseLogger;
use amo_release::{Release, ReleaseContext};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const PENDING_UPLOAD: &str =
    r#"{"uuid":"u1","processed":false,"valid":false,"validation":null}"#;
pub const VALID_UPLOAD: &str = r#"{"uuid":"u1","processed":true,"valid":true,"validation":null}"#;
pub const INVALID_UPLOAD: &str =
    r#"{"uuid":"u1","processed":true,"valid":false,"validation":{"messages":["bad icon"]}}"#;

/// Logger that keeps messages for assertions
#[derive(Default)]
pub struct RecordingLogger {
    pub messages: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
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

/// Temporary workspace with an add-on directory
pub struct AddonFixture {
    pub dir: TempDir,
}

impl AddonFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let addon = dir.path().join("dist");
        std::fs::create_dir_all(addon.join("icons")).unwrap();
        std::fs::write(
            addon.join("manifest.json"),
            r#"{"manifest_version":2,"name":"Example","version":"0.0.0","icons":{"48":"icons/48.png"}}"#,
        )
        .unwrap();
        std::fs::write(addon.join("icons/48.png"), "png").unwrap();
        std::fs::write(addon.join("background.js"), "console.log('hi');").unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn addon_dir(&self) -> PathBuf {
        self.root().join("dist")
    }

    /// Plugin options pointing into this workspace
    pub fn config(&self, extra: serde_json::Value) -> serde_json::Value {
        let mut config = serde_json::json!({
            "addonId": "my-addon",
            "addonDirPath": self.addon_dir(),
            "addonZipPath": format!("{}/out/${{nextRelease.version}}.zip", self.root().display()),
            "sourceZipPath": format!("{}/out/${{nextRelease.version}}-src.zip", self.root().display()),
        });
        if let (Some(base), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
            for (key, value) in extra {
                base.insert(key.clone(), value.clone());
            }
        }
        config
    }
}

pub fn env(base_url: &str) -> HashMap<String, String> {
    HashMap::from([
        ("AMO_API_KEY".to_string(), "user:12345:67".to_string()),
        ("AMO_API_SECRET".to_string(), "secret".to_string()),
        ("AMO_BASE_URL".to_string(), base_url.to_string()),
    ])
}

pub fn context(base_url: &str, notes: Option<&str>, logger: Arc<RecordingLogger>) -> ReleaseContext {
    ReleaseContext::new(Release {
        version: "1.2.3".to_string(),
        git_tag: "v1.2.3".to_string(),
        notes: notes.map(str::to_string),
        ..Default::default()
    })
    .with_env(env(base_url))
    .with_logger(logger)
}
