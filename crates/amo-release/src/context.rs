//! Release context handed to `prepare` and `publish` by the host.

use amo_core::{ReleaseLogger, TracingLogger};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Branch being released
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<String>,
}

/// A release computed or recorded by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub version: String,
    pub git_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_head: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Markdown release notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub hash: String,
    pub message: String,
}

/// Everything the lifecycle hooks read from the host
#[derive(Clone)]
pub struct ReleaseContext {
    pub env: HashMap<String, String>,
    pub branch: Branch,
    pub last_release: Option<Release>,
    pub next_release: Release,
    pub commits: Vec<Commit>,
    pub logger: Arc<dyn ReleaseLogger>,
}

/// The part of the context path templates may reference
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateScope<'a> {
    branch: &'a Branch,
    last_release: &'a Option<Release>,
    next_release: &'a Release,
    commits: &'a [Commit],
}

impl ReleaseContext {
    pub fn new(next_release: Release) -> Self {
        Self {
            env: HashMap::new(),
            branch: Branch::default(),
            last_release: None,
            next_release,
            commits: Vec::new(),
            logger: Arc::new(TracingLogger),
        }
    }

    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branch = branch;
        self
    }

    pub fn with_last_release(mut self, last_release: Release) -> Self {
        self.last_release = Some(last_release);
        self
    }

    pub fn with_commits(mut self, commits: Vec<Commit>) -> Self {
        self.commits = commits;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ReleaseLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// `{ branch, lastRelease, nextRelease, commits }` as JSON
    pub fn template_scope(&self) -> serde_json::Value {
        let scope = TemplateScope {
            branch: &self.branch,
            last_release: &self.last_release,
            next_release: &self.next_release,
            commits: &self.commits,
        };
        let mut scope = serde_json::to_value(scope).unwrap_or(serde_json::Value::Null);
        // A first release has an empty previous release rather than none.
        if let Some(last_release) = scope.get_mut("lastRelease").filter(|v| v.is_null()) {
            *last_release = serde_json::Value::Object(serde_json::Map::new());
        }
        scope
    }
}

impl fmt::Debug for ReleaseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut env_keys: Vec<_> = self.env.keys().collect();
        env_keys.sort();
        f.debug_struct("ReleaseContext")
            .field("env_keys", &env_keys)
            .field("branch", &self.branch)
            .field("last_release", &self.last_release)
            .field("next_release", &self.next_release)
            .field("commits", &self.commits.len())
            .finish()
    }
}
