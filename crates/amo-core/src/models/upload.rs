//! Upload model

use serde::{Deserialize, Serialize};

/// One submitted package pending automated review.
///
/// Uploads are created by the service and only observed here: the plugin
/// polls them by `uuid` until `processed` flips to true, then never looks at
/// them again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upload {
    /// Opaque identifier used for polling and for linking the version
    pub uuid: String,
    /// False until the service has finished its automated checks
    pub processed: bool,
    /// Only meaningful once `processed` is true
    pub valid: bool,
    /// Validation report; present on failure, null otherwise
    pub validation: Option<serde_json::Value>,
}

impl Upload {
    /// Processed and valid: a version may be created from it
    pub fn is_accepted(&self) -> bool {
        self.processed && self.valid
    }
}
