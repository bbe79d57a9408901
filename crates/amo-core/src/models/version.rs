//! Version model

use serde::{Deserialize, Serialize};

/// The distribution-service object created once an upload is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub id: u64,
}
