//! Add-on listing options

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distribution channel an upload is submitted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Self-distributed, signed but not listed on the site
    Unlisted,
    /// Listed publicly on the site
    #[default]
    Listed,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Unlisted => "unlisted",
            Channel::Listed => "listed",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application a version declares compatibility with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Application {
    Android,
    Firefox,
}
