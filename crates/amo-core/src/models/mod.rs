//! Domain models for the add-on distribution service.
//!
//! `Upload` and `Version` mirror the response bodies of the AMO add-on API.
//! `Channel` and `Application` are the closed sets of values the plugin
//! configuration and the API both accept.

pub mod addon;
pub mod upload;
pub mod version;

pub use addon::{Application, Channel};
pub use upload::Upload;
pub use version::Version;
