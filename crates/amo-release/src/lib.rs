//! Lifecycle hooks that publish a browser extension to addons.mozilla.org.
//!
//! A release host calls the three steps in order:
//!
//! - `verify_conditions` checks the plugin options, the add-on directory
//!   and the API credentials, reporting every problem at once.
//! - `prepare` stamps `manifest.json` with the next version and zips the
//!   add-on (plus the source tree when `submitSource` is set).
//! - `publish` uploads the archive, waits for validation and creates the
//!   version, returning the listing URL.
//!
//! `AmoPlugin` bundles the three steps behind the `ReleasePlugin` trait.

pub mod archive;
pub mod context;
pub mod error;
pub mod manifest;
pub mod plugin;
pub mod prepare;
pub mod publish;
pub mod release_notes;
pub mod telemetry;
pub mod template;
pub mod verify;

pub use context::{Branch, Commit, Release, ReleaseContext};
pub use error::{ReleaseError, ReleaseResult};
pub use plugin::{AmoPlugin, ReleasePlugin};
pub use prepare::{prepare, PreparedArtifacts};
pub use publish::{publish, publish_with, PublishedRelease, RELEASE_NAME};
pub use release_notes::render_release_notes;
pub use template::apply_context;
pub use verify::verify_conditions;

pub use amo_core::{ErrorMetadata, PluginConfig, ReleaseLogger, TracingLogger};
