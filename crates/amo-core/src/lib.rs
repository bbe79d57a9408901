//! amo-release core library
//!
//! This crate provides the domain models, plugin configuration schema, error
//! metadata and logger capability shared by the API client and the lifecycle
//! adapter.

pub mod config;
pub mod error;
pub mod logger;
pub mod models;

// Re-export commonly used types
pub use config::{Env, PluginConfig, ResolvedConfig, DEFAULT_BASE_URL};
pub use error::{ConfigError, ErrorMetadata, LogLevel};
pub use logger::{ReleaseLogger, TracingLogger};
pub use models::{Application, Channel, Upload, Version};
