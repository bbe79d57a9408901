//! `prepare` lifecycle step

use amo_core::PluginConfig;
use std::path::{Path, PathBuf};

use crate::archive::{git_archive, zip_dir};
use crate::context::ReleaseContext;
use crate::error::ReleaseResult;
use crate::manifest::update_manifest;
use crate::template::apply_context;

/// Files written by `prepare`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedArtifacts {
    pub manifest_path: PathBuf,
    pub addon_zip_path: PathBuf,
    pub source_zip_path: Option<PathBuf>,
}

/// Stamp the manifest version, archive the add-on and, when requested, the
/// source tree at `HEAD`.
pub async fn prepare(
    config: &PluginConfig,
    context: &ReleaseContext,
) -> ReleaseResult<PreparedArtifacts> {
    let config = config.resolve();
    let addon_zip_path = PathBuf::from(apply_context(&config.addon_zip_path, context)?);
    let source_zip_path = PathBuf::from(apply_context(&config.source_zip_path, context)?);
    let logger = &context.logger;

    logger.log("Updating manifest.json...");
    let manifest_path =
        update_manifest(&config.addon_dir_path, &context.next_release.version).await?;

    logger.log("Archiving the add-on...");
    zip_dir(&config.addon_dir_path, &addon_zip_path).await?;

    let source_zip_path = if config.submit_source {
        logger.log("Archiving the source code...");
        Some(git_archive(Path::new("."), &source_zip_path).await?)
    } else {
        None
    };

    Ok(PreparedArtifacts {
        manifest_path,
        addon_zip_path,
        source_zip_path,
    })
}
