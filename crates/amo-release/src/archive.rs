//! Add-on and source archives

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::{ReleaseError, ReleaseResult};

/// Archive entry name for a file under `root`, with `/` separators.
fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn zip_dir_blocking(source_dir: &Path, destination: &Path) -> ReleaseResult<usize> {
    let archive_error = |details: String| ReleaseError::Archive {
        path: destination.to_path_buf(),
        details,
    };

    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(|err| ReleaseError::io(parent, err))?;
    }

    let file = File::create(destination).map_err(|err| ReleaseError::io(destination, err))?;
    // The destination may live inside the directory being archived.
    let skip = destination.canonicalize().ok();
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut count = 0;
    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry.map_err(|err| archive_error(err.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if skip.is_some() && entry.path().canonicalize().ok() == skip {
            continue;
        }
        let Some(name) = entry_name(source_dir, entry.path()) else {
            continue;
        };

        zip.start_file(name.as_str(), options)
            .map_err(|err| archive_error(format!("{}: {}", name, err)))?;
        let mut input = File::open(entry.path()).map_err(|err| ReleaseError::io(entry.path(), err))?;
        io::copy(&mut input, &mut zip).map_err(|err| ReleaseError::io(entry.path(), err))?;
        count += 1;
    }

    zip.finish().map_err(|err| archive_error(err.to_string()))?;
    Ok(count)
}

/// Zip every file under `source_dir` into `destination`.
///
/// Parent directories of `destination` are created. Returns the number of
/// files written.
pub async fn zip_dir(source_dir: &Path, destination: &Path) -> ReleaseResult<usize> {
    let source_dir = source_dir.to_path_buf();
    let destination_path = destination.to_path_buf();

    let count = tokio::task::spawn_blocking(move || zip_dir_blocking(&source_dir, &destination_path))
        .await
        .map_err(|err| ReleaseError::Archive {
            path: destination.to_path_buf(),
            details: err.to_string(),
        })??;

    tracing::info!(path = %destination.display(), files = count, "Created add-on archive");
    Ok(count)
}

/// Archive `HEAD` of the repository in `repo_dir` with `git archive`.
pub async fn git_archive(repo_dir: &Path, destination: &Path) -> ReleaseResult<PathBuf> {
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| ReleaseError::io(parent, err))?;
    }

    let output = tokio::process::Command::new("git")
        .arg("archive")
        .arg("--format=zip")
        .arg("-o")
        .arg(destination)
        .arg("HEAD")
        .current_dir(repo_dir)
        .output()
        .await
        .map_err(|err| ReleaseError::GitArchive {
            details: err.to_string(),
        })?;

    if !output.status.success() {
        return Err(ReleaseError::GitArchive {
            details: format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    tracing::info!(path = %destination.display(), "Created source archive");
    Ok(destination.to_path_buf())
}
