//! Copy and move primitives.
//!
//! Files are copied to a temporary sibling of the target and renamed into
//! place, so an interrupted copy never leaves a truncated target behind.
//! Directories are copied recursively. Moves use `rename` and fall back to
//! copy + delete when the rename fails (for example across devices).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{FilerError, Result};
use crate::file::File;

/// Suffix of in-flight copy files.
const TEMP_SUFFIX: &str = "jfiler-tmp";

/// Work out where `source` lands when sent to `destination`.
///
/// An existing directory receives the entry under its own name; anything else
/// is taken as the full target path.
pub fn resolve_target(source: &Path, destination: &Path) -> Result<PathBuf> {
    if destination.is_dir() {
        let name = source
            .file_name()
            .ok_or_else(|| FilerError::InvalidName(source.to_string_lossy().to_string()))?;
        Ok(destination.join(name))
    } else {
        Ok(destination.to_path_buf())
    }
}

/// Copy `source` (file or directory) to `target`.
pub fn copy_entry(source: &Path, target: &Path, overwrite: bool) -> Result<File> {
    let is_dir = prepare_target(source, target, overwrite)?;

    if is_dir {
        copy_dir(source, target)?;
    } else {
        copy_file(source, target)?;
    }

    info!(source = ?source, target = ?target, "Copied entry");
    File::open(target)
}

/// Move `source` (file or directory) to `target`.
pub fn move_entry(source: &Path, target: &Path, overwrite: bool) -> Result<File> {
    let is_dir = prepare_target(source, target, overwrite)?;

    if let Err(e) = fs::rename(source, target) {
        if e.kind() == std::io::ErrorKind::NotFound {
            return Err(FilerError::LocationNotFound(source.to_path_buf()));
        }
        tracing::debug!(error = %e, "Rename failed, falling back to copy and delete");
        if is_dir {
            copy_dir(source, target)?;
            fs::remove_dir_all(source)?;
        } else {
            copy_file(source, target)?;
            fs::remove_file(source)?;
        }
    }

    info!(source = ?source, target = ?target, "Moved entry");
    File::open(target)
}

/// Validate a copy/move and clear the way for it. Returns whether the source is a directory.
fn prepare_target(source: &Path, target: &Path, overwrite: bool) -> Result<bool> {
    let metadata = fs::metadata(source).map_err(|e| FilerError::from_io(e, source))?;
    let is_dir = metadata.is_dir();

    if target == source {
        return Err(FilerError::AlreadyExists(target.to_path_buf()));
    }

    if is_dir && target.starts_with(source) {
        return Err(FilerError::DestinationInsideSource {
            source_path: source.to_path_buf(),
            target: target.to_path_buf(),
        });
    }

    // Replacing an ancestor would delete the source before it is read
    if source.starts_with(target) {
        return Err(FilerError::TargetContainsSource {
            source_path: source.to_path_buf(),
            target: target.to_path_buf(),
        });
    }

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(FilerError::LocationNotFound(parent.to_path_buf()));
        }
    }

    if let Ok(existing) = fs::symlink_metadata(target) {
        if !overwrite {
            return Err(FilerError::AlreadyExists(target.to_path_buf()));
        }
        info!(target = ?target, "Overwriting existing entry");
        if existing.is_dir() {
            fs::remove_dir_all(target)?;
        } else {
            fs::remove_file(target)?;
        }
    }

    Ok(is_dir)
}

/// Copy a single file through a temporary sibling.
fn copy_file(source: &Path, target: &Path) -> Result<()> {
    let temp_path = temp_sibling(target);

    if let Err(e) = fs::copy(source, &temp_path) {
        cleanup(&temp_path);
        return Err(FilerError::from_io(e, source));
    }

    if let Err(e) = fs::rename(&temp_path, target) {
        cleanup(&temp_path);
        return Err(FilerError::Io(e));
    }

    Ok(())
}

/// Copy a directory tree. A partially copied target is removed on failure.
fn copy_dir(source: &Path, target: &Path) -> Result<()> {
    fs::create_dir(target).map_err(|e| FilerError::from_io(e, target))?;

    let result = (|| -> Result<()> {
        for entry in WalkDir::new(source).min_depth(1) {
            let entry = entry.map_err(|e| FilerError::Io(e.into()))?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(|_| FilerError::LocationNotFound(entry.path().to_path_buf()))?;
            let destination = target.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&destination)?;
            } else {
                copy_file(entry.path(), &destination)?;
            }
        }
        Ok(())
    })();

    if result.is_err() {
        if let Err(e) = fs::remove_dir_all(target) {
            warn!(path = ?target, error = %e, "Failed to clean up partially copied directory");
        }
    }

    result
}

fn temp_sibling(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    target.with_file_name(format!(".{}.{:x}.{}", name, nanos, TEMP_SUFFIX))
}

fn cleanup(temp_path: &Path) {
    if temp_path.exists() {
        if let Err(e) = fs::remove_file(temp_path) {
            warn!(path = ?temp_path, error = %e, "Failed to clean up temp file");
        }
    }
}
