//! Location resolution.
//!
//! Locations are absolute paths. Caller input may be relative (resolved
//! against a base directory) and may contain `.` or `..` components, which
//! are folded away lexically before the filesystem is consulted.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{FilerError, Result};

/// Join `input` onto `base` unless it is already absolute, then normalise.
pub fn resolve(base: &Path, input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    if input.is_absolute() {
        normalize(input)
    } else {
        normalize(&base.join(input))
    }
}

/// Remove `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::RootDir | Component::Prefix(_) | Component::Normal(_) => {
                out.push(component);
            }
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Canonicalize an existing location, resolving symlinks.
pub fn canonical(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| FilerError::from_io(e, path))
}

/// Canonicalize an existing directory.
pub fn canonical_dir(path: &Path) -> Result<PathBuf> {
    let canonical = canonical(path)?;
    if !canonical.is_dir() {
        return Err(FilerError::NotADirectory(path.to_path_buf()));
    }
    Ok(canonical)
}

/// Canonicalize the parent of an existing entry, keeping its own name.
///
/// Unlike [`canonical`], a symlink stays a symlink: the returned path names
/// the link, not its target.
pub fn canonical_entry(path: &Path) -> Result<PathBuf> {
    fs::symlink_metadata(path).map_err(|e| FilerError::from_io(e, path))?;
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            Ok(canonical(parent)?.join(name))
        }
        _ => canonical(path),
    }
}

/// Canonical form of a location that may not exist yet: the parent must exist.
pub fn canonical_target(path: &Path) -> Result<PathBuf> {
    if fs::symlink_metadata(path).is_ok() {
        return canonical_entry(path);
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => Ok(canonical(parent)?.join(name)),
        _ => Err(FilerError::LocationNotFound(path.to_path_buf())),
    }
}

/// Validate a file name supplied for create/rename.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(FilerError::InvalidName(name.to_string()));
    }
    Ok(())
}
