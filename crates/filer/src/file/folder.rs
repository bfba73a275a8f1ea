//! Directory descriptor with its immediate contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use super::entry::{entry_name, File};
use crate::error::{FilerError, Result};
use crate::ops::hidden;

/// Names that are never listed (Windows volume bookkeeping).
const SKIPPED_NAMES: &[&str] = &["System Volume Information"];

/// A directory snapshot.
///
/// `contains` holds the immediate children, directories first and then files,
/// each group ordered by case-insensitive name. Child directories are
/// [`File`] descriptors tagged as folders; expand them with
/// [`File::open_folder`].
#[derive(Debug, Clone, Serialize)]
pub struct Folder {
    location: PathBuf,
    name: String,
    created: Option<SystemTime>,
    modified: Option<SystemTime>,
    hidden: bool,
    contains: Vec<File>,
    size: u64,
}

impl Folder {
    /// Open the directory at `location` and list its contents.
    pub fn open(location: impl AsRef<Path>) -> Result<Self> {
        let location = location.as_ref();
        let metadata = fs::metadata(location).map_err(|e| FilerError::from_io(e, location))?;
        if !metadata.is_dir() {
            return Err(FilerError::NotADirectory(location.to_path_buf()));
        }

        let contains = list_contents(location)?;
        let size = contains.iter().map(File::size).sum();

        Ok(Self {
            location: location.to_path_buf(),
            name: entry_name(location),
            created: metadata.created().ok(),
            modified: metadata.modified().ok(),
            hidden: hidden::is_hidden_entry(location, &metadata),
            contains,
            size,
        })
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created(&self) -> Option<SystemTime> {
        self.created
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Immediate children.
    pub fn contains(&self) -> &[File] {
        &self.contains
    }

    /// Immediate children that are not hidden.
    pub fn visible(&self) -> impl Iterator<Item = &File> {
        self.contains.iter().filter(|f| !f.is_hidden())
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&File> {
        self.contains.iter().find(|f| f.name() == name)
    }

    /// Aggregate size in bytes of everything beneath this folder.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Location of the containing folder.
    pub fn parent_location(&self) -> Option<&Path> {
        self.location.parent()
    }
}

impl PartialEq for Folder {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for Folder {}

fn list_contents(location: &Path) -> Result<Vec<File>> {
    let entries = fs::read_dir(location).map_err(|e| FilerError::from_io(e, location))?;

    let mut results = Vec::new();
    for entry_result in entries {
        let entry = match entry_result {
            Ok(e) => e,
            Err(_) => continue, // Skip entries we can't read
        };

        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('$') || SKIPPED_NAMES.contains(&name.as_str()) {
            continue;
        }

        let path = entry.path();
        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(_) => continue, // Dangling symlinks and entries we can't stat
        };

        results.push(File::from_metadata(&path, &metadata));
    }

    results.sort_by(|a, b| match (a.is_folder(), b.is_folder()) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
    });

    Ok(results)
}
