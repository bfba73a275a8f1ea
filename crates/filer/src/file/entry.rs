//! Snapshot descriptor of a single filesystem entry.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use walkdir::WalkDir;

use super::folder::Folder;
use super::kind::FileType;
use crate::error::{FilerError, Result};
use crate::ops::hidden;

/// A file or directory with metadata captured when it was opened.
///
/// The snapshot is not updated when the entry changes on disk; open it again
/// to refresh. Directories carry [`FileType::Folder`] and the aggregate size
/// of everything beneath them.
#[derive(Debug, Clone, Serialize)]
pub struct File {
    /// Absolute location of the entry.
    location: PathBuf,
    /// Final path component.
    name: String,
    /// Classification.
    file_type: FileType,
    /// Lower-cased extension, if any. Always `None` for directories.
    extension: Option<String>,
    /// Size in bytes (aggregate for directories).
    size: u64,
    /// Creation time, when the platform reports one.
    created: Option<SystemTime>,
    /// Last modification time.
    modified: Option<SystemTime>,
    /// Whether the entry is hidden on this platform.
    hidden: bool,
    /// Location of the containing folder. Not an owning link.
    parent: Option<PathBuf>,
}

impl File {
    /// Probe `location` and capture its metadata.
    pub fn open(location: impl AsRef<Path>) -> Result<Self> {
        let location = location.as_ref();
        let metadata = fs::metadata(location).map_err(|e| FilerError::from_io(e, location))?;
        Ok(Self::from_metadata(location, &metadata))
    }

    /// Build a descriptor from already-fetched metadata.
    pub(crate) fn from_metadata(location: &Path, metadata: &fs::Metadata) -> Self {
        let is_dir = metadata.is_dir();

        let (file_type, extension) = if is_dir {
            (FileType::Folder, None)
        } else {
            let extension = location
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase());
            let file_type = extension
                .as_deref()
                .map(FileType::from_extension)
                .unwrap_or(FileType::Unknown);
            (file_type, extension)
        };

        let size = if is_dir {
            aggregate_size(location)
        } else {
            metadata.len()
        };

        Self {
            location: location.to_path_buf(),
            name: entry_name(location),
            file_type,
            extension,
            size,
            created: metadata.created().ok(),
            modified: metadata.modified().ok(),
            hidden: hidden::is_hidden_entry(location, metadata),
            parent: location.parent().map(Path::to_path_buf),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn size(&self) -> u64 {
        self.size
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

    pub fn is_folder(&self) -> bool {
        self.file_type == FileType::Folder
    }

    /// Location of the containing folder, `None` at a filesystem root.
    pub fn parent_location(&self) -> Option<&Path> {
        self.parent.as_deref()
    }

    /// Open the containing folder.
    pub fn parent_folder(&self) -> Result<Option<Folder>> {
        self.parent.as_deref().map(Folder::open).transpose()
    }

    /// Expand a directory entry into a [`Folder`] with its contents.
    pub fn open_folder(&self) -> Result<Folder> {
        if !self.is_folder() {
            return Err(FilerError::NotADirectory(self.location.clone()));
        }
        Folder::open(&self.location)
    }

    /// Whether the entry still exists on disk.
    pub fn exists(&self) -> bool {
        self.location.exists()
    }
}

impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for File {}

/// Final component of `location`, or the whole path for roots.
pub(crate) fn entry_name(location: &Path) -> String {
    location
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| location.to_string_lossy().to_string())
}

/// Sum of the sizes of all files beneath `location`. Unreadable entries are skipped.
pub(crate) fn aggregate_size(location: &Path) -> u64 {
    WalkDir::new(location)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}
