//! Error types for the filer crate.

use std::path::PathBuf;

use thiserror::Error;

/// Filer error type covering every failure a session or primitive can report.
#[derive(Debug, Error)]
pub enum FilerError {
    // Navigation errors
    /// Navigation would leave the locked home.
    #[error("home is locked: {target} is outside {home}")]
    HomeIsLocked {
        /// The rejected destination.
        target: PathBuf,
        /// The lock boundary.
        home: PathBuf,
    },

    /// Backward traversal requested at the oldest history entry.
    #[error("no backward history")]
    NoBackwardHistory,

    /// Forward traversal requested at the newest history entry.
    #[error("no forward history")]
    NoForwardHistory,

    /// The current location has no parent to go up to.
    #[error("location has no parent: {0}")]
    NoParentLocation(PathBuf),

    /// The requested location does not exist.
    #[error("location not found: {0}")]
    LocationNotFound(PathBuf),

    /// The requested location is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    // Clipboard errors
    /// Paste requested with an empty clipboard.
    #[error("no clipboard operation pending")]
    NoClipboardOperationPending,

    // Mutation errors
    /// The target of a create/copy/move/rename already exists.
    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),

    /// A directory would be copied or moved into itself.
    #[error("destination {target} is inside source {source_path}")]
    DestinationInsideSource {
        /// The directory being copied or moved.
        source_path: PathBuf,
        /// The rejected target.
        target: PathBuf,
    },

    /// The target is an ancestor of the entry being copied or moved.
    #[error("target {target} contains source {source_path}")]
    TargetContainsSource {
        /// The entry being copied or moved.
        source_path: PathBuf,
        /// The rejected target.
        target: PathBuf,
    },

    /// A new name is empty or contains a path separator.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// Hide requested on an entry that is already hidden.
    #[error("file is already hidden: {0}")]
    FileIsAlreadyHidden(PathBuf),

    /// Unhide requested on an entry that is already visible.
    #[error("file is already visible: {0}")]
    FileIsAlreadyVisible(PathBuf),

    // Archive errors
    /// The unzip source is not a valid archive.
    #[error("not a zip file to extract: {0}")]
    NotAZipFileToExtract(PathBuf),

    /// The archive engine failed.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    // Search errors
    /// The search root is a file that cannot be scanned.
    #[error("cannot search in file: {0}")]
    CannotSearchInFile(PathBuf),

    /// The search pattern is not a valid regular expression.
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Underlying filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilerError {
    /// Map an IO error for `path`, turning `NotFound` into [`FilerError::LocationNotFound`].
    pub(crate) fn from_io(error: std::io::Error, path: &std::path::Path) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::LocationNotFound(path.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists(path.to_path_buf()),
            _ => Self::Io(error),
        }
    }
}

/// Result type alias using [`FilerError`].
pub type Result<T> = std::result::Result<T, FilerError>;
