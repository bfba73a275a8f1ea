//! Classification of entries by extension.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kind of a filesystem entry.
///
/// Directories are always [`FileType::Folder`]. Files are classified from
/// their lower-cased extension; anything unrecognised, including files
/// without an extension, is [`FileType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Directory.
    Folder,
    /// Plain text, markup and configuration files.
    Text,
    /// Office documents and PDFs.
    Document,
    /// Raster and vector images.
    Image,
    /// Audio files.
    Audio,
    /// Video files.
    Video,
    /// Compressed archives.
    Archive,
    /// Source code.
    Code,
    /// Executables and shared libraries.
    Executable,
    /// No known classification.
    Unknown,
}

impl FileType {
    /// Classify a file extension (without the leading dot).
    pub fn from_extension(extension: &str) -> Self {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" | "md" | "csv" | "log" | "ini" | "cfg" | "conf" | "toml" | "yaml" | "yml"
            | "json" | "xml" => Self::Text,
            "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "odt" | "ods" | "odp"
            | "rtf" => Self::Document,
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "tiff" | "svg" | "ico" | "webp" => Self::Image,
            "mp3" | "wav" | "flac" | "aac" | "ogg" | "m4a" | "wma" => Self::Audio,
            "mp4" | "avi" | "mov" | "wmv" | "flv" | "webm" | "mkv" | "m4v" => Self::Video,
            "zip" | "rar" | "7z" | "tar" | "gz" | "tgz" | "bz2" | "xz" | "zst" | "jar" => {
                Self::Archive
            }
            "rs" | "java" | "c" | "h" | "cpp" | "hpp" | "py" | "js" | "ts" | "go" | "rb" | "sh"
            | "html" | "css" => Self::Code,
            "exe" | "dll" | "so" | "dylib" | "bin" | "msi" | "app" => Self::Executable,
            _ => Self::Unknown,
        }
    }

    /// Classify a path from its extension. Does not touch the filesystem.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    /// Classify a path, returning [`FileType::Folder`] for directories.
    pub fn of(path: &Path) -> Self {
        if path.is_dir() {
            Self::Folder
        } else {
            Self::from_path(path)
        }
    }

    /// Lower-case name of the classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Text => "text",
            Self::Document => "document",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Archive => "archive",
            Self::Code => "code",
            Self::Executable => "executable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
