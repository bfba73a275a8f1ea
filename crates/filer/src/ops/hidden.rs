//! Hidden-attribute handling.
//!
//! On Unix an entry is hidden when its name starts with a dot, so hiding and
//! unhiding rename the entry. Either spelling of the path identifies the
//! entry: `hide("a.txt")` on an already hidden `.a.txt` reports
//! [`FilerError::FileIsAlreadyHidden`]. On Windows the hidden attribute is
//! toggled in place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{FilerError, Result};

/// Whether the entry at `path` is hidden.
pub fn is_hidden(path: &Path) -> Result<bool> {
    let metadata = fs::symlink_metadata(path).map_err(|e| FilerError::from_io(e, path))?;
    Ok(is_hidden_entry(path, &metadata))
}

/// Hide the entry at `path`. Returns its location afterwards.
pub fn hide(path: &Path) -> Result<PathBuf> {
    platform::set_hidden(path, true)
}

/// Unhide the entry at `path`. Returns its location afterwards.
pub fn unhide(path: &Path) -> Result<PathBuf> {
    platform::set_hidden(path, false)
}

#[cfg(not(windows))]
pub(crate) fn is_hidden_entry(path: &Path, _metadata: &fs::Metadata) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

#[cfg(windows)]
pub(crate) fn is_hidden_entry(_path: &Path, metadata: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
mod platform {
    use super::*;

    /// The visible and hidden spellings of the entry named by `path`.
    fn spellings(path: &Path) -> Result<(PathBuf, PathBuf)> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| FilerError::InvalidName(path.to_string_lossy().to_string()))?;

        let bare = name.trim_start_matches('.');
        if bare.is_empty() {
            return Err(FilerError::InvalidName(name));
        }

        Ok((path.with_file_name(bare), path.with_file_name(format!(".{}", bare))))
    }

    pub(super) fn set_hidden(path: &Path, hidden: bool) -> Result<PathBuf> {
        let (visible, concealed) = spellings(path)?;
        let visible_exists = fs::symlink_metadata(&visible).is_ok();
        let concealed_exists = fs::symlink_metadata(&concealed).is_ok();

        // The spelling the caller used wins when both exist
        let currently_hidden = match (visible_exists, concealed_exists) {
            (false, false) => return Err(FilerError::LocationNotFound(path.to_path_buf())),
            (true, false) => false,
            (false, true) => true,
            (true, true) => path == concealed.as_path(),
        };

        match (currently_hidden, hidden) {
            (true, true) => Err(FilerError::FileIsAlreadyHidden(path.to_path_buf())),
            (false, false) => Err(FilerError::FileIsAlreadyVisible(path.to_path_buf())),
            (false, true) => rename_exclusive(&visible, &concealed),
            (true, false) => rename_exclusive(&concealed, &visible),
        }
    }

    fn rename_exclusive(from: &Path, to: &Path) -> Result<PathBuf> {
        if fs::symlink_metadata(to).is_ok() {
            return Err(FilerError::AlreadyExists(to.to_path_buf()));
        }
        fs::rename(from, to).map_err(|e| FilerError::from_io(e, from))?;
        info!(from = ?from, to = ?to, "Toggled hidden state");
        Ok(to.to_path_buf())
    }
}

#[cfg(windows)]
mod platform {
    use super::*;
    use std::process::Command;

    pub(super) fn set_hidden(path: &Path, hidden: bool) -> Result<PathBuf> {
        let currently_hidden = is_hidden(path)?;
        match (currently_hidden, hidden) {
            (true, true) => return Err(FilerError::FileIsAlreadyHidden(path.to_path_buf())),
            (false, false) => return Err(FilerError::FileIsAlreadyVisible(path.to_path_buf())),
            _ => {}
        }

        let flag = if hidden { "+h" } else { "-h" };
        let status = Command::new("attrib").arg(flag).arg(path).status()?;
        if !status.success() {
            return Err(FilerError::Io(std::io::Error::other(format!(
                "attrib {} exited with {}",
                flag, status
            ))));
        }

        info!(path = ?path, hidden, "Toggled hidden attribute");
        Ok(path.to_path_buf())
    }
}
