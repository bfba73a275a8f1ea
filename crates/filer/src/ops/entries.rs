//! Create, delete and rename single entries.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{FilerError, Result};
use crate::file::{File, Folder};
use crate::location;

/// Create an empty file. Fails if anything already exists at `path`.
pub fn create_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| FilerError::from_io(e, path))?;

    info!(path = ?path, "Created file");
    File::open(path)
}

/// Create an empty directory. The parent must exist.
pub fn create_folder(path: &Path) -> Result<Folder> {
    fs::create_dir(path).map_err(|e| FilerError::from_io(e, path))?;

    info!(path = ?path, "Created folder");
    Folder::open(path)
}

/// Delete a file, or a directory with everything in it.
pub fn delete(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| FilerError::from_io(e, path))?;

    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }

    info!(path = ?path, "Deleted entry");
    Ok(())
}

/// Give the entry at `path` a new name in the same folder.
pub fn rename(path: &Path, new_name: &str) -> Result<File> {
    location::validate_name(new_name)?;
    if fs::symlink_metadata(path).is_err() {
        return Err(FilerError::LocationNotFound(path.to_path_buf()));
    }

    let target: PathBuf = path.with_file_name(new_name);
    if target == path {
        return File::open(path);
    }
    if fs::symlink_metadata(&target).is_ok() {
        return Err(FilerError::AlreadyExists(target));
    }

    fs::rename(path, &target).map_err(|e| FilerError::from_io(e, path))?;

    info!(from = ?path, to = ?target, "Renamed entry");
    File::open(&target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("new.txt");

        let file = create_file(&path).unwrap();

        assert_eq!(file.size(), 0);
        assert!(path.is_file());
    }

    #[test]
    fn test_create_file_exists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("new.txt");
        fs::write(&path, "keep").unwrap();

        assert!(matches!(create_file(&path), Err(FilerError::AlreadyExists(_))));
        assert_eq!(fs::read(&path).unwrap(), b"keep");
    }

    #[test]
    fn test_create_folder() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dir");

        let folder = create_folder(&path).unwrap();

        assert!(folder.contains().is_empty());
        assert!(matches!(create_folder(&path), Err(FilerError::AlreadyExists(_))));
    }

    #[test]
    fn test_create_folder_missing_parent() {
        let temp_dir = TempDir::new().unwrap();
        let result = create_folder(&temp_dir.path().join("a/b"));
        assert!(matches!(result, Err(FilerError::LocationNotFound(_))));
    }

    #[test]
    fn test_delete_file_and_folder() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("f.txt");
        fs::write(&file, "x").unwrap();
        let dir = temp_dir.path().join("d");
        fs::create_dir_all(dir.join("inner")).unwrap();
        fs::write(dir.join("inner/g.txt"), "y").unwrap();

        delete(&file).unwrap();
        delete(&dir).unwrap();

        assert!(!file.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn test_delete_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = delete(&temp_dir.path().join("gone"));
        assert!(matches!(result, Err(FilerError::LocationNotFound(_))));
    }

    #[test]
    fn test_rename() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.txt");
        fs::write(&path, "x").unwrap();

        let renamed = rename(&path, "newFile.txt").unwrap();

        assert_eq!(renamed.name(), "newFile.txt");
        assert!(!path.exists());
        assert!(temp_dir.path().join("newFile.txt").exists());
    }

    #[test]
    fn test_rename_collision() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a"), "a").unwrap();
        fs::write(temp_dir.path().join("b"), "b").unwrap();

        let result = rename(&temp_dir.path().join("a"), "b");

        assert!(matches!(result, Err(FilerError::AlreadyExists(_))));
        assert_eq!(fs::read(temp_dir.path().join("b")).unwrap(), b"b");
    }

    #[test]
    fn test_rename_rejects_separator() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a"), "a").unwrap();

        let result = rename(&temp_dir.path().join("a"), "../escape");

        assert!(matches!(result, Err(FilerError::InvalidName(_))));
    }
}
