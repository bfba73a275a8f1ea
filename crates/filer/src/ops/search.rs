//! Recursive search by name or by content.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::{FilerError, Result};

/// What a search matches against.
#[derive(Debug, Clone)]
pub enum SearchQuery {
    /// Entry names (files and folders).
    Name(Regex),
    /// UTF-8 file contents.
    Content(Regex),
}

impl SearchQuery {
    /// Name search from a regular expression.
    pub fn name(pattern: &str) -> Result<Self> {
        Ok(Self::Name(Regex::new(pattern)?))
    }

    /// Content search from a regular expression.
    pub fn content(pattern: &str) -> Result<Self> {
        Ok(Self::Content(Regex::new(pattern)?))
    }
}

/// Search beneath `root`, returning matching locations in walk order
/// (each entry before its children, siblings by name).
///
/// Name searches require `root` to be a directory. Content searches accept a
/// single file as `root` and fail with [`FilerError::CannotSearchInFile`] when
/// it is not valid UTF-8; inside a directory such files are skipped.
pub fn search(root: &Path, query: &SearchQuery) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(root).map_err(|e| FilerError::from_io(e, root))?;

    let found = match query {
        SearchQuery::Name(regex) => {
            if !metadata.is_dir() {
                return Err(FilerError::CannotSearchInFile(root.to_path_buf()));
            }
            search_names(root, regex)
        }
        SearchQuery::Content(regex) => {
            if metadata.is_dir() {
                search_contents(root, regex)
            } else if file_matches(root, regex)
                .ok_or_else(|| FilerError::CannotSearchInFile(root.to_path_buf()))?
            {
                vec![root.to_path_buf()]
            } else {
                Vec::new()
            }
        }
    };

    debug!(root = ?root, matches = found.len(), "Search finished");
    Ok(found)
}

fn search_names(root: &Path, regex: &Regex) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| regex.is_match(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
        .collect()
}

fn search_contents(root: &Path, regex: &Regex) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| match file_matches(entry.path(), regex) {
            Some(matched) => matched,
            None => {
                trace!(path = ?entry.path(), "Skipping file that is not valid UTF-8");
                false
            }
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// `None` when the file cannot be read as UTF-8 text.
fn file_matches(path: &Path, regex: &Regex) -> Option<bool> {
    let content = fs::read_to_string(path).ok()?;
    Some(regex.is_match(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_structure(dir: &Path) {
        fs::create_dir_all(dir.join("docs/2024")).unwrap();
        fs::write(dir.join("docs/report.txt"), "quarterly numbers").unwrap();
        fs::write(dir.join("docs/2024/report-final.txt"), "final numbers").unwrap();
        fs::write(dir.join("notes.md"), "todo: call bob").unwrap();
        fs::write(dir.join("blob.bin"), [0xff, 0xfe, 0x00, 0x81]).unwrap();
    }

    #[test]
    fn test_name_search_is_recursive_and_ordered() {
        let temp_dir = TempDir::new().unwrap();
        create_test_structure(temp_dir.path());

        let found = search(temp_dir.path(), &SearchQuery::name("report").unwrap()).unwrap();

        assert_eq!(
            found,
            vec![
                temp_dir.path().join("docs/2024/report-final.txt"),
                temp_dir.path().join("docs/report.txt"),
            ]
        );
    }

    #[test]
    fn test_name_search_matches_folders() {
        let temp_dir = TempDir::new().unwrap();
        create_test_structure(temp_dir.path());

        let found = search(temp_dir.path(), &SearchQuery::name("^20\\d\\d$").unwrap()).unwrap();

        assert_eq!(found, vec![temp_dir.path().join("docs/2024")]);
    }

    #[test]
    fn test_name_search_in_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        create_test_structure(temp_dir.path());

        let result = search(&temp_dir.path().join("notes.md"), &SearchQuery::name("x").unwrap());

        assert!(matches!(result, Err(FilerError::CannotSearchInFile(_))));
    }

    #[test]
    fn test_content_search_skips_binary() {
        let temp_dir = TempDir::new().unwrap();
        create_test_structure(temp_dir.path());

        let found = search(temp_dir.path(), &SearchQuery::content("numbers").unwrap()).unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.extension().unwrap() == "txt"));
    }

    #[test]
    fn test_content_search_single_file() {
        let temp_dir = TempDir::new().unwrap();
        create_test_structure(temp_dir.path());
        let notes = temp_dir.path().join("notes.md");

        let hit = search(&notes, &SearchQuery::content("bob").unwrap()).unwrap();
        let miss = search(&notes, &SearchQuery::content("alice").unwrap()).unwrap();

        assert_eq!(hit, vec![notes]);
        assert!(miss.is_empty());
    }

    #[test]
    fn test_content_search_binary_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        create_test_structure(temp_dir.path());

        let result = search(&temp_dir.path().join("blob.bin"), &SearchQuery::content(".").unwrap());

        assert!(matches!(result, Err(FilerError::CannotSearchInFile(_))));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(SearchQuery::name("("), Err(FilerError::InvalidPattern(_))));
    }

    #[test]
    fn test_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let result = search(&temp_dir.path().join("nope"), &SearchQuery::name("x").unwrap());
        assert!(matches!(result, Err(FilerError::LocationNotFound(_))));
    }
}
