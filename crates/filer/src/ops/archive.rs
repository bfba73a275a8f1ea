//! Zip archive creation and extraction.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{FilerError, Result};
use crate::file::{File, Folder};

/// Compress `sources` (files or directories) into a new archive at `archive`.
///
/// Directories are stored with their own name as the top-level entry. The
/// archive must not already exist.
pub fn zip(sources: &[PathBuf], archive: &Path) -> Result<File> {
    for source in sources {
        if !source.exists() {
            return Err(FilerError::LocationNotFound(source.clone()));
        }
    }
    if archive.exists() {
        return Err(FilerError::AlreadyExists(archive.to_path_buf()));
    }

    let file = fs::File::create(archive).map_err(|e| FilerError::from_io(e, archive))?;
    let result = write_archive(file, sources, archive);
    if result.is_err() {
        if let Err(e) = fs::remove_file(archive) {
            tracing::warn!(path = ?archive, error = %e, "Failed to clean up incomplete archive");
        }
    }
    result?;

    info!(archive = ?archive, entries = sources.len(), "Created archive");
    File::open(archive)
}

fn write_archive(file: fs::File, sources: &[PathBuf], archive: &Path) -> Result<()> {
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for source in sources {
        let base = source.parent().unwrap_or_else(|| Path::new(""));

        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry.map_err(|e| FilerError::Io(e.into()))?;
            if entry.path() == archive {
                continue;
            }
            let name = archive_name(entry.path(), base);

            if entry.file_type().is_dir() {
                writer.add_directory(name, options)?;
            } else {
                writer.start_file(name, options)?;
                let mut input = fs::File::open(entry.path())?;
                io::copy(&mut input, &mut writer)?;
            }
        }
    }

    writer.finish()?;
    Ok(())
}

/// Entry name inside the archive: relative to `base`, `/`-separated.
fn archive_name(path: &Path, base: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Extract `archive` into `destination`, creating it if needed.
pub fn unzip(archive: &Path, destination: &Path) -> Result<Folder> {
    let file = fs::File::open(archive).map_err(|e| FilerError::from_io(e, archive))?;

    let mut zip = match ZipArchive::new(file) {
        Ok(zip) => zip,
        Err(ZipError::InvalidArchive(_)) | Err(ZipError::UnsupportedArchive(_)) => {
            return Err(FilerError::NotAZipFileToExtract(archive.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    fs::create_dir_all(destination).map_err(|e| FilerError::from_io(e, destination))?;
    zip.extract(destination)?;

    info!(archive = ?archive, destination = ?destination, entries = zip.len(), "Extracted archive");
    Folder::open(destination)
}
