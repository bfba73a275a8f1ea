//! Presentation of file descriptors for the terminal.
//!
//! [`EntryView`] is the flat, serialisable shape printed by `ls --json` and
//! `info --json`; [`EntryView::line`] is the plain-text row.

use std::path::PathBuf;
use std::time::SystemTime;

use filer::{File, FileType};
use serde::Serialize;

/// One listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub name: String,
    pub location: PathBuf,
    pub file_type: FileType,
    pub size: u64,
    /// Seconds since the Unix epoch, 0 when unknown.
    pub modified: u64,
    pub hidden: bool,
}

impl EntryView {
    pub fn from_file(file: &File) -> Self {
        Self {
            name: file.name().to_string(),
            location: file.location().to_path_buf(),
            file_type: file.file_type(),
            size: file.size(),
            modified: epoch_secs(file.modified()),
            hidden: file.is_hidden(),
        }
    }

    /// Plain-text row: type, size, name (folders get a trailing `/`).
    pub fn line(&self) -> String {
        let suffix = if self.file_type == FileType::Folder { "/" } else { "" };
        format!(
            "{:<10} {:>10}  {}{}",
            self.file_type.as_str(),
            human_size(self.size),
            self.name,
            suffix
        )
    }
}

fn epoch_secs(time: Option<SystemTime>) -> u64 {
    time.and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Format a byte count with a binary unit.
pub fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Render a listing either as a JSON array or as one line per entry.
pub fn render_entries(files: &[File], json: bool) -> serde_json::Result<String> {
    let views: Vec<EntryView> = files.iter().map(EntryView::from_file).collect();
    if json {
        return serde_json::to_string_pretty(&views);
    }
    Ok(views.iter().map(EntryView::line).collect::<Vec<_>>().join("\n"))
}

/// Render a single entry's details.
pub fn render_info(file: &File, json: bool) -> serde_json::Result<String> {
    let view = EntryView::from_file(file);
    if json {
        return serde_json::to_string_pretty(&view);
    }

    let mut out = format!(
        "name:     {}\nlocation: {}\ntype:     {}\nsize:     {}\nhidden:   {}",
        view.name,
        view.location.display(),
        view.file_type,
        human_size(view.size),
        view.hidden
    );
    if let Some(extension) = file.extension() {
        out.push_str(&format!("\nextension: {}", extension));
    }
    if let Some(parent) = file.parent_location() {
        out.push_str(&format!("\nparent:   {}", parent.display()));
    }
    Ok(out)
}
