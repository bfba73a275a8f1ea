//! Single-slot clipboard for copy/cut then paste.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FilerError, Result};

/// What a paste will do with the clipboard source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasteOperation {
    /// Source stays where it is.
    Copy,
    /// Source is moved.
    Cut,
}

impl fmt::Display for PasteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => f.write_str("copy"),
            Self::Cut => f.write_str("cut"),
        }
    }
}

/// A pending clipboard entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    pub source: PathBuf,
    pub operation: PasteOperation,
}

/// Holds at most one pending entry. A new copy or cut replaces it.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    slot: Option<ClipboardEntry>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `source` on the clipboard for copying.
    pub fn copy(&mut self, source: PathBuf) {
        self.set(source, PasteOperation::Copy);
    }

    /// Put `source` on the clipboard for moving.
    pub fn cut(&mut self, source: PathBuf) {
        self.set(source, PasteOperation::Cut);
    }

    fn set(&mut self, source: PathBuf, operation: PasteOperation) {
        if let Some(previous) = &self.slot {
            tracing::debug!(previous = ?previous.source, "Replacing pending clipboard entry");
        }
        tracing::debug!(source = ?source, %operation, "Clipboard set");
        self.slot = Some(ClipboardEntry { source, operation });
    }

    /// Pending source, if any.
    pub fn source(&self) -> Option<&Path> {
        self.slot.as_ref().map(|e| e.source.as_path())
    }

    /// Pending operation, if any.
    pub fn operation(&self) -> Option<PasteOperation> {
        self.slot.as_ref().map(|e| e.operation)
    }

    /// The pending entry, or [`FilerError::NoClipboardOperationPending`].
    pub fn pending(&self) -> Result<&ClipboardEntry> {
        self.slot
            .as_ref()
            .ok_or(FilerError::NoClipboardOperationPending)
    }

    /// Run `paste` against the pending entry and clear the slot only if it succeeds.
    pub fn consume<T, F>(&mut self, paste: F) -> Result<T>
    where
        F: FnOnce(&ClipboardEntry) -> Result<T>,
    {
        let result = paste(self.pending()?)?;
        self.slot = None;
        Ok(result)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let clipboard = Clipboard::new();
        assert!(clipboard.is_empty());
        assert!(clipboard.source().is_none());
        assert!(clipboard.operation().is_none());
    }

    #[test]
    fn test_copy_then_cut_overwrites() {
        let mut clipboard = Clipboard::new();
        clipboard.copy(PathBuf::from("/p"));
        assert_eq!(clipboard.source(), Some(Path::new("/p")));
        assert_eq!(clipboard.operation(), Some(PasteOperation::Copy));

        clipboard.cut(PathBuf::from("/q"));
        assert_eq!(clipboard.source(), Some(Path::new("/q")));
        assert_eq!(clipboard.operation(), Some(PasteOperation::Cut));
    }

    #[test]
    fn test_consume_empty_fails() {
        let mut clipboard = Clipboard::new();
        let result = clipboard.consume(|_| Ok(()));
        assert!(matches!(result, Err(FilerError::NoClipboardOperationPending)));
    }

    #[test]
    fn test_consume_success_clears() {
        let mut clipboard = Clipboard::new();
        clipboard.cut(PathBuf::from("/p"));

        let op = clipboard.consume(|entry| Ok(entry.operation)).unwrap();

        assert_eq!(op, PasteOperation::Cut);
        assert!(clipboard.is_empty());
    }

    #[test]
    fn test_consume_failure_keeps_entry() {
        let mut clipboard = Clipboard::new();
        clipboard.copy(PathBuf::from("/p"));

        let result: Result<()> =
            clipboard.consume(|entry| Err(FilerError::AlreadyExists(entry.source.clone())));

        assert!(matches!(result, Err(FilerError::AlreadyExists(_))));
        assert_eq!(clipboard.source(), Some(Path::new("/p")));
        assert_eq!(clipboard.operation(), Some(PasteOperation::Copy));
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(PasteOperation::Copy.to_string(), "copy");
        assert_eq!(PasteOperation::Cut.to_string(), "cut");
    }
}
