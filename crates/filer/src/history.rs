//! Navigation history.
//!
//! Browser-style history: an ordered list of visited locations with a
//! pointer to the current one. Navigating somewhere new while not at the end
//! drops everything after the pointer.

use std::path::{Path, PathBuf};

use crate::error::{FilerError, Result};

/// Visited locations with a current index.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<PathBuf>,
    current: usize,
}

impl History {
    /// Start a history at `start`.
    pub fn new(start: PathBuf) -> Self {
        Self {
            entries: vec![start],
            current: 0,
        }
    }

    /// Visit `location`.
    ///
    /// Returns `false` without changing anything when `location` is already
    /// current. Otherwise forward entries are discarded and `location`
    /// becomes the newest entry.
    pub fn navigate_to(&mut self, location: PathBuf) -> bool {
        if location == self.entries[self.current] {
            return false;
        }
        self.entries.truncate(self.current + 1);
        self.entries.push(location);
        self.current += 1;
        true
    }

    /// Step back one entry.
    pub fn go_backward(&mut self) -> Result<&Path> {
        if self.current == 0 {
            return Err(FilerError::NoBackwardHistory);
        }
        self.current -= 1;
        Ok(self.current())
    }

    /// Step forward one entry.
    pub fn go_forward(&mut self) -> Result<&Path> {
        if self.current + 1 >= self.entries.len() {
            return Err(FilerError::NoForwardHistory);
        }
        self.current += 1;
        Ok(self.current())
    }

    /// The current location.
    pub fn current(&self) -> &Path {
        &self.entries[self.current]
    }

    /// The entry after the current one.
    pub fn front(&self) -> Option<&Path> {
        self.entries.get(self.current + 1).map(PathBuf::as_path)
    }

    /// The entry before the current one.
    pub fn rear(&self) -> Option<&Path> {
        self.current
            .checked_sub(1)
            .map(|i| self.entries[i].as_path())
    }

    /// Where [`History::go_backward`] would land, without moving.
    pub fn peek_backward(&self) -> Option<&Path> {
        self.rear()
    }

    /// Where [`History::go_forward`] would land, without moving.
    pub fn peek_forward(&self) -> Option<&Path> {
        self.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current entry.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }
}
