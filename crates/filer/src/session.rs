//! The file-manager session.
//!
//! [`Filer`] owns the navigation history, the home lock and the clipboard,
//! and forwards one-shot operations to [`crate::ops`]. Relative paths given
//! to any method are resolved against the current location.
//!
//! A session is plain data mutated through `&mut self`; share one across
//! threads only behind your own lock.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::clipboard::{Clipboard, PasteOperation};
use crate::error::{FilerError, Result};
use crate::file::{File, Folder};
use crate::history::History;
use crate::location;
use crate::lock::LockGuard;
use crate::ops::{self, transfer, SearchQuery};

/// A file-manager session rooted at a home location.
#[derive(Debug, Clone)]
pub struct Filer {
    /// Location the session started at.
    home: PathBuf,
    /// Boundary check for navigation.
    lock: LockGuard,
    /// Visited locations.
    history: History,
    /// Pending copy/cut.
    clipboard: Clipboard,
    /// Whether [`Filer::list`] includes hidden entries.
    include_hidden: bool,
    /// Whether copy/move replace an existing target.
    overwrite: bool,
}

impl Filer {
    /// Open an unlocked session at `start`.
    pub fn new(start: impl AsRef<Path>) -> Result<Self> {
        Self::with_lock(start, false)
    }

    /// Open a session at `start`, optionally locked to it.
    ///
    /// `start` must be an existing directory. A locked session cannot
    /// navigate above `start` except through [`Filer::open_in_locked_home`].
    pub fn with_lock(start: impl AsRef<Path>, locked: bool) -> Result<Self> {
        let home = location::canonical_dir(start.as_ref())?;
        info!(home = ?home, locked, "Opening session");

        Ok(Self {
            lock: LockGuard::new(home.clone(), locked),
            history: History::new(home.clone()),
            home,
            clipboard: Clipboard::new(),
            include_hidden: false,
            overwrite: false,
        })
    }

    /// Set whether listings include hidden entries (default: false).
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Set whether copy, move and paste replace an existing target (default: false).
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        location::resolve(self.history.current(), path)
    }

    // Navigation

    /// Open `path`: a directory becomes the current location, a file is only
    /// described. Either way its descriptor is returned.
    ///
    /// Only directories go through the home lock. A file outside a locked
    /// home is described without error since nothing is navigated.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<File> {
        let resolved = self.resolve(path);
        if !resolved.is_dir() {
            return File::open(&resolved);
        }
        let target = location::canonical_dir(&resolved)?;
        self.lock.check(&target)?;
        let file = File::open(&target)?;
        self.visit(target);
        Ok(file)
    }

    /// Navigate into the directory at `path`.
    pub fn open_folder(&mut self, path: impl AsRef<Path>) -> Result<Folder> {
        let target = location::canonical_dir(&self.resolve(path))?;
        self.lock.check(&target)?;
        self.visit(target);
        Folder::open(self.history.current())
    }

    /// Navigate to the parent of the current location.
    pub fn go_up(&mut self) -> Result<&Path> {
        let parent = self
            .history
            .current()
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| FilerError::NoParentLocation(self.history.current().to_path_buf()))?;
        self.lock.check(&parent)?;
        self.visit(parent);
        Ok(self.history.current())
    }

    /// Step back in history.
    pub fn go_backward(&mut self) -> Result<&Path> {
        let target = self.history.peek_backward().ok_or(FilerError::NoBackwardHistory)?;
        self.lock.check(target)?;
        let current = self.history.go_backward()?;
        debug!(location = ?current, "Went backward");
        Ok(current)
    }

    /// Step forward in history.
    pub fn go_forward(&mut self) -> Result<&Path> {
        let target = self.history.peek_forward().ok_or(FilerError::NoForwardHistory)?;
        self.lock.check(target)?;
        let current = self.history.go_forward()?;
        debug!(location = ?current, "Went forward");
        Ok(current)
    }

    /// Navigate to `path` without consulting the home lock.
    ///
    /// The lock itself is left as it is; later navigation is checked again.
    pub fn open_in_locked_home(&mut self, path: impl AsRef<Path>) -> Result<Folder> {
        let target = location::canonical_dir(&self.resolve(path))?;
        if !self.lock.permits(&target) {
            info!(target = ?target, "Opening location outside locked home");
        }
        self.visit(target);
        Folder::open(self.history.current())
    }

    fn visit(&mut self, target: PathBuf) {
        if self.history.navigate_to(target) {
            debug!(location = ?self.history.current(), "Navigated");
        }
    }

    // Clipboard

    /// Put `path` on the clipboard to be copied by the next paste.
    pub fn copy(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let source = location::canonical_entry(&self.resolve(path))?;
        self.clipboard.copy(source);
        Ok(())
    }

    /// Put `path` on the clipboard to be moved by the next paste.
    pub fn cut(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let source = location::canonical_entry(&self.resolve(path))?;
        self.clipboard.cut(source);
        Ok(())
    }

    /// Copy `path` to `destination` right away. The clipboard is not touched.
    pub fn copy_to(&self, path: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<File> {
        let source = location::canonical_entry(&self.resolve(path))?;
        let target = target_for(&source, &self.resolve(destination))?;
        transfer::copy_entry(&source, &target, self.overwrite)
    }

    /// Move `path` to `destination` right away. The clipboard is not touched.
    pub fn cut_to(&self, path: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<File> {
        let source = location::canonical_entry(&self.resolve(path))?;
        let target = target_for(&source, &self.resolve(destination))?;
        transfer::move_entry(&source, &target, self.overwrite)
    }

    /// Carry out the pending copy or cut into `destination`.
    ///
    /// The clipboard is emptied only when the transfer succeeds, so a failed
    /// paste can be retried.
    pub fn paste(&mut self, destination: impl AsRef<Path>) -> Result<File> {
        let destination = self.resolve(destination);
        let overwrite = self.overwrite;

        self.clipboard.consume(|entry| {
            let target = target_for(&entry.source, &destination)?;
            match entry.operation {
                PasteOperation::Copy => transfer::copy_entry(&entry.source, &target, overwrite),
                PasteOperation::Cut => transfer::move_entry(&entry.source, &target, overwrite),
            }
        })
    }

    /// Source of the pending clipboard entry.
    pub fn clipboard(&self) -> Option<&Path> {
        self.clipboard.source()
    }

    /// Operation of the pending clipboard entry.
    pub fn paste_operation(&self) -> Option<PasteOperation> {
        self.clipboard.operation()
    }

    /// Drop the pending clipboard entry, if any.
    pub fn clear_clipboard(&mut self) {
        self.clipboard.clear();
    }

    // Inspection

    pub fn current_location(&self) -> &Path {
        self.history.current()
    }

    pub fn front_location(&self) -> Option<&Path> {
        self.history.front()
    }

    pub fn rear_location(&self) -> Option<&Path> {
        self.history.rear()
    }

    pub fn home_location(&self) -> &Path {
        &self.home
    }

    pub fn is_home_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// The enforced lock boundary, `None` when the session is unlocked.
    pub fn lock_boundary(&self) -> Option<&Path> {
        self.lock.is_locked().then(|| self.lock.boundary())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Entries of the current location.
    pub fn list(&self) -> Result<Vec<File>> {
        let folder = Folder::open(self.history.current())?;
        Ok(if self.include_hidden {
            folder.contains().to_vec()
        } else {
            folder.visible().cloned().collect()
        })
    }

    pub fn get_file(&self, path: impl AsRef<Path>) -> Result<File> {
        File::open(self.resolve(path))
    }

    pub fn get_folder(&self, path: impl AsRef<Path>) -> Result<Folder> {
        Folder::open(self.resolve(path))
    }

    pub fn is_file_exist(&self, path: impl AsRef<Path>) -> bool {
        self.resolve(path).exists()
    }

    // Mutation

    pub fn create_new_file(&self, path: impl AsRef<Path>) -> Result<File> {
        ops::entries::create_file(&self.resolve(path))
    }

    pub fn create_new_folder(&self, path: impl AsRef<Path>) -> Result<Folder> {
        ops::entries::create_folder(&self.resolve(path))
    }

    /// Delete a file or a whole directory.
    pub fn delete(&self, path: impl AsRef<Path>) -> Result<()> {
        let target = self.resolve(path);
        if self.history.current().starts_with(&target) {
            warn!(path = ?target, "Deleting the current location or one of its ancestors");
        }
        ops::entries::delete(&target)
    }

    pub fn rename(&self, path: impl AsRef<Path>, new_name: &str) -> Result<File> {
        ops::entries::rename(&self.resolve(path), new_name)
    }

    /// Hide an entry. Returns its location afterwards, which differs on Unix.
    pub fn hide(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        ops::hidden::hide(&self.resolve(path))
    }

    /// Unhide an entry. Returns its location afterwards.
    pub fn un_hide(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        ops::hidden::unhide(&self.resolve(path))
    }

    /// Compress `paths` into a new zip archive.
    pub fn zip<P: AsRef<Path>>(&self, paths: &[P], archive: impl AsRef<Path>) -> Result<File> {
        let sources: Vec<PathBuf> = paths.iter().map(|p| self.resolve(p)).collect();
        ops::archive::zip(&sources, &self.resolve(archive))
    }

    /// Extract a zip archive into `destination`.
    pub fn unzip(&self, archive: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<Folder> {
        ops::archive::unzip(&self.resolve(archive), &self.resolve(destination))
    }

    // Query

    /// Find entries beneath the current location whose names match `pattern`.
    pub fn search(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        ops::search::search(self.history.current(), &SearchQuery::name(pattern)?)
    }

    /// Run `query` beneath `root`.
    pub fn search_in(&self, root: impl AsRef<Path>, query: &SearchQuery) -> Result<Vec<PathBuf>> {
        ops::search::search(&self.resolve(root), query)
    }
}

/// Canonical target for sending `source` to `destination`.
fn target_for(source: &Path, destination: &Path) -> Result<PathBuf> {
    let destination = location::canonical_target(destination)?;
    transfer::resolve_target(source, &destination)
}
