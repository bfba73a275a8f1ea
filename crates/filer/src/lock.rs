//! Locked-home boundary.
//!
//! A locked session may only navigate to its home or to locations beneath
//! it. Containment is checked component-wise on canonical paths, so
//! `/home/user2` is not inside `/home/user`.

use std::path::{Path, PathBuf};

use crate::error::{FilerError, Result};

/// Boundary check for navigation.
#[derive(Debug, Clone)]
pub struct LockGuard {
    /// Topmost allowed ancestor.
    boundary: PathBuf,
    /// Whether the boundary is enforced.
    locked: bool,
}

impl LockGuard {
    /// Create a guard with the given boundary.
    pub fn new(boundary: PathBuf, locked: bool) -> Self {
        Self { boundary, locked }
    }

    /// Create a guard that permits everything.
    pub fn unlocked(boundary: PathBuf) -> Self {
        Self::new(boundary, false)
    }

    pub fn boundary(&self) -> &Path {
        &self.boundary
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether `candidate` may be navigated to.
    pub fn permits(&self, candidate: &Path) -> bool {
        !self.locked || candidate.starts_with(&self.boundary)
    }

    /// Fail with [`FilerError::HomeIsLocked`] if `candidate` is outside the boundary.
    pub fn check(&self, candidate: &Path) -> Result<()> {
        if self.permits(candidate) {
            Ok(())
        } else {
            tracing::debug!(target = ?candidate, home = ?self.boundary, "Navigation rejected by home lock");
            Err(FilerError::HomeIsLocked {
                target: candidate.to_path_buf(),
                home: self.boundary.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlocked_permits_everything() {
        let guard = LockGuard::unlocked(PathBuf::from("/home/user"));
        assert!(guard.permits(Path::new("/etc")));
        assert!(guard.check(Path::new("/")).is_ok());
    }

    #[test]
    fn test_locked_permits_boundary_and_descendants() {
        let guard = LockGuard::new(PathBuf::from("/home/user"), true);
        assert!(guard.permits(Path::new("/home/user")));
        assert!(guard.permits(Path::new("/home/user/docs/2024")));
    }

    #[test]
    fn test_locked_rejects_ancestors_and_siblings() {
        let guard = LockGuard::new(PathBuf::from("/home/user"), true);
        assert!(!guard.permits(Path::new("/home")));
        assert!(!guard.permits(Path::new("/")));
        assert!(!guard.permits(Path::new("/home/user2")));
        assert!(!guard.permits(Path::new("/etc")));
    }

    #[test]
    fn test_check_error_carries_paths() {
        let guard = LockGuard::new(PathBuf::from("/home/user"), true);
        match guard.check(Path::new("/etc")) {
            Err(FilerError::HomeIsLocked { target, home }) => {
                assert_eq!(target, PathBuf::from("/etc"));
                assert_eq!(home, PathBuf::from("/home/user"));
            }
            other => panic!("expected HomeIsLocked, got {:?}", other),
        }
    }
}
