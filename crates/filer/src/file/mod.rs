//! File and folder descriptors.
//!
//! These are immutable snapshots of filesystem entries. A [`Folder`] owns the
//! descriptors of its children; a [`File`] refers to its parent only by
//! location, so there are no ownership cycles.

pub mod entry;
pub mod folder;
pub mod kind;

pub use entry::File;
pub use folder::Folder;
pub use kind::FileType;
