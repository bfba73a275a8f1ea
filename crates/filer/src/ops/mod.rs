//! One-shot filesystem primitives.
//!
//! Each function performs a single action and returns a fresh descriptor of
//! the result. None of them keep state between calls; the session facade
//! resolves paths and forwards to them.
//!
//! - [`transfer`]: copy and move with collision checks
//! - [`entries`]: create, delete and rename
//! - [`hidden`]: hide and unhide
//! - [`archive`]: zip and unzip
//! - [`search`]: recursive name and content search

pub mod archive;
pub mod entries;
pub mod hidden;
pub mod search;
pub mod transfer;

pub use search::SearchQuery;
