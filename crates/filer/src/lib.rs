//! # JFiler Core Library
//!
//! This crate provides the state machine and filesystem primitives behind
//! the JFiler file manager.
//!
//! ## Overview
//!
//! A [`Filer`] session starts at a home location and keeps:
//!
//! - **History**: browser-style backward/forward navigation with branch truncation
//! - **Home Lock**: an optional boundary that keeps navigation at or below home
//! - **Clipboard**: a single pending copy or cut, consumed by paste
//!
//! On top of that it forwards stateless operations (create, delete, rename,
//! hide, zip, unzip, search) to [`ops`], resolving relative paths against
//! the current location.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use filer::Filer;
//!
//! # fn main() -> filer::Result<()> {
//! let mut filer = Filer::with_lock("/home/user", true)?;
//! filer.open_folder("docs")?;
//! filer.copy("report.txt")?;
//! filer.go_backward()?;
//! filer.paste(".")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`session`]: The session facade
//! - [`history`]: Navigation history
//! - [`lock`]: Locked-home boundary
//! - [`clipboard`]: Pending copy/cut
//! - [`file`]: File and folder descriptors
//! - [`ops`]: Filesystem primitives
//! - [`location`]: Path resolution helpers
//! - [`error`]: Error types

pub mod clipboard;
pub mod error;
pub mod file;
pub mod history;
pub mod location;
pub mod lock;
pub mod ops;
pub mod session;

pub use clipboard::{Clipboard, ClipboardEntry, PasteOperation};
pub use error::{FilerError, Result};
pub use file::{File, FileType, Folder};
pub use history::History;
pub use lock::LockGuard;
pub use ops::SearchQuery;
pub use session::Filer;
