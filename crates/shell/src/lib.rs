//! # JFiler Shell Library
//!
//! Command line front end for the [`filer`] crate: configuration loading,
//! terminal rendering of file descriptors and the interactive command loop
//! used by the `jfiler` binary.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration with environment overrides
//! - [`repl`]: Line-oriented interactive shell over a session
//! - [`view`]: Text and JSON rendering of entries

pub mod config;
pub mod repl;
pub mod view;

pub use config::{Config, ConfigError};
pub use repl::{Command, Outcome, Repl, ReplError};
