//! Filesystem layer for the Overwatch tooling
//!
//! Resolves where the tooling reads and writes relative to the project root,
//! loads the optional `overwatch.toml`, and provides atomic writes so an
//! interrupted run never leaves a half-written document behind.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;

pub use config::ToolConfig;
pub use constants::ProjectPath;
pub use error::{Error, Result};
pub use layout::ProjectLayout;
