//! Shared test utilities for the Overwatch tooling workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`device`]: one-shot HTTP stub standing in for a device's `/config`
//! - [`project`]: [`TestProject`] temporary project directory

pub mod device;
pub mod project;

pub use device::{StubDevice, unused_address};
pub use project::TestProject;
