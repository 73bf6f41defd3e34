//! Command implementations for overwatch-cli

pub mod backup;
pub mod build;
pub mod deploy;
pub mod libs;

pub use backup::run_backup;
pub use build::run_build_interface;
pub use deploy::run_deploy;
pub use libs::run_tidy_libs;
