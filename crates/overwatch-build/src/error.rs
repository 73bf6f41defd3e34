//! Error types for overwatch-build

use crate::toolchain::BuildStep;

/// Result type for overwatch-build operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while checking or running an interface build
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A toolchain step exited unsuccessfully
    #[error("Interface {step} failed ({command}): {}", describe_exit(.code))]
    BuildFailed {
        step: BuildStep,
        command: String,
        /// `None` when the process was terminated by a signal
        code: Option<i32>,
    },

    /// A toolchain program could not be started at all
    #[error("Failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading sources or writing the fingerprint failed
    #[error(transparent)]
    Fs(#[from] overwatch_fs::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}
