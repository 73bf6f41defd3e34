//! Error types for overwatch-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from overwatch-sync
    #[error(transparent)]
    Sync(#[from] overwatch_sync::Error),

    /// Error from overwatch-build
    #[error(transparent)]
    Build(#[from] overwatch_build::Error),

    /// Error from overwatch-fs
    #[error(transparent)]
    Fs(#[from] overwatch_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// A firmware toolchain step exited unsuccessfully
    #[error("{step} failed ({command}): {}", describe_exit(.code))]
    Firmware {
        step: String,
        command: String,
        code: Option<i32>,
    },

    /// A firmware toolchain step could not be started
    #[error("Could not start {command}")]
    FirmwareSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}
