//! Error types for overwatch-sync

/// Result type for overwatch-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synchronizing a device configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The device could not be reached or did not answer in time
    #[error("Could not connect to device at {url}: {reason}")]
    Connect { url: String, reason: String },

    /// The device answered with something other than 200
    #[error("Device returned HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    /// The body is not valid JSON or does not match the config schema
    #[error("Invalid config document: {message}")]
    Format { message: String },

    /// The HTTP client could not be set up
    #[error("Failed to initialise HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Writing the archive or staged document failed
    #[error(transparent)]
    Fs(#[from] overwatch_fs::Error),
}

impl Error {
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }
}
