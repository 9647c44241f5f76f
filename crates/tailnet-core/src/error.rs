//! Error types for tailnet-core

/// Result type for tailnet-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while planning or applying tag changes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Credentials are missing or invalid; raised before any rule runs
    #[error("{message}")]
    Configuration { message: String },

    /// Network or API failure talking to the directory
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The directory does not know a device id
    #[error("Device not found: {id}")]
    DeviceNotFound { id: String },

    /// The operator prompt could not be shown or read
    #[error("Interactive prompt error: {message}")]
    Interaction { message: String },
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn interaction(message: impl Into<String>) -> Self {
        Self::Interaction {
            message: message.into(),
        }
    }
}
