//! Error types for tailnet-api

use std::path::PathBuf;

/// Result type for tailnet-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the API or the credential store
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the response not read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The API does not know the device
    #[error("Device not found: {id}")]
    NotFound { id: String },

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    Lock { path: PathBuf },

    /// No usable stored credentials
    #[error("{message}")]
    NotAuthenticated { message: String },

    /// The stored config exists but cannot be used
    #[error("Invalid config file at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Could not determine a configuration directory. Pass --config-dir.")]
    NoConfigDir,

    #[error("Invalid URL '{input}': {message}")]
    InvalidUrl { input: String, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::NotAuthenticated {
            message: message.into(),
        }
    }

    /// True for 401 and 403 responses
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

impl From<Error> for tailnet_core::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::NotFound { id } => tailnet_core::Error::DeviceNotFound { id },
            Error::NotAuthenticated { .. } | Error::InvalidConfig { .. } | Error::NoConfigDir => {
                tailnet_core::Error::configuration(error.to_string())
            }
            other if other.is_auth_failure() => tailnet_core::Error::transport(format!(
                "{}. Try running 'tailnet-admin auth' again.",
                other
            )),
            other => tailnet_core::Error::transport(other.to_string()),
        }
    }
}
