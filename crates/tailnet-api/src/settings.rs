//! Settings resolution
//!
//! Flags and environment variables are folded in by the CLI; this module
//! only validates them and fills in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Base URL of the public API
pub const DEFAULT_API_URL: &str = "https://api.tailscale.com/api/v2";

/// Directory name under the platform config dir
pub const APP_DIR: &str = "tailnet-admin";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: Url,
    pub config_dir: PathBuf,
    pub timeout: Duration,
}

impl Settings {
    /// Resolve settings from optional overrides
    ///
    /// Uses the platform-appropriate config directory when none is given:
    /// - Linux: `~/.config/tailnet-admin/`
    /// - macOS: `~/Library/Application Support/tailnet-admin/`
    /// - Windows: `%APPDATA%\tailnet-admin\`
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL does not parse or no config directory
    /// can be determined.
    pub fn resolve(
        api_url: Option<&str>,
        config_dir: Option<&Path>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let raw = api_url.unwrap_or(DEFAULT_API_URL);
        let api_url = Url::parse(raw).map_err(|e| Error::InvalidUrl {
            input: raw.to_string(),
            message: e.to_string(),
        })?;
        if api_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                input: raw.to_string(),
                message: "URL cannot be used as a base".to_string(),
            });
        }

        let config_dir = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_config_dir().ok_or(Error::NoConfigDir)?,
        };

        Ok(Self {
            api_url,
            config_dir,
            timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

/// Platform config directory for tailnet-admin, if the platform has one
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR))
}
