//! File-backed credential store
//!
//! Two files live in the config directory:
//!
//! - `config.json`: tailnet name, token type, when the token was saved and
//!   when it expires
//! - `token`: the bearer token itself, owner-readable only on unix
//!
//! Both are written atomically.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "config.json";
pub const TOKEN_FILE: &str = "token";

const AUTH_HINT: &str = "Run 'tailnet-admin auth' first.";
const REAUTH_HINT: &str = "Run 'tailnet-admin auth' again.";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredConfig {
    tailnet: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    saved_at: DateTime<Utc>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Stored credentials for one tailnet
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub tailnet: String,
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(tailnet: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            tailnet: tailnet.into(),
            token: token.into(),
            expires_at: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("tailnet", &self.tailnet)
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// What the store currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    NotAuthenticated,
    Authenticated {
        tailnet: String,
        token_present: bool,
        expires_at: Option<DateTime<Utc>>,
    },
}

/// Credential storage rooted at a config directory
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    /// Store a token for a tailnet, replacing whatever was there
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn save(&self, tailnet: &str, token: &str, expires_in_secs: Option<u64>) -> Result<Session> {
        let now = Utc::now();
        let expires_at = expires_in_secs
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| now.checked_add_signed(delta));

        let config = StoredConfig {
            tailnet: tailnet.to_string(),
            token_type: default_token_type(),
            saved_at: now,
            expires_at,
        };

        write_atomic(&self.token_path(), token.as_bytes())?;
        write_atomic(&self.config_path(), &serde_json::to_vec_pretty(&config)?)?;
        debug!(dir = %self.dir.display(), tailnet, "Saved credentials");

        Ok(Session {
            tailnet: tailnet.to_string(),
            token: token.to_string(),
            expires_at,
        })
    }

    /// Load the stored session
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] when nothing is stored or the token
    /// is missing, and [`Error::InvalidConfig`] when the config file cannot
    /// be parsed.
    pub fn load(&self) -> Result<Session> {
        let Some(config) = self.read_config()? else {
            return Err(Error::not_authenticated(format!(
                "No stored authentication found. {AUTH_HINT}"
            )));
        };

        let token = match fs::read_to_string(self.token_path()) {
            Ok(token) => token.trim().to_string(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(Error::io(self.token_path(), e)),
        };
        if token.is_empty() {
            return Err(Error::not_authenticated(format!(
                "No stored token found. {REAUTH_HINT}"
            )));
        }

        let session = Session {
            tailnet: config.tailnet,
            token,
            expires_at: config.expires_at,
        };
        if session.is_expired(Utc::now()) {
            warn!(tailnet = %session.tailnet, "Stored token has expired");
        }
        Ok(session)
    }

    /// Report what is stored without failing on a missing token
    pub fn status(&self) -> Result<AuthStatus> {
        let Some(config) = self.read_config()? else {
            return Ok(AuthStatus::NotAuthenticated);
        };
        let token_present = fs::read_to_string(self.token_path())
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false);

        Ok(AuthStatus::Authenticated {
            tailnet: config.tailnet,
            token_present,
            expires_at: config.expires_at,
        })
    }

    /// Remove stored credentials
    ///
    /// Returns `false` if there was nothing to remove.
    pub fn clear(&self) -> Result<bool> {
        let mut removed = false;
        for path in [self.token_path(), self.config_path()] {
            match fs::remove_file(&path) {
                Ok(()) => removed = true,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(Error::io(path, e)),
            }
        }
        debug!(dir = %self.dir.display(), removed, "Cleared credentials");
        Ok(removed)
    }

    fn read_config(&self) -> Result<Option<StoredConfig>> {
        let path = self.config_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(path, e)),
        };

        let config: StoredConfig =
            serde_json::from_str(&content).map_err(|e| Error::InvalidConfig {
                path: path.clone(),
                message: format!("{e}. {REAUTH_HINT}"),
            })?;
        if config.tailnet.trim().is_empty() {
            return Err(Error::InvalidConfig {
                path,
                message: format!("missing tailnet. {REAUTH_HINT}"),
            });
        }
        Ok(Some(config))
    }
}

/// Write content atomically with an advisory lock on the temp file
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut temp_file = options
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::Lock {
            path: path.to_path_buf(),
        })?;
    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
    temp_file.unlock().map_err(|_| Error::Lock {
        path: path.to_path_buf(),
    })?;

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::new("example.com", "tskey-secret");
        let debug = format!("{:?}", session);
        assert!(!debug.contains("tskey-secret"));
        assert!(debug.contains("example.com"));
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let mut session = Session::new("example.com", "t");
        assert!(!session.is_expired(now));

        session.expires_at = Some(now - TimeDelta::seconds(1));
        assert!(session.is_expired(now));
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("file");

        write_atomic(&path, b"content").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let store = CredentialStore::new(temp.path());
        store.save("example.com", "t", None).unwrap();

        let mode = fs::metadata(temp.path().join(TOKEN_FILE))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
