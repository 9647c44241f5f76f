//! Per-invocation context
//!
//! Resolved settings and the credential store, built once from the global
//! flags and handed to every command. Commands that talk to the API ask the
//! context for a client; nothing is cached between processes.

use std::path::Path;

use tailnet_api::{ApiClient, CredentialStore, Session, Settings};
use tracing::debug;

use crate::cli::Cli;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Context {
    settings: Settings,
    store: CredentialStore,
}

impl Context {
    pub fn new(api_url: Option<&str>, config_dir: Option<&Path>, timeout: Option<u64>) -> Result<Self> {
        let settings = Settings::resolve(api_url, config_dir, timeout)?;
        debug!(
            api_url = %settings.api_url,
            config_dir = %settings.config_dir.display(),
            "Resolved settings"
        );
        let store = CredentialStore::new(&settings.config_dir);
        Ok(Self { settings, store })
    }

    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Self::new(cli.api_url.as_deref(), cli.config_dir.as_deref(), cli.timeout)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Client for the stored session
    pub fn client(&self) -> Result<ApiClient> {
        let session = self.store.load()?;
        self.client_for(&session)
    }

    /// Client for an explicit session, used before it is stored
    pub fn client_for(&self, session: &Session) -> Result<ApiClient> {
        Ok(ApiClient::new(&self.settings, session)?)
    }
}
