//! Remote collaborators for tailnet-admin
//!
//! This crate connects the core engine to the outside world:
//!
//! - [`ApiClient`]: a blocking HTTP client that implements
//!   [`tailnet_core::DeviceDirectory`] and lists API keys
//! - [`CredentialStore`]: file-backed storage for the tailnet name and the
//!   access token
//! - [`Settings`]: API URL, config directory, and timeout resolution
//!
//! The client is an explicit handle built from a [`Session`]; nothing here is
//! held in global state.

pub mod client;
pub mod credentials;
pub mod error;
pub mod models;
pub mod settings;

pub use client::ApiClient;
pub use credentials::{AuthStatus, CredentialStore, Session};
pub use error::{Error, Result};
pub use settings::{DEFAULT_API_URL, Settings};
