//! Shared test utilities for the tailnet-admin workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only; it is never published.
//!
//! # Modules
//!
//! - [`directory`]: [`FakeDirectory`], an in-memory device directory with a
//!   call log and failure injection
//! - [`fixtures`]: device builders and the sample fleet used across suites
//! - [`reviewer`]: [`ScriptedReviewer`] that answers confirmation prompts
//! - [`config_dir`]: [`TestConfigDir`] for credential store tests

pub mod config_dir;
pub mod directory;
pub mod fixtures;
pub mod reviewer;

pub use config_dir::TestConfigDir;
pub use directory::{Call, FakeDirectory};
pub use fixtures::{device, sample_fleet};
pub use reviewer::ScriptedReviewer;
