//! Core tag-management layer for tailnet-admin
//!
//! This crate holds everything that decides *what* a bulk tag operation does,
//! independent of how devices are fetched or how changes are shown:
//!
//! - **Data model**: [`Device`] snapshots with an always-present tag list
//! - **Tag Rule Engine**: [`TagRule`] evaluation and the [`TagEngine`] that
//!   binds a rule to a [`DeviceDirectory`]
//! - **Change protocol**: the plan → preview → confirm → apply flow shared by
//!   every mutating command ([`ConfirmationProtocol`])
//! - **Inventory queries**: tag usage and device filtering for read-only views
//!
//! # Architecture
//!
//! ```text
//!                tailnet-cli
//!                /         \
//!        tailnet-api    (presentation)
//!                \         /
//!               tailnet-core
//! ```
//!
//! # Example
//!
//! ```
//! use tailnet_core::{Device, TagRule};
//!
//! let devices = vec![
//!     Device::new("d1", "web-1").with_tags(["prod", "web"]),
//!     Device::new("d2", "ci-1").with_tags(["staging"]),
//! ];
//!
//! let rule = TagRule::rename("prod", "live");
//! let records = rule.evaluate(&devices);
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].new_tags, vec!["live", "web"]);
//! ```

pub mod change;
pub mod device;
pub mod directory;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod protocol;
pub mod rules;

pub use change::{ApplyReport, ChangePlan, ChangeRecord, DeviceFailure, DeviceOutcome};
pub use device::{ApiKey, Device};
pub use directory::DeviceDirectory;
pub use engine::{Invocation, TagEngine};
pub use error::{Error, Result};
pub use inventory::{DeviceFilter, summarize_names, tag_usage};
pub use protocol::{ConfirmationProtocol, Outcome, ProtocolOptions, Reviewer};
pub use rules::TagRule;
