//! Command implementations for tailnet-cli

pub mod auth;
pub mod devices;
pub mod tags;

pub use auth::{run_auth, run_logout, run_status, run_test_auth};
pub use devices::{run_devices, run_keys};
pub use tags::{run_device_tags, run_rule, run_tag_list};
