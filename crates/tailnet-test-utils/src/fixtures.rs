//! Device fixtures.

use tailnet_core::Device;

/// Build a device with the given tags.
pub fn device(id: &str, name: &str, tags: &[&str]) -> Device {
    Device::new(id, name).with_tags(tags.iter().copied())
}

/// A small fleet with overlapping tags and one untagged device.
///
/// | id | name | tags |
/// |----|------|------|
/// | d1 | web-1 | prod, web |
/// | d2 | web-2 | staging, web |
/// | d3 | db-1 | prod, db |
/// | d4 | laptop | (none) |
pub fn sample_fleet() -> Vec<Device> {
    vec![
        device("d1", "web-1", &["prod", "web"]),
        device("d2", "web-2", &["staging", "web"]),
        device("d3", "db-1", &["prod", "db"]),
        device("d4", "laptop", &[]),
    ]
}
