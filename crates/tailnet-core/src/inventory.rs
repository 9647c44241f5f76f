//! Read-only views over a device snapshot

use std::collections::BTreeMap;

use crate::device::Device;

/// Number of device names shown before a summary is truncated
pub const SUMMARY_LIMIT: usize = 5;

/// Group devices by tag
///
/// Tags come out sorted; devices under each tag keep snapshot order.
pub fn tag_usage(devices: &[Device]) -> BTreeMap<String, Vec<&Device>> {
    let mut usage: BTreeMap<String, Vec<&Device>> = BTreeMap::new();
    for device in devices {
        for tag in &device.tags {
            let entry = usage.entry(tag.clone()).or_default();
            // a tag listed twice on one device still counts the device once
            if !entry.iter().any(|d| d.id == device.id) {
                entry.push(device);
            }
        }
    }
    usage
}

/// Join device names, cutting off after [`SUMMARY_LIMIT`] with "and N more"
pub fn summarize_names(devices: &[&Device]) -> String {
    let shown: Vec<&str> = devices
        .iter()
        .take(SUMMARY_LIMIT)
        .map(|d| d.name.as_str())
        .collect();
    let mut summary = shown.join(", ");
    if devices.len() > SUMMARY_LIMIT {
        summary.push_str(&format!(" and {} more", devices.len() - SUMMARY_LIMIT));
    }
    summary
}

/// Optional name and tag filters for device listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    /// Case-insensitive substring of the device name
    pub name: Option<String>,
    /// Exact tag the device must carry
    pub tag: Option<String>,
}

impl DeviceFilter {
    pub fn matches(&self, device: &Device) -> bool {
        if let Some(name) = &self.name
            && !device.name.to_lowercase().contains(&name.to_lowercase())
        {
            return false;
        }
        if let Some(tag) = &self.tag
            && !device.has_tag(tag)
        {
            return false;
        }
        true
    }

    pub fn apply<'d>(&self, devices: &'d [Device]) -> Vec<&'d Device> {
        devices.iter().filter(|d| self.matches(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet() -> Vec<Device> {
        vec![
            Device::new("d1", "Web-1").with_tags(["prod", "web"]),
            Device::new("d2", "db-1").with_tags(["prod"]),
            Device::new("d3", "laptop"),
        ]
    }

    #[test]
    fn test_tag_usage_sorted_and_grouped() {
        let devices = fleet();
        let usage = tag_usage(&devices);

        let tags: Vec<&String> = usage.keys().collect();
        assert_eq!(tags, vec!["prod", "web"]);
        assert_eq!(usage["prod"].len(), 2);
        assert_eq!(usage["prod"][0].id, "d1");
        assert_eq!(usage["web"].len(), 1);
    }

    #[test]
    fn test_tag_usage_empty_fleet() {
        assert!(tag_usage(&[]).is_empty());
    }

    #[test]
    fn test_summarize_names_truncates() {
        let devices: Vec<Device> = (0..7)
            .map(|i| Device::new(format!("d{i}"), format!("host-{i}")))
            .collect();
        let refs: Vec<&Device> = devices.iter().collect();

        assert_eq!(
            summarize_names(&refs),
            "host-0, host-1, host-2, host-3, host-4 and 2 more"
        );
        assert_eq!(summarize_names(&refs[..2]), "host-0, host-1");
    }

    #[test]
    fn test_filter_name_is_case_insensitive() {
        let devices = fleet();
        let filter = DeviceFilter {
            name: Some("WEB".to_string()),
            tag: None,
        };
        let matched = filter.apply(&devices);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "d1");
    }

    #[test]
    fn test_filter_combines_name_and_tag() {
        let devices = fleet();
        let filter = DeviceFilter {
            name: Some("1".to_string()),
            tag: Some("web".to_string()),
        };
        let matched = filter.apply(&devices);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "d1");

        assert_eq!(DeviceFilter::default().apply(&devices).len(), 3);
    }
}
