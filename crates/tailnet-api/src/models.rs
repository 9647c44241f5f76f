//! Wire models for the REST API
//!
//! The API omits fields freely, so everything except the id defaults.
//! Conversion into the core model happens here and nowhere else.

use serde::{Deserialize, Serialize};
use tailnet_core::{ApiKey, Device};

/// A device as returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDevice {
    pub id: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// `null` and absent both mean "no address"
    #[serde(default)]
    pub addresses: Option<Vec<String>>,
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    /// `null` and absent both mean "no tags"
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl From<RawDevice> for Device {
    fn from(raw: RawDevice) -> Self {
        let name = raw
            .hostname
            .filter(|h| !h.is_empty())
            .or(raw.name)
            .unwrap_or_default();
        Device {
            id: raw.id,
            name,
            ip: raw.addresses.into_iter().flatten().next().unwrap_or_default(),
            last_seen: raw.last_seen.unwrap_or_default(),
            os: raw.os.unwrap_or_default(),
            tags: raw.tags.unwrap_or_default(),
        }
    }
}

/// Body of `GET /tailnet/{tailnet}/devices`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceList {
    #[serde(default)]
    pub devices: Vec<RawDevice>,
}

/// An API key as returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawKey {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub expires: Option<String>,
}

impl From<RawKey> for ApiKey {
    fn from(raw: RawKey) -> Self {
        let name = raw
            .description
            .filter(|d| !d.is_empty())
            .or(raw.name)
            .unwrap_or_default();
        ApiKey {
            id: raw.id,
            name,
            created: raw.created.unwrap_or_default(),
            expires: raw.expires.unwrap_or_default(),
        }
    }
}

/// Body of `GET /tailnet/{tailnet}/keys`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyList {
    #[serde(default)]
    pub keys: Vec<RawKey>,
}

/// Body of `GET /tailnet/{tailnet}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TailnetInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub acls_enforced: Option<bool>,
}

/// Body of `POST /device/{id}/tags`
#[derive(Debug, Clone, Serialize)]
pub struct TagUpdate<'a> {
    pub tags: &'a [String],
}

/// Error body the API sends with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProblem {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_prefers_hostname_and_first_address() {
        let raw: RawDevice = serde_json::from_str(
            r#"{
                "id": "n1",
                "hostname": "web-1",
                "name": "web-1.example.ts.net",
                "addresses": ["100.64.0.1", "fd7a::1"],
                "lastSeen": "2024-01-01T00:00:00Z",
                "os": "linux",
                "tags": ["tag:prod"]
            }"#,
        )
        .unwrap();

        let device = Device::from(raw);
        assert_eq!(device.name, "web-1");
        assert_eq!(device.ip, "100.64.0.1");
        assert_eq!(device.last_seen, "2024-01-01T00:00:00Z");
        assert_eq!(device.tags, vec!["tag:prod"]);
    }

    #[test]
    fn test_device_with_null_tags_and_no_addresses() {
        let raw: RawDevice =
            serde_json::from_str(r#"{"id": "n2", "name": "laptop", "tags": null}"#).unwrap();

        let device = Device::from(raw);
        assert_eq!(device.name, "laptop");
        assert_eq!(device.ip, "");
        assert!(device.tags.is_empty());
    }

    #[test]
    fn test_device_with_null_addresses() {
        let raw: RawDevice = serde_json::from_str(
            r#"{"id": "n3", "hostname": "edge", "addresses": null, "tags": null}"#,
        )
        .unwrap();

        let device = Device::from(raw);
        assert_eq!(device.ip, "");
        assert!(device.tags.is_empty());
    }

    #[test]
    fn test_device_list_tolerates_null_fields() {
        let list: DeviceList = serde_json::from_str(
            r#"{"devices": [
                {"id": "n1", "hostname": "a", "addresses": null, "tags": null},
                {"id": "n2", "hostname": "b", "addresses": [], "tags": ["tag:x"]}
            ]}"#,
        )
        .unwrap();

        let devices: Vec<Device> = list.devices.into_iter().map(Device::from).collect();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].ip, "");
        assert_eq!(devices[1].ip, "");
        assert_eq!(devices[1].tags, vec!["tag:x"]);
    }

    #[test]
    fn test_key_prefers_description() {
        let raw: RawKey = serde_json::from_str(
            r#"{"id": "k1", "description": "ci key", "created": "2024-01-01", "expires": "2024-04-01"}"#,
        )
        .unwrap();

        let key = ApiKey::from(raw);
        assert_eq!(key.name, "ci key");
        assert_eq!(key.expires, "2024-04-01");
    }

    #[test]
    fn test_tag_update_body() {
        let tags = vec!["tag:a".to_string()];
        let body = serde_json::to_string(&TagUpdate { tags: &tags }).unwrap();
        assert_eq!(body, r#"{"tags":["tag:a"]}"#);
    }

    #[test]
    fn test_tailnet_info_fields_are_optional() {
        let info: TailnetInfo = serde_json::from_str(r#"{"name": "example.com"}"#).unwrap();
        assert_eq!(info.name.as_deref(), Some("example.com"));
        assert_eq!(info.created, None);
        assert_eq!(info.acls_enforced, None);

        let info: TailnetInfo =
            serde_json::from_str(r#"{"name": "x", "created": "2024-01-01", "acls_enforced": true}"#)
                .unwrap();
        assert_eq!(info.acls_enforced, Some(true));
    }
}
