//! Device and key snapshots as seen by one command invocation

use serde::{Deserialize, Serialize};

/// A registered endpoint in the tailnet
///
/// Devices are produced by a directory fetch and treated as an immutable
/// snapshot for the rest of the command. The tag list is always present;
/// a device without tags simply has an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Stable device identifier
    pub id: String,
    /// Display name (hostname)
    pub name: String,
    /// Primary address, empty when the device reports none
    #[serde(default)]
    pub ip: String,
    /// Last-seen timestamp as reported by the API
    #[serde(default)]
    pub last_seen: String,
    /// Operating system label
    #[serde(default)]
    pub os: String,
    /// Tags in the order the API returned them
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Device {
    /// Create a device with only an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ip: String::new(),
            last_seen: String::new(),
            os: String::new(),
            tags: Vec::new(),
        }
    }

    /// Replace the tag list
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether the device carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// An API access key registered for the tailnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub expires: String,
}
