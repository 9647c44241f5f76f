//! Tag rules
//!
//! A [`TagRule`] is a pure function of a device snapshot: it decides which
//! devices are selected and what each selected device's tag list becomes.
//! Rules never look at anything but the snapshot and their own parameters,
//! so planning and applying the same rule over the same snapshot always
//! produce the same records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::change::ChangeRecord;
use crate::device::Device;

/// A bulk tag operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TagRule {
    /// Replace every occurrence of `from` with `to`
    Rename { from: String, to: String },

    /// Append `tag` to devices that carry `existing`
    AddIfHas { existing: String, tag: String },

    /// Append `tag` to devices that do not carry `missing`
    AddIfMissing { missing: String, tag: String },

    /// Drop every occurrence of `tag`
    RemoveAll { tag: String },

    /// Overwrite the tag list of specific devices
    SetTags {
        device_ids: Vec<String>,
        tags: Vec<String>,
    },
}

impl TagRule {
    pub fn rename(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Rename {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn add_if_has(existing: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::AddIfHas {
            existing: existing.into(),
            tag: tag.into(),
        }
    }

    pub fn add_if_missing(missing: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::AddIfMissing {
            missing: missing.into(),
            tag: tag.into(),
        }
    }

    pub fn remove_all(tag: impl Into<String>) -> Self {
        Self::RemoveAll { tag: tag.into() }
    }

    /// Build a set rule; repeated ids and repeated tags keep their first occurrence
    pub fn set_tags<I, J, S, T>(device_ids: I, tags: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::SetTags {
            device_ids: dedup(device_ids.into_iter().map(Into::into)),
            tags: dedup(tags.into_iter().map(Into::into)),
        }
    }

    /// Whether a selected device is written even when its tags do not change
    ///
    /// The conditional add rules skip the remote call for devices that
    /// already carry the tag; every other rule always writes.
    pub fn writes_unchanged(&self) -> bool {
        !matches!(self, Self::AddIfHas { .. } | Self::AddIfMissing { .. })
    }

    /// Whether `device` is selected by this rule
    pub fn selects(&self, device: &Device) -> bool {
        match self {
            Self::Rename { from, .. } => device.has_tag(from),
            Self::AddIfHas { existing, .. } => device.has_tag(existing),
            Self::AddIfMissing { missing, .. } => !device.has_tag(missing),
            Self::RemoveAll { tag } => device.has_tag(tag),
            Self::SetTags { device_ids, .. } => device_ids.iter().any(|id| *id == device.id),
        }
    }

    /// Compute the new tag list from the current one
    pub fn rewrite(&self, current: &[String]) -> Vec<String> {
        match self {
            Self::Rename { from, to } => {
                // `to` appears at most once, at its first position
                let mut next: Vec<String> = Vec::with_capacity(current.len());
                for tag in current {
                    let tag = if tag == from { to } else { tag };
                    if tag == to && next.contains(tag) {
                        continue;
                    }
                    next.push(tag.clone());
                }
                next
            }
            Self::AddIfHas { tag, .. } | Self::AddIfMissing { tag, .. } => {
                let mut next = current.to_vec();
                if !next.iter().any(|t| t == tag) {
                    next.push(tag.clone());
                }
                next
            }
            Self::RemoveAll { tag } => current.iter().filter(|t| *t != tag).cloned().collect(),
            Self::SetTags { tags, .. } => tags.clone(),
        }
    }

    /// Produce the change record for one device, or `None` if it is not selected
    pub fn change_for(&self, device: &Device) -> Option<ChangeRecord> {
        if !self.selects(device) {
            return None;
        }
        let new_tags = self.rewrite(&device.tags);
        Some(ChangeRecord::new(device.clone(), new_tags))
    }

    /// Evaluate the rule over a snapshot
    ///
    /// Scanning rules return records in snapshot order. `SetTags` returns
    /// records in the order of its id list; ids absent from the snapshot are
    /// left out.
    pub fn evaluate(&self, devices: &[Device]) -> Vec<ChangeRecord> {
        match self {
            Self::SetTags { device_ids, .. } => device_ids
                .iter()
                .filter_map(|id| devices.iter().find(|d| d.id == *id))
                .filter_map(|device| self.change_for(device))
                .collect(),
            _ => devices
                .iter()
                .filter_map(|device| self.change_for(device))
                .collect(),
        }
    }
}

impl fmt::Display for TagRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rename { from, to } => write!(f, "rename tag {} -> {}", from, to),
            Self::AddIfHas { existing, tag } => {
                write!(f, "add tag {} to devices with tag {}", tag, existing)
            }
            Self::AddIfMissing { missing, tag } => {
                write!(f, "add tag {} to devices without tag {}", tag, missing)
            }
            Self::RemoveAll { tag } => write!(f, "remove tag {} from all devices", tag),
            Self::SetTags { device_ids, tags } => {
                let tags = if tags.is_empty() {
                    "none".to_string()
                } else {
                    tags.join(", ")
                };
                write!(f, "set tags for {} devices: {}", device_ids.len(), tags)
            }
        }
    }
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
