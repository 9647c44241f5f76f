//! Change records, plans, and apply reports

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::rules::TagRule;

/// The before/after tag state computed for one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Device as it was in the snapshot
    pub device: Device,
    /// Tags at evaluation time
    pub old_tags: Vec<String>,
    /// Tags the rule wants the device to have
    pub new_tags: Vec<String>,
}

impl ChangeRecord {
    /// Create a record whose old tags are taken from the device snapshot
    pub fn new(device: Device, new_tags: Vec<String>) -> Self {
        let old_tags = device.tags.clone();
        Self {
            device,
            old_tags,
            new_tags,
        }
    }

    /// True when the device already has the target tags
    pub fn is_noop(&self) -> bool {
        self.old_tags == self.new_tags
    }
}

/// A device that could not be resolved or updated
///
/// Per-device failures are recoverable: they are collected next to the
/// records of the other devices and never abort the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFailure {
    pub device_id: String,
    pub device_name: Option<String>,
    pub reason: String,
}

impl DeviceFailure {
    pub fn new(device_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            device_name: None,
            reason: reason.into(),
        }
    }

    pub fn for_device(device: &Device, reason: impl Into<String>) -> Self {
        Self {
            device_id: device.id.clone(),
            device_name: Some(device.name.clone()),
            reason: reason.into(),
        }
    }
}

/// Result of the plan phase: what would happen, with nothing written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePlan {
    pub rule: TagRule,
    pub records: Vec<ChangeRecord>,
    /// Ids that could not be resolved while planning (`SetTags` only)
    pub failures: Vec<DeviceFailure>,
}

impl ChangePlan {
    pub fn new(rule: TagRule, records: Vec<ChangeRecord>) -> Self {
        Self {
            rule,
            records,
            failures: Vec::new(),
        }
    }

    /// Number of devices the rule selects, no-op records included
    pub fn affected(&self) -> usize {
        self.records.len()
    }

    /// Number of records whose tags actually differ
    pub fn changed(&self) -> usize {
        self.records.iter().filter(|r| !r.is_noop()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// What happened to one device during apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeviceOutcome {
    /// The new tags were written
    Applied(ChangeRecord),
    /// Nothing to write; the device already had the target tags
    Unchanged(ChangeRecord),
    /// Resolving or writing the device failed
    Failed(DeviceFailure),
}

impl DeviceOutcome {
    pub fn record(&self) -> Option<&ChangeRecord> {
        match self {
            Self::Applied(record) | Self::Unchanged(record) => Some(record),
            Self::Failed(_) => None,
        }
    }
}

/// Result of the apply phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub rule: TagRule,
    /// One outcome per device, in the order writes were issued
    pub outcomes: Vec<DeviceOutcome>,
}

impl ApplyReport {
    pub fn new(rule: TagRule) -> Self {
        Self {
            rule,
            outcomes: Vec::new(),
        }
    }

    /// Devices the apply phase attempted to handle
    pub fn planned(&self) -> usize {
        self.outcomes.len()
    }

    /// Devices whose tags were written
    pub fn applied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DeviceOutcome::Applied(_)))
            .count()
    }

    /// Devices that needed no write
    pub fn unchanged(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DeviceOutcome::Unchanged(_)))
            .count()
    }

    pub fn failures(&self) -> Vec<&DeviceFailure> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                DeviceOutcome::Failed(failure) => Some(failure),
                _ => None,
            })
            .collect()
    }

    /// Records computed during apply, failed devices excluded
    pub fn records(&self) -> Vec<&ChangeRecord> {
        self.outcomes.iter().filter_map(DeviceOutcome::record).collect()
    }

    /// True when no device failed
    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }
}
