//! [`FakeDirectory`] for engine and protocol tests.

use std::cell::RefCell;
use std::collections::HashSet;

use tailnet_core::{Device, DeviceDirectory, Error, Result};

/// A directory call, recorded in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchAll,
    Get(String),
    Update { id: String, tags: Vec<String> },
}

/// An in-memory [`DeviceDirectory`].
///
/// Successful updates are written back into the stored devices, so a second
/// rule invocation sees the post-mutation state.
///
/// # Example
///
/// ```rust
/// use tailnet_core::{TagEngine, TagRule};
/// use tailnet_test_utils::{FakeDirectory, device};
///
/// let directory = FakeDirectory::new(vec![device("d1", "web-1", &["prod"])]);
/// let engine = TagEngine::new(&directory);
/// engine.apply(&TagRule::remove_all("prod")).unwrap();
///
/// assert!(directory.device("d1").unwrap().tags.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct FakeDirectory {
    devices: RefCell<Vec<Device>>,
    calls: RefCell<Vec<Call>>,
    fetch_error: Option<String>,
    failing_updates: HashSet<String>,
}

impl FakeDirectory {
    pub fn new(devices: Vec<Device>) -> Self {
        Self {
            devices: RefCell::new(devices),
            ..Self::default()
        }
    }

    /// Make every read (`fetch_all_devices` and `get_device`) fail with a
    /// transport error.
    pub fn with_fetch_error(mut self, message: &str) -> Self {
        self.fetch_error = Some(message.to_string());
        self
    }

    /// Make `update_device_tags` fail for the given device id.
    pub fn with_failing_update(mut self, id: &str) -> Self {
        self.failing_updates.insert(id.to_string());
        self
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Update calls only, as `(id, tags)` pairs.
    pub fn updates(&self) -> Vec<(String, Vec<String>)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Update { id, tags } => Some((id.clone(), tags.clone())),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls, keeping device state.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Current state of all devices.
    pub fn devices(&self) -> Vec<Device> {
        self.devices.borrow().clone()
    }

    /// Current state of one device.
    pub fn device(&self, id: &str) -> Option<Device> {
        self.devices.borrow().iter().find(|d| d.id == id).cloned()
    }
}

impl DeviceDirectory for FakeDirectory {
    fn fetch_all_devices(&self) -> Result<Vec<Device>> {
        self.calls.borrow_mut().push(Call::FetchAll);
        if let Some(message) = &self.fetch_error {
            return Err(Error::transport(message.clone()));
        }
        Ok(self.devices())
    }

    fn get_device(&self, id: &str) -> Result<Device> {
        self.calls.borrow_mut().push(Call::Get(id.to_string()));
        if let Some(message) = &self.fetch_error {
            return Err(Error::transport(message.clone()));
        }
        self.device(id)
            .ok_or_else(|| Error::DeviceNotFound { id: id.to_string() })
    }

    fn update_device_tags(&self, id: &str, tags: &[String]) -> Result<()> {
        self.calls.borrow_mut().push(Call::Update {
            id: id.to_string(),
            tags: tags.to_vec(),
        });
        if self.failing_updates.contains(id) {
            return Err(Error::transport(format!("update rejected for {id}")));
        }
        let mut devices = self.devices.borrow_mut();
        let device = devices
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::DeviceNotFound { id: id.to_string() })?;
        device.tags = tags.to_vec();
        Ok(())
    }
}
