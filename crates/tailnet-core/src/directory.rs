//! The device directory seam
//!
//! The engine never talks to the network itself. Whatever fetches devices and
//! persists tags implements [`DeviceDirectory`] and is handed to the engine
//! explicitly.

use crate::device::Device;
use crate::Result;

/// Read and write access to the tailnet's device list
pub trait DeviceDirectory {
    /// Fetch every device with its current tags
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) on network or
    /// authentication failure. Callers treat this as fatal.
    fn fetch_all_devices(&self) -> Result<Vec<Device>>;

    /// Resolve a single device by id
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`](crate::Error::DeviceNotFound) for
    /// unknown ids.
    fn get_device(&self, id: &str) -> Result<Device>;

    /// Persist a full replacement tag list for one device
    fn update_device_tags(&self, id: &str, tags: &[String]) -> Result<()>;
}
