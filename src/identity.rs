// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identity.
//!
//! Every controller derives a device ID used in queue topic names and
//! logs. IDs may be shortened by peers to the shortest unique prefix
//! (similar to abbreviated commit hashes), so the matching helpers accept
//! prefixes in either direction.

use std::fmt;
use std::path::Path;

use crate::error::Error;

/// Environment variable overriding the detected device ID.
pub const DEVICE_ID_ENV: &str = "LUMEN_DEVICE_ID";

/// A controller's device ID.
///
/// # Examples
///
/// ```
/// use lumen_lib::identity::DeviceId;
///
/// let id = DeviceId::from("0123456789ab");
/// assert!(id.matches("0123"));
/// assert!(id.contained_in(&["ffff".to_string(), "0123".to_string()]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DeviceId(String);

impl DeviceId {
    /// Produces the device ID for an agent.
    ///
    /// The ID is taken from the following, in order of priority:
    ///
    /// 1. the `LUMEN_DEVICE_ID` environment variable
    /// 2. the hardware (MAC) address of the `wlan0` interface
    /// 3. the hardware (MAC) address of the `en0` interface
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoIdentity`] when no override is set and neither
    /// interface exists.
    pub fn detect() -> Result<Self, Error> {
        if let Ok(id) = std::env::var(DEVICE_ID_ENV) {
            if !id.is_empty() {
                return Ok(Self(id));
            }
        }
        // The order of preference is wlan0, then en0
        for interface in ["wlan0", "en0"] {
            if let Some(id) = interface_id(interface) {
                tracing::debug!(interface, id, "device ID from hardware address");
                return Ok(Self(id));
            }
        }
        Err(Error::NoIdentity(
            "missing WiFi or Ethernet interface wlan0/en0".to_string(),
        ))
    }

    /// Returns true if the given ID exactly equals this ID.
    #[must_use]
    pub fn equals(&self, id: &str) -> bool {
        self.0 == id
    }

    /// Returns true if the given ID matches this ID.
    ///
    /// The provided ID can be a shortened version of this ID (or this ID
    /// a shortened version of the provided one).
    #[must_use]
    pub fn matches(&self, id: &str) -> bool {
        self.0.starts_with(id) || id.starts_with(&self.0)
    }

    /// Returns true if this ID matches any of the IDs in the provided
    /// slice.
    #[must_use]
    pub fn contained_in(&self, ids: &[String]) -> bool {
        ids.iter().any(|id| self.matches(id))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DeviceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Converts a network hardware address to a string device ID.
#[must_use]
pub fn addr_to_id(addr: &[u8]) -> String {
    addr.iter().map(|byte| format!("{byte:02x}")).collect()
}

// Reads an interface's hardware address from sysfs, e.g.
// /sys/class/net/wlan0/address holding "01:23:45:67:89:ab".
fn interface_id(interface: &str) -> Option<String> {
    let path = Path::new("/sys/class/net").join(interface).join("address");
    let addr = std::fs::read_to_string(path).ok()?;
    let id: String = addr
        .trim()
        .chars()
        .filter(char::is_ascii_hexdigit)
        .collect::<String>()
        .to_lowercase();
    if id.is_empty() { None } else { Some(id) }
}
