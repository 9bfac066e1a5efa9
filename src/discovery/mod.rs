// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device discovery and platform mapping.
//!
//! The hub's setup payload lists every registered device. Discovery sorts
//! them into entity platforms: the `widget` family discriminator is
//! consulted first, then the broader `uiClass`. Device families on the
//! ignored list are dropped silently; everything else without a platform is
//! logged at debug level so unsupported hardware shows up in diagnostics.
//!
//! # Examples
//!
//! ```
//! use tahoma_bridge::device::{Device, DeviceUrl, Widget};
//! use tahoma_bridge::discovery::{classify_devices, Platform};
//!
//! let thermostat = Device::new(
//!     DeviceUrl::new("io://1234-5678-9012/1"),
//!     "Living room",
//!     Widget::SomfyThermostat,
//!     "HeatingSystem",
//! );
//!
//! let discovered = classify_devices(vec![thermostat]);
//! assert_eq!(discovered.platform(Platform::Climate).len(), 1);
//! ```

use std::collections::HashMap;

use crate::device::{Device, Widget};
use crate::hub::Gateway;

/// Entity platforms devices are forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Thermostats and heaters.
    Climate,
    /// Temperature and other measurement devices.
    Sensor,
    /// On/off actors.
    Switch,
}

/// Device families handled by the climate platform.
const CLIMATE_WIDGETS: [&str; 2] = ["SomfyThermostat", "AtlanticElectricalHeater"];

/// UI classes with a platform mapping, consulted after the widget.
const UI_CLASS_PLATFORMS: [(&str, Platform); 3] = [
    ("HeatingSystem", Platform::Climate),
    ("TemperatureSensor", Platform::Sensor),
    ("OnOff", Platform::Switch),
];

/// Families that are expected and intentionally not mapped. Mostly hub
/// internals that never become entities.
const IGNORED_TYPES: [&str; 3] = ["ProtocolGateway", "Pod", "NetworkComponent"];

/// Devices sorted by target platform.
#[derive(Debug, Default)]
pub struct DiscoveredDevices {
    platforms: HashMap<Platform, Vec<Device>>,
}

impl DiscoveredDevices {
    /// Returns the devices assigned to a platform.
    #[must_use]
    pub fn platform(&self, platform: Platform) -> &[Device] {
        self.platforms.get(&platform).map_or(&[], Vec::as_slice)
    }

    /// Returns the total number of mapped devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.platforms.values().map(Vec::len).sum()
    }

    /// Returns `true` if no device was mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

/// Returns the platform a device belongs to.
///
/// The widget is consulted first so a family can override its UI class;
/// unmapped devices return `None`.
#[must_use]
pub fn platform_for(device: &Device) -> Option<Platform> {
    if CLIMATE_WIDGETS.contains(&device.widget().as_str()) {
        return Some(Platform::Climate);
    }
    UI_CLASS_PLATFORMS
        .iter()
        .find(|(ui_class, _)| *ui_class == device.ui_class())
        .map(|(_, platform)| *platform)
}

/// Returns `true` for device families that are intentionally unmapped.
#[must_use]
pub fn is_ignored(device: &Device) -> bool {
    IGNORED_TYPES.contains(&device.widget().as_str())
        || IGNORED_TYPES.contains(&device.ui_class())
}

/// Sorts the hub's device list into entity platforms.
///
/// Unsupported devices outside the ignored list are logged at debug level
/// and dropped.
#[must_use]
pub fn classify_devices(devices: Vec<Device>) -> DiscoveredDevices {
    let mut discovered = DiscoveredDevices::default();

    for device in devices {
        if let Some(platform) = platform_for(&device) {
            tracing::debug!(
                ui_class = device.ui_class(),
                widget = %device.widget(),
                device_url = %device.device_url(),
                ?platform,
                "added device"
            );
            discovered.platforms.entry(platform).or_default().push(device);
        } else if !is_ignored(&device) {
            tracing::debug!(
                ui_class = device.ui_class(),
                widget = %device.widget(),
                device_url = %device.device_url(),
                "unsupported device detected"
            );
        }
    }

    discovered
}

/// Registration record for a gateway, as shown in a device registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayInfo {
    /// Gateway identifier (the box PIN).
    pub id: String,
    /// Display name derived from the gateway type.
    pub name: String,
    /// Model derived from the gateway sub-type.
    pub model: String,
    /// Connection status as reported by the cloud.
    pub connectivity_status: String,
}

impl GatewayInfo {
    /// Builds the registration record for a gateway.
    #[must_use]
    pub fn from_gateway(gateway: &Gateway) -> Self {
        tracing::debug!(
            id = %gateway.id,
            gateway_type = %gateway.gateway_type,
            sub_type = %gateway.sub_type,
            "added gateway"
        );
        Self {
            id: gateway.id.clone(),
            name: if gateway.gateway_type.is_empty() {
                "Gateway hub".to_string()
            } else {
                format!("{} hub", gateway.gateway_type)
            },
            model: gateway.sub_type.clone(),
            connectivity_status: gateway.connectivity.status.clone(),
        }
    }
}

/// Returns `true` if the device family is one of the supported climate
/// widgets.
#[must_use]
pub fn is_climate_widget(widget: &Widget) -> bool {
    CLIMATE_WIDGETS.contains(&widget.as_str())
}
