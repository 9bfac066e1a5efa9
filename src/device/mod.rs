// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vendor device model.
//!
//! A [`Device`] is the bridge's view of one unit behind the hub: its URL
//! (the vendor's unique identifier), its `widget` family discriminator, and
//! its last-polled [`ActiveStates`]. The bridge never mutates a device
//! beyond applying polled state updates; all writes go through commands.

pub mod states;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use states::{ActiveStates, StateValue};

/// Unique vendor identifier of a device.
///
/// Device URLs look like `io://1234-5678-9012/12345678`. They are opaque to
/// the bridge but must be URL-encoded when used in API paths.
///
/// # Examples
///
/// ```
/// use tahoma_bridge::device::DeviceUrl;
///
/// let url = DeviceUrl::new("io://1234-5678-9012/12345678");
/// assert_eq!(url.as_str(), "io://1234-5678-9012/12345678");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceUrl(String);

impl DeviceUrl {
    /// Creates a device URL from its string form.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the percent-encoded form for use in API paths.
    #[must_use]
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl fmt::Display for DeviceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceUrl {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

/// Vendor device-family discriminator.
///
/// The widget selects device-specific behavior; unsupported families are
/// carried as [`Widget::Other`] so discovery can log them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Widget {
    /// Higher-end thermostat with programme and derogation support.
    SomfyThermostat,
    /// Electrical heater driven by discrete heating levels.
    AtlanticElectricalHeater,
    /// Any other device family.
    Other(String),
}

impl Widget {
    /// Returns the vendor string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::SomfyThermostat => "SomfyThermostat",
            Self::AtlanticElectricalHeater => "AtlanticElectricalHeater",
            Self::Other(s) => s,
        }
    }

    /// Returns `true` for the climate device families.
    #[must_use]
    pub fn is_climate(&self) -> bool {
        matches!(self, Self::SomfyThermostat | Self::AtlanticElectricalHeater)
    }
}

impl From<String> for Widget {
    fn from(s: String) -> Self {
        match s.as_str() {
            "SomfyThermostat" => Self::SomfyThermostat,
            "AtlanticElectricalHeater" => Self::AtlanticElectricalHeater,
            _ => Self::Other(s),
        }
    }
}

impl From<Widget> for String {
    fn from(widget: Widget) -> Self {
        widget.as_str().to_string()
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A device as reported by the hub.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireDevice")]
pub struct Device {
    device_url: DeviceUrl,
    label: String,
    widget: Widget,
    ui_class: String,
    states: ActiveStates,
    commands: Vec<String>,
}

impl Device {
    /// Creates a device. Mostly useful for tests; real devices come from
    /// the hub's setup payload.
    #[must_use]
    pub fn new(
        device_url: DeviceUrl,
        label: impl Into<String>,
        widget: Widget,
        ui_class: impl Into<String>,
    ) -> Self {
        Self {
            device_url,
            label: label.into(),
            widget,
            ui_class: ui_class.into(),
            states: ActiveStates::new(),
            commands: Vec::new(),
        }
    }

    /// Returns the vendor device URL.
    #[must_use]
    pub fn device_url(&self) -> &DeviceUrl {
        &self.device_url
    }

    /// Returns the user-visible label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the device-family discriminator.
    #[must_use]
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// Returns the vendor UI class (e.g. `HeatingSystem`).
    #[must_use]
    pub fn ui_class(&self) -> &str {
        &self.ui_class
    }

    /// Returns the last-polled active states.
    #[must_use]
    pub fn states(&self) -> &ActiveStates {
        &self.states
    }

    /// Returns `true` if the device definition lists the given command.
    #[must_use]
    pub fn supports_command(&self, name: &str) -> bool {
        self.commands.iter().any(|c| c == name)
    }

    /// Returns the command names listed in the device definition.
    #[must_use]
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Applies a polled state update, replacing values for duplicate names.
    pub fn update_states(&mut self, states: ActiveStates) {
        self.states.merge(states);
    }

    /// Replaces a single state value. Used for optimistic updates between
    /// polls after a command was issued.
    pub fn set_state(&mut self, name: impl Into<String>, value: StateValue) {
        self.states.insert(name, value);
    }

    /// Adds a supported command name. Mostly useful for tests.
    pub fn add_command(&mut self, name: impl Into<String>) {
        self.commands.push(name.into());
    }
}

/// Raw device representation matching the hub's setup payload.
#[derive(Deserialize)]
struct WireDevice {
    #[serde(rename = "deviceURL")]
    device_url: DeviceUrl,
    #[serde(default)]
    label: String,
    widget: Widget,
    #[serde(rename = "uiClass", default)]
    ui_class: String,
    #[serde(default)]
    states: Vec<WireState>,
    #[serde(default)]
    definition: WireDefinition,
}

#[derive(Deserialize)]
struct WireState {
    name: String,
    value: StateValue,
}

#[derive(Default, Deserialize)]
struct WireDefinition {
    #[serde(default)]
    commands: Vec<WireCommand>,
}

#[derive(Deserialize)]
struct WireCommand {
    #[serde(rename = "commandName")]
    command_name: String,
}

impl From<WireDevice> for Device {
    fn from(wire: WireDevice) -> Self {
        Self {
            device_url: wire.device_url,
            label: wire.label,
            widget: wire.widget,
            ui_class: wire.ui_class,
            states: wire
                .states
                .into_iter()
                .map(|s| (s.name, s.value))
                .collect(),
            commands: wire
                .definition
                .commands
                .into_iter()
                .map(|c| c.command_name)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use states::names;

    #[test]
    fn widget_from_vendor_string() {
        assert_eq!(
            Widget::from("SomfyThermostat".to_string()),
            Widget::SomfyThermostat
        );
        assert_eq!(
            Widget::from("AtlanticElectricalHeater".to_string()),
            Widget::AtlanticElectricalHeater
        );
        assert_eq!(
            Widget::from("LightSensor".to_string()),
            Widget::Other("LightSensor".to_string())
        );
    }

    #[test]
    fn widget_climate_families() {
        assert!(Widget::SomfyThermostat.is_climate());
        assert!(Widget::AtlanticElectricalHeater.is_climate());
        assert!(!Widget::Other("OnOffLight".to_string()).is_climate());
    }

    #[test]
    fn device_url_encoding() {
        let url = DeviceUrl::new("io://1234-5678-9012/12345678");
        assert_eq!(url.encoded(), "io%3A%2F%2F1234-5678-9012%2F12345678");
    }

    #[test]
    fn deserializes_setup_payload() {
        let json = r#"{
            "deviceURL": "io://1234-5678-9012/12345678",
            "label": "Living room thermostat",
            "widget": "SomfyThermostat",
            "uiClass": "HeatingSystem",
            "states": [
                {"name": "somfythermostat:DerogationTypeState", "value": "date"},
                {"name": "core:TargetTemperatureState", "value": 19.0}
            ],
            "definition": {
                "commands": [
                    {"commandName": "refreshState"},
                    {"commandName": "setDerogation"}
                ]
            }
        }"#;

        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.label(), "Living room thermostat");
        assert_eq!(device.widget(), &Widget::SomfyThermostat);
        assert_eq!(device.ui_class(), "HeatingSystem");
        assert_eq!(device.states().get_str(names::DEROGATION_TYPE).unwrap(), "date");
        assert_eq!(
            device.states().get_f32(names::TARGET_TEMPERATURE).unwrap(),
            19.0
        );
        assert!(device.supports_command("refreshState"));
        assert!(!device.supports_command("setHeatingLevel"));
    }

    #[test]
    fn update_states_merges() {
        let mut device = Device::new(
            DeviceUrl::new("io://gw/1"),
            "Heater",
            Widget::AtlanticElectricalHeater,
            "HeatingSystem",
        );
        device.set_state(names::ON_OFF, StateValue::from("off"));

        let mut update = ActiveStates::new();
        update.insert(names::ON_OFF, StateValue::from("on"));
        device.update_states(update);

        assert_eq!(device.states().get_str(names::ON_OFF).unwrap(), "on");
    }
}
