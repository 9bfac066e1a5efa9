// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vendor command definitions.
//!
//! Commands are applied to a device through the hub's `exec/apply` endpoint
//! as a name plus an ordered parameter list. This module provides typed
//! commands for the climate families and a free-form [`GenericCommand`] for
//! the outward command-execution service.
//!
//! # Available Commands
//!
//! | Command Type | Vendor name | Purpose |
//! |-------------|-------------|---------|
//! | [`DerogationCommand`] | `setDerogation` / `exitDerogation` | Enter or leave a manual override |
//! | [`ModeTemperatureCommand`] | `setModeTemperature` | Set the set-point of a thermostat mode |
//! | [`HeatingLevelCommand`] | `setHeatingLevel` | Select a heater level |
//! | [`RefreshStateCommand`] | `refreshState` | Ask the device to republish its states |
//! | [`GenericCommand`] | any | Service-level passthrough |
//!
//! # Examples
//!
//! ```
//! use tahoma_bridge::command::{Command, DerogationCommand};
//! use tahoma_bridge::types::{DerogationKind, TargetTemperature};
//!
//! let cmd = DerogationCommand::set_temperature(
//!     TargetTemperature::clamped(21.0),
//!     DerogationKind::FurtherNotice,
//! );
//! assert_eq!(cmd.name(), "setDerogation");
//! ```

mod climate;
mod generic;

pub use climate::{
    DerogationCommand, HeatingLevelCommand, ModeTemperatureCommand, RefreshStateCommand,
};
pub use generic::GenericCommand;

/// A single command parameter.
///
/// The hub accepts strings and numbers; parameter order is significant.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandParam {
    /// String parameter (mode names, derogation kinds).
    Str(String),
    /// Float parameter (temperatures).
    Float(f32),
    /// Integer parameter.
    Int(i64),
}

impl CommandParam {
    /// Returns the JSON representation used in the execution payload.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Str(s) => serde_json::Value::from(s.as_str()),
            Self::Float(v) => serde_json::Value::from(*v),
            Self::Int(v) => serde_json::Value::from(*v),
        }
    }
}

impl From<&str> for CommandParam {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<f32> for CommandParam {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for CommandParam {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

/// A command that can be applied to a device through the hub.
pub trait Command {
    /// Returns the vendor command name, e.g. `"setDerogation"`.
    fn name(&self) -> &str;

    /// Returns the ordered command parameters.
    ///
    /// Defaults to no parameters for bare commands.
    fn parameters(&self) -> Vec<CommandParam> {
        Vec::new()
    }

    /// Returns the JSON object for the hub's execution payload.
    fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name(),
            "parameters": self
                .parameters()
                .iter()
                .map(CommandParam::to_json)
                .collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl Command for Bare {
        fn name(&self) -> &str {
            "refreshState"
        }
    }

    #[test]
    fn bare_command_payload() {
        let payload = Bare.to_payload();
        assert_eq!(payload["name"], "refreshState");
        assert_eq!(payload["parameters"], serde_json::json!([]));
    }

    #[test]
    fn param_json_forms() {
        assert_eq!(CommandParam::from("manualMode").to_json(), "manualMode");
        assert_eq!(CommandParam::from(21.0f32).to_json(), 21.0);
        assert_eq!(CommandParam::from(3i64).to_json(), 3);
    }
}
