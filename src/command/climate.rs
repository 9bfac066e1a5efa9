// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate commands for the thermostat and heater families.

use crate::command::{Command, CommandParam};
use crate::types::{DerogationKind, HeatingLevel, PresetMode, TargetTemperature};

/// Command to enter or leave a derogation (manual override).
///
/// A derogation overrides the thermostat programme either with an explicit
/// set-point or with a named preset, for a duration given by the
/// [`DerogationKind`].
///
/// # Examples
///
/// ```
/// use tahoma_bridge::command::{Command, DerogationCommand};
/// use tahoma_bridge::types::{DerogationKind, PresetMode, TargetTemperature};
///
/// let cmd = DerogationCommand::set_temperature(
///     TargetTemperature::clamped(20.5),
///     DerogationKind::FurtherNotice,
/// );
/// assert_eq!(cmd.name(), "setDerogation");
///
/// let cmd = DerogationCommand::set_preset(PresetMode::Freeze, DerogationKind::FurtherNotice);
/// assert_eq!(cmd.name(), "setDerogation");
///
/// let cmd = DerogationCommand::Exit;
/// assert_eq!(cmd.name(), "exitDerogation");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DerogationCommand {
    /// Override the programme with an explicit set-point.
    SetTemperature {
        /// The override set-point.
        target: TargetTemperature,
        /// How long the override lasts.
        kind: DerogationKind,
    },
    /// Override the programme with a named preset.
    SetPreset {
        /// The override preset.
        preset: PresetMode,
        /// How long the override lasts.
        kind: DerogationKind,
    },
    /// Leave the override and return to the programme.
    Exit,
}

impl DerogationCommand {
    /// Creates a set-point override command.
    #[must_use]
    pub const fn set_temperature(target: TargetTemperature, kind: DerogationKind) -> Self {
        Self::SetTemperature { target, kind }
    }

    /// Creates a preset override command.
    #[must_use]
    pub const fn set_preset(preset: PresetMode, kind: DerogationKind) -> Self {
        Self::SetPreset { preset, kind }
    }
}

impl Command for DerogationCommand {
    fn name(&self) -> &str {
        match self {
            Self::SetTemperature { .. } | Self::SetPreset { .. } => "setDerogation",
            Self::Exit => "exitDerogation",
        }
    }

    fn parameters(&self) -> Vec<CommandParam> {
        match self {
            Self::SetTemperature { target, kind } => vec![
                CommandParam::Float(target.value()),
                CommandParam::from(kind.as_vendor_str()),
            ],
            Self::SetPreset { preset, kind } => vec![
                CommandParam::from(preset.as_vendor_str()),
                CommandParam::from(kind.as_vendor_str()),
            ],
            Self::Exit => Vec::new(),
        }
    }
}

/// Command to change the set-point attached to a thermostat mode.
///
/// Issued alongside a set-point derogation so the manual mode keeps the new
/// target after the override.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeTemperatureCommand {
    mode: PresetMode,
    target: TargetTemperature,
}

impl ModeTemperatureCommand {
    /// Creates a command setting the manual-mode set-point.
    #[must_use]
    pub const fn manual(target: TargetTemperature) -> Self {
        Self {
            mode: PresetMode::None,
            target,
        }
    }

    /// Creates a command setting the set-point of an arbitrary mode.
    #[must_use]
    pub const fn new(mode: PresetMode, target: TargetTemperature) -> Self {
        Self { mode, target }
    }
}

impl Command for ModeTemperatureCommand {
    fn name(&self) -> &str {
        "setModeTemperature"
    }

    fn parameters(&self) -> Vec<CommandParam> {
        vec![
            CommandParam::from(self.mode.as_vendor_str()),
            CommandParam::Float(self.target.value()),
        ]
    }
}

/// Command selecting a heating level on the electrical heater family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatingLevelCommand(HeatingLevel);

impl HeatingLevelCommand {
    /// Creates a command selecting the given level.
    #[must_use]
    pub const fn set(level: HeatingLevel) -> Self {
        Self(level)
    }

    /// Creates a command switching the heater off.
    #[must_use]
    pub const fn off() -> Self {
        Self(HeatingLevel::Off)
    }

    /// Returns the level this command selects.
    #[must_use]
    pub const fn level(&self) -> HeatingLevel {
        self.0
    }
}

impl Command for HeatingLevelCommand {
    fn name(&self) -> &str {
        "setHeatingLevel"
    }

    fn parameters(&self) -> Vec<CommandParam> {
        vec![CommandParam::from(self.0.as_vendor_str())]
    }
}

/// Command asking a device to republish its states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshStateCommand;

impl RefreshStateCommand {
    /// The vendor command name, also used for capability checks.
    pub const NAME: &'static str = "refreshState";
}

impl Command for RefreshStateCommand {
    fn name(&self) -> &str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derogation_temperature_parameters() {
        let cmd = DerogationCommand::set_temperature(
            TargetTemperature::clamped(21.0),
            DerogationKind::FurtherNotice,
        );
        assert_eq!(
            cmd.parameters(),
            vec![CommandParam::Float(21.0), CommandParam::from("further_notice")]
        );
    }

    #[test]
    fn derogation_preset_parameters() {
        let cmd = DerogationCommand::set_preset(PresetMode::Freeze, DerogationKind::FurtherNotice);
        assert_eq!(
            cmd.parameters(),
            vec![
                CommandParam::from("freezeMode"),
                CommandParam::from("further_notice")
            ]
        );
    }

    #[test]
    fn exit_derogation_has_no_parameters() {
        let cmd = DerogationCommand::Exit;
        assert_eq!(cmd.name(), "exitDerogation");
        assert!(cmd.parameters().is_empty());
    }

    #[test]
    fn mode_temperature_manual() {
        let cmd = ModeTemperatureCommand::manual(TargetTemperature::clamped(19.0));
        assert_eq!(cmd.name(), "setModeTemperature");
        assert_eq!(
            cmd.parameters(),
            vec![CommandParam::from("manualMode"), CommandParam::Float(19.0)]
        );
    }

    #[test]
    fn heating_level_payload() {
        let cmd = HeatingLevelCommand::set(HeatingLevel::Eco);
        let payload = cmd.to_payload();
        assert_eq!(payload["name"], "setHeatingLevel");
        assert_eq!(payload["parameters"], serde_json::json!(["eco"]));
    }

    #[test]
    fn refresh_state_payload() {
        let payload = RefreshStateCommand.to_payload();
        assert_eq!(payload["name"], "refreshState");
        assert_eq!(payload["parameters"], serde_json::json!([]));
    }
}
