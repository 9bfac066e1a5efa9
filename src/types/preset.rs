// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Preset modes and heater heating levels.
//!
//! Each enum carries a two-way mapping between the vendor state vocabulary
//! and the entity-model vocabulary. The mapping is total over the vendor
//! set; anything else is a [`ValueError`].

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Thermostat preset mode exposed to the entity model.
///
/// # Examples
///
/// ```
/// use tahoma_bridge::types::PresetMode;
///
/// assert_eq!(PresetMode::Home.as_vendor_str(), "atHomeMode");
/// assert_eq!(
///     PresetMode::from_vendor_str("sleepingMode").unwrap(),
///     PresetMode::Sleep
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetMode {
    /// No preset; a manual set-point is active.
    None,
    /// Frost-protection mode.
    Freeze,
    /// Night mode.
    Sleep,
    /// Away mode.
    Away,
    /// At-home mode.
    Home,
}

impl PresetMode {
    /// Returns the entity-model string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Freeze => "freeze",
            Self::Sleep => "sleep",
            Self::Away => "away",
            Self::Home => "home",
        }
    }

    /// Returns the vendor heating-mode string for this preset.
    #[must_use]
    pub const fn as_vendor_str(&self) -> &'static str {
        match self {
            Self::None => "manualMode",
            Self::Freeze => "freezeMode",
            Self::Sleep => "sleepingMode",
            Self::Away => "awayMode",
            Self::Home => "atHomeMode",
        }
    }

    /// Parses a vendor heating-mode state value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownHeatingMode` for values outside the
    /// mapped set.
    pub fn from_vendor_str(value: &str) -> Result<Self, ValueError> {
        match value {
            "manualMode" => Ok(Self::None),
            "freezeMode" => Ok(Self::Freeze),
            "sleepingMode" => Ok(Self::Sleep),
            "awayMode" => Ok(Self::Away),
            "atHomeMode" => Ok(Self::Home),
            other => Err(ValueError::UnknownHeatingMode(other.to_string())),
        }
    }
}

impl fmt::Display for PresetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "freeze" => Ok(Self::Freeze),
            "sleep" => Ok(Self::Sleep),
            "away" => Ok(Self::Away),
            "home" => Ok(Self::Home),
            other => Err(ValueError::UnknownPresetMode(other.to_string())),
        }
    }
}

/// Heating level of the electrical heater family.
///
/// The heater has no set-point schedule; it runs at a fixed level. The
/// hysteresis loop switches between `Off` and the last user-selected level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeatingLevel {
    /// Heating element off.
    Off,
    /// Minimal heating to keep the room above freezing.
    FrostProtection,
    /// Reduced-temperature heating.
    Eco,
    /// Full comfort heating.
    Comfort,
}

impl HeatingLevel {
    /// Returns the vendor heating-level string.
    #[must_use]
    pub const fn as_vendor_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::FrostProtection => "frostprotection",
            Self::Eco => "eco",
            Self::Comfort => "comfort",
        }
    }

    /// Returns the entity-model preset string for this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::FrostProtection => "frost_protection",
            Self::Eco => "eco",
            Self::Comfort => "comfort",
        }
    }

    /// Parses a vendor heating-level state value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownHeatingLevel` for values outside the
    /// mapped set.
    pub fn from_vendor_str(value: &str) -> Result<Self, ValueError> {
        match value {
            "off" => Ok(Self::Off),
            "frostprotection" => Ok(Self::FrostProtection),
            "eco" => Ok(Self::Eco),
            "comfort" => Ok(Self::Comfort),
            other => Err(ValueError::UnknownHeatingLevel(other.to_string())),
        }
    }
}

impl fmt::Display for HeatingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeatingLevel {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "frost_protection" => Ok(Self::FrostProtection),
            "eco" => Ok(Self::Eco),
            "comfort" => Ok(Self::Comfort),
            other => Err(ValueError::UnknownPresetMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_vendor_round_trip() {
        for preset in [
            PresetMode::None,
            PresetMode::Freeze,
            PresetMode::Sleep,
            PresetMode::Away,
            PresetMode::Home,
        ] {
            assert_eq!(
                PresetMode::from_vendor_str(preset.as_vendor_str()).unwrap(),
                preset
            );
        }
    }

    #[test]
    fn preset_vendor_table() {
        assert_eq!(
            PresetMode::from_vendor_str("atHomeMode").unwrap(),
            PresetMode::Home
        );
        assert_eq!(
            PresetMode::from_vendor_str("awayMode").unwrap(),
            PresetMode::Away
        );
        assert_eq!(
            PresetMode::from_vendor_str("freezeMode").unwrap(),
            PresetMode::Freeze
        );
        assert_eq!(
            PresetMode::from_vendor_str("manualMode").unwrap(),
            PresetMode::None
        );
    }

    #[test]
    fn unknown_vendor_preset_is_error() {
        assert!(PresetMode::from_vendor_str("partyMode").is_err());
    }

    #[test]
    fn preset_entity_round_trip() {
        for preset in [PresetMode::None, PresetMode::Home, PresetMode::Sleep] {
            assert_eq!(preset.as_str().parse::<PresetMode>().unwrap(), preset);
        }
    }

    #[test]
    fn heating_level_vendor_round_trip() {
        for level in [
            HeatingLevel::Off,
            HeatingLevel::FrostProtection,
            HeatingLevel::Eco,
            HeatingLevel::Comfort,
        ] {
            assert_eq!(
                HeatingLevel::from_vendor_str(level.as_vendor_str()).unwrap(),
                level
            );
        }
    }

    #[test]
    fn unknown_heating_level_is_error() {
        assert!(HeatingLevel::from_vendor_str("boost").is_err());
    }
}
