// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HVAC mode and action vocabulary.
//!
//! The displayed HVAC mode is always one of a small fixed set per device
//! family; a derogation-type state outside the mapped set is a
//! [`ValueError`], not a state the bridge carries along.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// HVAC operating mode exposed to the entity model.
///
/// # Examples
///
/// ```
/// use tahoma_bridge::types::HvacMode;
///
/// assert_eq!(HvacMode::Auto.as_str(), "auto");
/// assert_eq!("heat".parse::<HvacMode>().unwrap(), HvacMode::Heat);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HvacMode {
    /// Scheduled operation controlled by the thermostat programme.
    Auto,
    /// Manual heating, either permanent or as a temporary override.
    Heat,
    /// Heating disabled.
    Off,
}

impl HvacMode {
    /// Returns the entity-model string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Heat => "heat",
            Self::Off => "off",
        }
    }

    /// Derives the HVAC mode from a vendor derogation-type state value.
    ///
    /// A derogation until a fixed `date` means the programme is running;
    /// `next_mode` and `further_notice` are manual overrides. The heater
    /// family reports plain `on`/`off`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownDerogationState` for values outside the
    /// mapped set.
    pub fn from_derogation_state(value: &str) -> Result<Self, ValueError> {
        match value {
            "date" => Ok(Self::Auto),
            "next_mode" | "further_notice" | "on" => Ok(Self::Heat),
            "off" => Ok(Self::Off),
            other => Err(ValueError::UnknownDerogationState(other.to_string())),
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HvacMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "heat" => Ok(Self::Heat),
            "off" => Ok(Self::Off),
            other => Err(ValueError::UnknownHvacMode(other.to_string())),
        }
    }
}

/// The HVAC action currently being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HvacAction {
    /// The device is actively heating.
    Heating,
    /// The device is on but not heating.
    Idle,
    /// The device is off.
    Off,
}

impl HvacAction {
    /// Returns the entity-model string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heating => "heating",
            Self::Idle => "idle",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for HvacAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derogation_state_mapping() {
        assert_eq!(
            HvacMode::from_derogation_state("date").unwrap(),
            HvacMode::Auto
        );
        assert_eq!(
            HvacMode::from_derogation_state("next_mode").unwrap(),
            HvacMode::Heat
        );
        assert_eq!(
            HvacMode::from_derogation_state("further_notice").unwrap(),
            HvacMode::Heat
        );
        assert_eq!(
            HvacMode::from_derogation_state("on").unwrap(),
            HvacMode::Heat
        );
        assert_eq!(
            HvacMode::from_derogation_state("off").unwrap(),
            HvacMode::Off
        );
    }

    #[test]
    fn every_derogation_state_maps_into_fixed_set() {
        for state in ["date", "next_mode", "further_notice", "on", "off"] {
            let mode = HvacMode::from_derogation_state(state).unwrap();
            assert!(matches!(
                mode,
                HvacMode::Auto | HvacMode::Heat | HvacMode::Off
            ));
        }
    }

    #[test]
    fn unknown_derogation_state_is_error() {
        let err = HvacMode::from_derogation_state("party").unwrap_err();
        assert!(matches!(err, ValueError::UnknownDerogationState(s) if s == "party"));
    }

    #[test]
    fn round_trip_entity_strings() {
        for mode in [HvacMode::Auto, HvacMode::Heat, HvacMode::Off] {
            assert_eq!(mode.as_str().parse::<HvacMode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_hvac_mode_is_error() {
        assert!("cool".parse::<HvacMode>().is_err());
    }

    #[test]
    fn action_display() {
        assert_eq!(HvacAction::Heating.to_string(), "heating");
        assert_eq!(HvacAction::Idle.to_string(), "idle");
    }
}
