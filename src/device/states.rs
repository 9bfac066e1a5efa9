// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state values and the active-states table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Vendor state names consulted by the climate layer.
pub mod names {
    /// Whether the thermostat is in automatic mode or overridden, and how.
    pub const DEROGATION_TYPE: &str = "somfythermostat:DerogationTypeState";
    /// Heating mode while the programme is running.
    pub const HEATING_MODE: &str = "somfythermostat:HeatingModeState";
    /// Heating mode while a derogation is active.
    pub const DEROGATION_HEATING_MODE: &str = "somfythermostat:DerogationHeatingModeState";
    /// Programmed target temperature.
    pub const TARGET_TEMPERATURE: &str = "core:TargetTemperatureState";
    /// Target temperature of the active derogation.
    pub const DEROGATED_TARGET_TEMPERATURE: &str = "core:DerogatedTargetTemperatureState";
    /// Heating level of the electrical heater family.
    pub const TARGET_HEATING_LEVEL: &str = "io:TargetHeatingLevelState";
    /// On/off state of the electrical heater family.
    pub const ON_OFF: &str = "core:OnOffState";
}

/// A single vendor state value.
///
/// The hub reports states as JSON scalars; the variant depends on the state
/// name. Typed accessors return `None` on a variant mismatch so callers can
/// surface a [`ParseError`] naming the state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    /// String-valued state (mode names, enum-like states).
    Str(String),
    /// Boolean-valued state.
    Bool(bool),
    /// Integer-valued state.
    Int(i64),
    /// Float-valued state (temperatures, levels).
    Float(f64),
}

impl StateValue {
    /// Returns the value as a string slice, if string-valued.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an `f32`, if numeric.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v as f32),
            Self::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// Returns the value as a bool, if boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for StateValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<f64> for StateValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// The device's last-polled mapping of vendor state names to values.
///
/// # Examples
///
/// ```
/// use tahoma_bridge::device::{ActiveStates, StateValue, states::names};
///
/// let mut states = ActiveStates::new();
/// states.insert(names::TARGET_TEMPERATURE, StateValue::Float(21.0));
/// assert_eq!(states.get_f32(names::TARGET_TEMPERATURE).unwrap(), 21.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveStates(HashMap<String, StateValue>);

impl ActiveStates {
    /// Creates an empty state table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value of a state, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StateValue> {
        self.0.get(name)
    }

    /// Inserts or replaces a state value.
    pub fn insert(&mut self, name: impl Into<String>, value: StateValue) {
        self.0.insert(name.into(), value);
    }

    /// Merges another table into this one, replacing duplicate names.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Returns the number of known states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no states are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the string value of a state.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingState` if the state is absent and
    /// `ParseError::InvalidValue` if it is not string-valued.
    pub fn get_str(&self, name: &str) -> Result<&str, ParseError> {
        let value = self
            .0
            .get(name)
            .ok_or_else(|| ParseError::MissingState(name.to_string()))?;
        value.as_str().ok_or_else(|| ParseError::InvalidValue {
            state: name.to_string(),
            message: format!("expected string, got {value:?}"),
        })
    }

    /// Returns the numeric value of a state.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingState` if the state is absent and
    /// `ParseError::InvalidValue` if it is not numeric.
    pub fn get_f32(&self, name: &str) -> Result<f32, ParseError> {
        let value = self
            .0
            .get(name)
            .ok_or_else(|| ParseError::MissingState(name.to_string()))?;
        value.as_f32().ok_or_else(|| ParseError::InvalidValue {
            state: name.to_string(),
            message: format!("expected number, got {value:?}"),
        })
    }
}

impl FromIterator<(String, StateValue)> for ActiveStates {
    fn from_iter<I: IntoIterator<Item = (String, StateValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
