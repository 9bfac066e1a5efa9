// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature types.
//!
//! This module provides a plain Celsius reading type and a constrained
//! target set-point type. Target temperatures accepted by the thermostat
//! families are limited to a fixed safe range.

use std::fmt;

use crate::error::ValueError;

/// A temperature reading in degrees Celsius.
///
/// # Examples
///
/// ```
/// use tahoma_bridge::types::Temperature;
///
/// let t = Temperature::new(19.5);
/// assert_eq!(t.value(), 19.5);
/// assert_eq!(t.to_string(), "19.5°C");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Temperature(f32);

impl Temperature {
    /// Creates a new temperature reading.
    #[must_use]
    pub const fn new(celsius: f32) -> Self {
        Self(celsius)
    }

    /// Returns the value in degrees Celsius.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

impl From<f32> for Temperature {
    fn from(celsius: f32) -> Self {
        Self(celsius)
    }
}

/// A target temperature set-point, constrained to the safe range.
///
/// Both thermostat families accept set-points between 15.0 and 26.0 °C.
/// Values above the maximum are clamped by [`TargetTemperature::clamped`];
/// values below the minimum additionally trigger a frost-protection
/// override in the climate layer.
///
/// # Examples
///
/// ```
/// use tahoma_bridge::types::TargetTemperature;
///
/// let target = TargetTemperature::new(21.0).unwrap();
/// assert_eq!(target.value(), 21.0);
///
/// // Out-of-range requests are clamped
/// assert_eq!(TargetTemperature::clamped(30.0).value(), 26.0);
/// assert_eq!(TargetTemperature::clamped(5.0).value(), 15.0);
///
/// // Or rejected when constructed strictly
/// assert!(TargetTemperature::new(30.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TargetTemperature(f32);

impl TargetTemperature {
    /// Minimum accepted set-point (15.0 °C).
    pub const MIN: Self = Self(15.0);

    /// Maximum accepted set-point (26.0 °C).
    pub const MAX: Self = Self(26.0);

    /// Creates a new target temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::TemperatureOutOfRange` if the value is outside
    /// the 15.0–26.0 °C range.
    pub fn new(celsius: f32) -> Result<Self, ValueError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&celsius) {
            return Err(ValueError::TemperatureOutOfRange {
                min: Self::MIN.0,
                max: Self::MAX.0,
                actual: celsius,
            });
        }
        Ok(Self(celsius))
    }

    /// Creates a target temperature, clamping into the valid range.
    #[must_use]
    pub const fn clamped(celsius: f32) -> Self {
        if celsius > Self::MAX.0 {
            Self::MAX
        } else if celsius < Self::MIN.0 {
            Self::MIN
        } else {
            Self(celsius)
        }
    }

    /// Returns the set-point in degrees Celsius.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Returns the set-point as a plain temperature reading.
    #[must_use]
    pub const fn as_temperature(&self) -> Temperature {
        Temperature::new(self.0)
    }
}

impl fmt::Display for TargetTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

impl TryFrom<f32> for TargetTemperature {
    type Error = ValueError;

    fn try_from(celsius: f32) -> Result<Self, Self::Error> {
        Self::new(celsius)
    }
}

impl From<TargetTemperature> for Temperature {
    fn from(target: TargetTemperature) -> Self {
        target.as_temperature()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_valid_range() {
        assert!(TargetTemperature::new(15.0).is_ok());
        assert!(TargetTemperature::new(21.5).is_ok());
        assert!(TargetTemperature::new(26.0).is_ok());
    }

    #[test]
    fn target_invalid_values() {
        assert!(TargetTemperature::new(14.9).is_err());
        assert!(TargetTemperature::new(26.1).is_err());
    }

    #[test]
    fn target_clamped_high() {
        assert_eq!(TargetTemperature::clamped(30.0).value(), 26.0);
    }

    #[test]
    fn target_clamped_low() {
        assert_eq!(TargetTemperature::clamped(5.0).value(), 15.0);
    }

    #[test]
    fn target_clamped_in_range() {
        assert_eq!(TargetTemperature::clamped(19.0).value(), 19.0);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Temperature::new(18.5).to_string(), "18.5°C");
        assert_eq!(TargetTemperature::clamped(26.0).to_string(), "26°C");
    }

    #[test]
    fn ordering() {
        assert!(Temperature::new(18.0) < Temperature::new(19.0));
        assert!(TargetTemperature::MIN < TargetTemperature::MAX);
    }
}
