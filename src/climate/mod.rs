// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate entities for the two supported thermostat families.
//!
//! A [`Climate`] entity mirrors one climate device: it caches the last
//! polled vendor states translated into the entity-model vocabulary, and
//! translates writes back into vendor commands. Writes update the cached
//! fields optimistically; the next poll reconciles them with the hub.
//!
//! [`SomfyThermostat`] is a programmable thermostat driven by derogations
//! (temporary overrides of its programme). [`AtlanticHeater`] is a simple
//! electrical heater driven by discrete heating levels, with an on/off
//! hysteresis loop fed by an external temperature sensor.

mod atlantic_heater;
mod sensor;
mod somfy_thermostat;

pub use atlantic_heater::AtlanticHeater;
pub use sensor::TemperatureFeed;
pub use somfy_thermostat::SomfyThermostat;

use crate::device::{ActiveStates, DeviceUrl};
use crate::error::Result;
use crate::types::{HvacAction, HvacMode, TargetTemperature, Temperature};

/// Feature flags advertised by a climate entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SupportedFeatures {
    /// The entity accepts target-temperature writes.
    pub target_temperature: bool,
    /// The entity accepts preset-mode writes.
    pub preset_mode: bool,
}

/// Contract of a climate entity.
///
/// Getters return the cached view; setters issue vendor commands through
/// the hub client and update the cache optimistically. Setting a preset
/// outside [`Climate::preset_modes`] or an HVAC mode outside
/// [`Climate::hvac_modes`] is logged and ignored without issuing a command.
#[allow(async_fn_in_trait)]
pub trait Climate {
    /// Returns the user-visible label of the backing device.
    fn label(&self) -> &str;

    /// Returns the vendor URL of the backing device.
    fn device_url(&self) -> &DeviceUrl;

    /// Returns the current HVAC operating mode.
    fn hvac_mode(&self) -> HvacMode;

    /// Returns the HVAC modes this entity accepts.
    fn hvac_modes(&self) -> &[HvacMode];

    /// Returns the action the device is currently performing.
    fn hvac_action(&self) -> HvacAction;

    /// Returns the current preset, in entity-model vocabulary.
    fn preset_mode(&self) -> &'static str;

    /// Returns the presets this entity accepts.
    fn preset_modes(&self) -> &[&'static str];

    /// Returns the target set-point, if the entity has one.
    fn target_temperature(&self) -> Option<TargetTemperature>;

    /// Returns the last known room temperature.
    fn current_temperature(&self) -> Option<Temperature>;

    /// Returns `true` when the entity has a usable temperature reading.
    fn available(&self) -> bool {
        self.current_temperature().is_some()
    }

    /// Returns the features this entity supports.
    fn supported_features(&self) -> SupportedFeatures;

    /// Records a reading from the external temperature sensor.
    ///
    /// Malformed readings are logged and discarded, keeping the previous
    /// value.
    fn record_temperature(&mut self, raw: &str);

    /// Applies a polled state update to the cached view.
    ///
    /// # Errors
    ///
    /// Returns an error if a state the entity relies on is missing or
    /// carries a value outside the vendor vocabulary.
    fn apply_states(&mut self, states: &ActiveStates) -> Result<()>;

    /// Switches the HVAC operating mode.
    ///
    /// # Errors
    ///
    /// Returns an error if a vendor command fails.
    async fn set_hvac_mode(&mut self, mode: HvacMode) -> Result<()>;

    /// Selects a preset by its entity-model name.
    ///
    /// # Errors
    ///
    /// Returns an error if a vendor command fails.
    async fn set_preset_mode(&mut self, preset: &str) -> Result<()>;

    /// Changes the target set-point.
    ///
    /// Requests above the safe range are clamped; requests below it engage
    /// frost protection.
    ///
    /// # Errors
    ///
    /// Returns an error if a vendor command fails.
    async fn set_temperature(&mut self, celsius: f32) -> Result<()>;
}
