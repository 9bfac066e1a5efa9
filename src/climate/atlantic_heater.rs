// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Electrical heater entity with on/off hysteresis.

use std::sync::Arc;

use crate::climate::{Climate, SupportedFeatures, TemperatureFeed};
use crate::command::HeatingLevelCommand;
use crate::device::{states::names, ActiveStates, Device, DeviceUrl};
use crate::error::Result;
use crate::hub::HubClient;
use crate::types::{HeatingLevel, HvacAction, HvacMode, TargetTemperature};

/// Switch the element off once the room is this far above the set-point.
const HOT_TOLERANCE: f32 = 0.3;
/// Switch the element on once the room is this far below the set-point.
const COLD_TOLERANCE: f32 = 0.3;

const HVAC_MODES: [HvacMode; 2] = [HvacMode::Heat, HvacMode::Off];
const PRESET_MODES: [&str; 3] = ["frost_protection", "eco", "comfort"];

/// Entity for the electrical heater family.
///
/// The heater has no set-point of its own; it runs at a discrete heating
/// level. The entity keeps a local set-point and regulates against an
/// external temperature sensor: once the room overshoots by
/// [`HOT_TOLERANCE`] the element is switched off, once it undershoots by
/// [`COLD_TOLERANCE`] it is switched back to the last level the user
/// selected. Inside the band no command is issued.
#[derive(Debug)]
pub struct AtlanticHeater<C> {
    client: Arc<C>,
    device_url: DeviceUrl,
    label: String,
    hvac_mode: HvacMode,
    level: HeatingLevel,
    user_level: HeatingLevel,
    target: Option<TargetTemperature>,
    feed: TemperatureFeed,
}

impl<C: HubClient> AtlanticHeater<C> {
    /// Creates the entity from a discovered device.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is missing the on/off or
    /// heating-level state, or reports a level outside the vendor
    /// vocabulary.
    pub fn from_device(client: Arc<C>, device: &Device) -> Result<Self> {
        let mut entity = Self {
            client,
            device_url: device.device_url().clone(),
            label: device.label().to_string(),
            hvac_mode: HvacMode::Off,
            level: HeatingLevel::Off,
            user_level: HeatingLevel::Comfort,
            target: None,
            feed: TemperatureFeed::new(),
        };
        entity.read_states(device.states())?;
        Ok(entity)
    }

    /// Returns the heating level currently selected on the device.
    #[must_use]
    pub fn heating_level(&self) -> HeatingLevel {
        self.level
    }

    /// Runs one step of the hysteresis loop.
    ///
    /// Returns the level that was commanded, or `None` if the reading is
    /// missing, no set-point is configured, the heater is switched off, or
    /// the room temperature sits inside the tolerance band.
    ///
    /// # Errors
    ///
    /// Returns an error if the level command fails.
    pub async fn run_hysteresis(&mut self) -> Result<Option<HeatingLevel>> {
        if self.hvac_mode == HvacMode::Off {
            return Ok(None);
        }
        let (Some(current), Some(target)) = (self.feed.reading(), self.target) else {
            return Ok(None);
        };

        let delta = current.value() - target.value();
        let desired = if delta >= HOT_TOLERANCE {
            HeatingLevel::Off
        } else if -delta >= COLD_TOLERANCE {
            self.user_level
        } else {
            return Ok(None);
        };

        if desired == self.level {
            return Ok(None);
        }

        tracing::debug!(
            label = %self.label,
            current = current.value(),
            target = target.value(),
            level = %desired,
            "hysteresis switching heating level"
        );
        self.apply_level(desired).await?;
        Ok(Some(desired))
    }

    async fn apply_level(&mut self, level: HeatingLevel) -> Result<()> {
        self.client
            .apply_action(&self.device_url, &HeatingLevelCommand::set(level))
            .await?;
        self.level = level;
        Ok(())
    }

    fn read_states(&mut self, states: &ActiveStates) -> Result<()> {
        self.hvac_mode = match states.get_str(names::ON_OFF)? {
            "off" => HvacMode::Off,
            _ => HvacMode::Heat,
        };
        self.level = HeatingLevel::from_vendor_str(states.get_str(names::TARGET_HEATING_LEVEL)?)?;
        if self.level != HeatingLevel::Off {
            self.user_level = self.level;
        }
        Ok(())
    }
}

impl<C: HubClient> Climate for AtlanticHeater<C> {
    fn label(&self) -> &str {
        &self.label
    }

    fn device_url(&self) -> &DeviceUrl {
        &self.device_url
    }

    fn hvac_mode(&self) -> HvacMode {
        self.hvac_mode
    }

    fn hvac_modes(&self) -> &[HvacMode] {
        &HVAC_MODES
    }

    fn hvac_action(&self) -> HvacAction {
        match (self.hvac_mode, self.level) {
            (HvacMode::Off, _) => HvacAction::Off,
            (_, HeatingLevel::Off) => HvacAction::Idle,
            _ => HvacAction::Heating,
        }
    }

    fn preset_mode(&self) -> &'static str {
        self.level.as_str()
    }

    fn preset_modes(&self) -> &[&'static str] {
        &PRESET_MODES
    }

    fn target_temperature(&self) -> Option<TargetTemperature> {
        self.target
    }

    fn current_temperature(&self) -> Option<crate::types::Temperature> {
        self.feed.reading()
    }

    fn supported_features(&self) -> SupportedFeatures {
        SupportedFeatures {
            target_temperature: true,
            preset_mode: true,
        }
    }

    fn record_temperature(&mut self, raw: &str) {
        self.feed.apply_reading(raw);
    }

    fn apply_states(&mut self, states: &ActiveStates) -> Result<()> {
        self.read_states(states)
    }

    async fn set_hvac_mode(&mut self, mode: HvacMode) -> Result<()> {
        if !HVAC_MODES.contains(&mode) {
            tracing::warn!(
                label = %self.label,
                mode = %mode,
                "hvac mode is not available for this heater"
            );
            return Ok(());
        }
        if mode == self.hvac_mode {
            return Ok(());
        }

        match mode {
            HvacMode::Off => self.apply_level(HeatingLevel::Off).await?,
            _ => self.apply_level(self.user_level).await?,
        }
        self.hvac_mode = mode;
        Ok(())
    }

    async fn set_preset_mode(&mut self, preset: &str) -> Result<()> {
        if !PRESET_MODES.contains(&preset) {
            tracing::warn!(
                label = %self.label,
                preset,
                "preset is not available for this heater"
            );
            return Ok(());
        }
        let level: HeatingLevel = preset.parse()?;

        self.user_level = level;
        if level != self.level {
            self.apply_level(level).await?;
        }
        self.hvac_mode = HvacMode::Heat;
        Ok(())
    }

    async fn set_temperature(&mut self, celsius: f32) -> Result<()> {
        self.target = Some(TargetTemperature::clamped(celsius));
        self.run_hysteresis().await?;
        Ok(())
    }
}
