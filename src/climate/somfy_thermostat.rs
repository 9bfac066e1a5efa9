// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Programmable thermostat entity.

use std::sync::Arc;

use crate::climate::{Climate, SupportedFeatures, TemperatureFeed};
use crate::command::{DerogationCommand, ModeTemperatureCommand};
use crate::device::{states::names, ActiveStates, Device, DeviceUrl};
use crate::error::Result;
use crate::hub::HubClient;
use crate::types::{DerogationKind, HvacAction, HvacMode, PresetMode, TargetTemperature};

const HVAC_MODES: [HvacMode; 2] = [HvacMode::Heat, HvacMode::Auto];
const PRESET_MODES: [&str; 5] = ["none", "freeze", "sleep", "away", "home"];

/// Entity for the programmable thermostat family.
///
/// The thermostat runs a weekly programme. Manual control goes through
/// derogations: a derogation until a fixed `date` means the programme is
/// still in charge (`Auto`), while `next_mode`/`further_notice` derogations
/// are manual overrides (`Heat`). Which vendor states hold the active
/// preset and set-point depends on whether a derogation is running.
///
/// Entering an override saves the programmed set-point; leaving it restores
/// exactly that value.
#[derive(Debug)]
pub struct SomfyThermostat<C> {
    client: Arc<C>,
    device_url: DeviceUrl,
    label: String,
    hvac_mode: HvacMode,
    hvac_action: HvacAction,
    preset_mode: PresetMode,
    target: TargetTemperature,
    stored_target: TargetTemperature,
    feed: TemperatureFeed,
}

impl<C: HubClient> SomfyThermostat<C> {
    /// Creates the entity from a discovered device.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is missing one of the thermostat
    /// states or reports a value outside the vendor vocabulary.
    pub fn from_device(client: Arc<C>, device: &Device) -> Result<Self> {
        let mut entity = Self {
            client,
            device_url: device.device_url().clone(),
            label: device.label().to_string(),
            hvac_mode: HvacMode::Auto,
            hvac_action: HvacAction::Idle,
            preset_mode: PresetMode::None,
            target: TargetTemperature::MIN,
            stored_target: TargetTemperature::MIN,
            feed: TemperatureFeed::new(),
        };
        entity.read_states(device.states())?;
        entity.stored_target = entity.target;
        Ok(entity)
    }

    /// Returns the set-point that will be restored when the current
    /// override ends.
    #[must_use]
    pub fn stored_target_temperature(&self) -> TargetTemperature {
        self.stored_target
    }

    fn read_states(&mut self, states: &ActiveStates) -> Result<()> {
        self.hvac_mode =
            HvacMode::from_derogation_state(states.get_str(names::DEROGATION_TYPE)?)?;

        // A running derogation moves the active preset and set-point into
        // the derogation states.
        let (preset_state, target_state) = if self.hvac_mode == HvacMode::Auto {
            (names::HEATING_MODE, names::TARGET_TEMPERATURE)
        } else {
            (
                names::DEROGATION_HEATING_MODE,
                names::DEROGATED_TARGET_TEMPERATURE,
            )
        };
        self.preset_mode = PresetMode::from_vendor_str(states.get_str(preset_state)?)?;
        self.target = TargetTemperature::clamped(states.get_f32(target_state)?);

        self.recompute_action();
        Ok(())
    }

    fn recompute_action(&mut self) {
        self.hvac_action = match self.feed.reading() {
            Some(current) if current.value() <= self.target.value() => HvacAction::Heating,
            _ => HvacAction::Idle,
        };
    }

    async fn apply_target(&mut self, target: TargetTemperature) -> Result<()> {
        self.client
            .apply_action(
                &self.device_url,
                &DerogationCommand::set_temperature(target, DerogationKind::FurtherNotice),
            )
            .await?;
        self.client
            .apply_action(&self.device_url, &ModeTemperatureCommand::manual(target))
            .await?;
        self.target = target;
        Ok(())
    }
}

impl<C: HubClient> Climate for SomfyThermostat<C> {
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
        self.hvac_action
    }

    fn preset_mode(&self) -> &'static str {
        self.preset_mode.as_str()
    }

    fn preset_modes(&self) -> &[&'static str] {
        &PRESET_MODES
    }

    fn target_temperature(&self) -> Option<TargetTemperature> {
        Some(self.target)
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
        self.recompute_action();
    }

    fn apply_states(&mut self, states: &ActiveStates) -> Result<()> {
        self.read_states(states)
    }

    async fn set_hvac_mode(&mut self, mode: HvacMode) -> Result<()> {
        if !HVAC_MODES.contains(&mode) {
            tracing::warn!(
                label = %self.label,
                mode = %mode,
                "hvac mode is not available for this thermostat"
            );
            return Ok(());
        }

        match mode {
            HvacMode::Auto if self.hvac_mode != HvacMode::Auto => {
                self.stored_target = self.target;
                self.client
                    .apply_action(&self.device_url, &DerogationCommand::Exit)
                    .await?;
                self.hvac_mode = HvacMode::Auto;
            }
            HvacMode::Heat if self.hvac_mode != HvacMode::Heat => {
                self.target = self.stored_target;
                self.preset_mode = PresetMode::None;
                self.client
                    .apply_action(
                        &self.device_url,
                        &DerogationCommand::set_temperature(
                            self.target,
                            DerogationKind::FurtherNotice,
                        ),
                    )
                    .await?;
                self.hvac_mode = HvacMode::Heat;
            }
            _ => {}
        }
        Ok(())
    }

    async fn set_preset_mode(&mut self, preset: &str) -> Result<()> {
        let Ok(preset) = preset.parse::<PresetMode>() else {
            tracing::warn!(
                label = %self.label,
                preset,
                "preset is not available for this thermostat"
            );
            return Ok(());
        };

        if preset == self.preset_mode {
            return Ok(());
        }

        if preset == PresetMode::None {
            // Leaving the preset restores the set-point saved when it was
            // entered.
            self.preset_mode = PresetMode::None;
            let target = self.stored_target;
            self.apply_target(target).await?;
        } else {
            self.preset_mode = preset;
            self.stored_target = self.target;
            self.client
                .apply_action(
                    &self.device_url,
                    &DerogationCommand::set_preset(preset, DerogationKind::FurtherNotice),
                )
                .await?;
        }
        Ok(())
    }

    async fn set_temperature(&mut self, celsius: f32) -> Result<()> {
        if celsius < TargetTemperature::MIN.value() {
            tracing::debug!(
                label = %self.label,
                requested = celsius,
                "set-point below safe range, engaging frost protection"
            );
            self.client
                .apply_action(
                    &self.device_url,
                    &DerogationCommand::set_preset(
                        PresetMode::Freeze,
                        DerogationKind::FurtherNotice,
                    ),
                )
                .await?;
        }

        let target = TargetTemperature::clamped(celsius);
        self.apply_target(target).await?;
        self.recompute_action();
        Ok(())
    }
}
