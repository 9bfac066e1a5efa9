// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core value types shared across the bridge.
//!
//! These types form the fixed vocabulary the climate layer translates
//! between: vendor state strings on one side, entity-model enums on the
//! other. Constrained values (target temperatures) validate on
//! construction so entities never carry out-of-range set-points.

mod derogation;
mod hvac;
mod preset;
mod temperature;

pub use derogation::DerogationKind;
pub use hvac::{HvacAction, HvacMode};
pub use preset::{HeatingLevel, PresetMode};
pub use temperature::{TargetTemperature, Temperature};
