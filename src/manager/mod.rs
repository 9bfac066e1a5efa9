// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge manager coordinating the hub client, devices and events.
//!
//! The [`Bridge`] is the long-lived coordinator: it logs in, tracks the
//! account's devices, polls their states on an interval, and exposes the
//! outward service surface (command execution, state refresh, scene
//! activation, execution history).

mod bridge;
mod bridge_config;

pub use bridge::Bridge;
pub use bridge_config::BridgeConfig;
