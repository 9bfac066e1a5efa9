// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `TaHoma` Bridge - a Rust library bridging Somfy TaHoma hub devices into
//! a home-automation entity model.
//!
//! The bridge talks to the TaHoma cloud API, discovers the devices behind a
//! hub, and exposes them as typed entities: climate devices for two
//! thermostat families, scenes for stored action groups, and an event bus
//! announcing discovery, state changes and command executions.
//!
//! # Supported Features
//!
//! - **Climate control**: programme/override handling for the
//!   `SomfyThermostat` family, level-based regulation with on/off
//!   hysteresis for the `AtlanticElectricalHeater` family
//! - **Scenes**: activation of scenarios stored on the hub
//! - **Discovery**: widget/UI-class to platform mapping, gateway records
//! - **Services**: raw command execution and hub-wide state refresh
//!
//! # Quick Start
//!
//! ```no_run
//! use tahoma_bridge::climate::{Climate, SomfyThermostat};
//! use tahoma_bridge::device::Widget;
//! use tahoma_bridge::manager::{Bridge, BridgeConfig};
//!
//! #[tokio::main]
//! async fn main() -> tahoma_bridge::Result<()> {
//!     let config = BridgeConfig::new("user@example.com", "secret");
//!     let bridge = Bridge::from_config(config)?;
//!     bridge.connect().await?;
//!
//!     // Keep states fresh in the background
//!     let poll = bridge.spawn_poll_task();
//!     let refresh = bridge.spawn_refresh_task();
//!
//!     // Build climate entities for the discovered thermostats
//!     for device in bridge.devices().await {
//!         if device.widget() == &Widget::SomfyThermostat {
//!             let mut thermostat = SomfyThermostat::from_device(bridge.client(), &device)?;
//!             thermostat.set_temperature(21.0).await?;
//!         }
//!     }
//!
//!     poll.abort();
//!     refresh.abort();
//!     Ok(())
//! }
//! ```
//!
//! # Events
//!
//! ```no_run
//! use tahoma_bridge::event::BridgeEvent;
//! use tahoma_bridge::manager::{Bridge, BridgeConfig};
//!
//! #[tokio::main]
//! async fn main() -> tahoma_bridge::Result<()> {
//!     let bridge = Bridge::from_config(BridgeConfig::new("user@example.com", "secret"))?;
//!     let mut events = bridge.subscribe();
//!     bridge.connect().await?;
//!
//!     while let Ok(event) = events.recv().await {
//!         match event {
//!             BridgeEvent::StatesUpdated { device_url } => {
//!                 println!("states changed: {device_url}");
//!             }
//!             other => println!("{other:?}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod climate;
pub mod command;
pub mod device;
pub mod discovery;
pub mod error;
pub mod event;
pub mod hub;
pub mod manager;
pub mod scene;
pub mod types;

pub use climate::{AtlanticHeater, Climate, SomfyThermostat, SupportedFeatures};
pub use command::{
    Command, CommandParam, DerogationCommand, GenericCommand, HeatingLevelCommand,
    ModeTemperatureCommand, RefreshStateCommand,
};
pub use device::{ActiveStates, Device, DeviceUrl, StateValue, Widget};
pub use error::{DeviceError, Error, HubError, ParseError, Result, ValueError};
pub use event::{BridgeEvent, EventBus};
pub use hub::{Endpoint, ExecutionId, HubClient, Scenario, TahomaHttpClient};
pub use manager::{Bridge, BridgeConfig};
pub use scene::Scene;
pub use types::{
    DerogationKind, HeatingLevel, HvacAction, HvacMode, PresetMode, TargetTemperature, Temperature,
};
