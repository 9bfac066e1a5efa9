// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge coordinating the hub client, device table and event bus.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;

use crate::command::Command;
use crate::device::{Device, DeviceUrl};
use crate::discovery::{classify_devices, DiscoveredDevices, GatewayInfo};
use crate::error::{DeviceError, Error, Result};
use crate::event::{BridgeEvent, EventBus};
use crate::hub::{Execution, ExecutionId, HubClient, TahomaHttpClient};
use crate::scene::Scene;

use super::BridgeConfig;

type DeviceTable = Arc<RwLock<HashMap<DeviceUrl, Device>>>;

/// Bridge between a hub account and the entity model.
///
/// The bridge owns the hub client, tracks the account's devices, and
/// broadcasts [`BridgeEvent`]s for discovery, polled state changes and
/// command executions. Entities are built from snapshots of the device
/// table and share the bridge's client.
///
/// # Examples
///
/// ```no_run
/// use tahoma_bridge::manager::{Bridge, BridgeConfig};
///
/// #[tokio::main]
/// async fn main() -> tahoma_bridge::Result<()> {
///     let config = BridgeConfig::new("user@example.com", "secret");
///     let bridge = Bridge::from_config(config)?;
///
///     let mut events = bridge.subscribe();
///     bridge.connect().await?;
///
///     let poll = bridge.spawn_poll_task();
///     while let Ok(event) = events.recv().await {
///         println!("{event:?}");
///     }
///     poll.abort();
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Bridge<C> {
    client: Arc<C>,
    config: BridgeConfig,
    devices: DeviceTable,
    event_bus: EventBus,
}

impl<C: HubClient> Bridge<C> {
    /// Creates a bridge around an existing hub client.
    #[must_use]
    pub fn new(client: C, config: BridgeConfig) -> Self {
        Self {
            client: Arc::new(client),
            config,
            devices: Arc::new(RwLock::new(HashMap::new())),
            event_bus: EventBus::new(),
        }
    }

    /// Returns the shared hub client, for constructing entities.
    #[must_use]
    pub fn client(&self) -> Arc<C> {
        self.client.clone()
    }

    /// Returns the bridge configuration.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Subscribes to bridge events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.event_bus.subscribe()
    }

    /// Logs in and loads the account's devices.
    ///
    /// # Errors
    ///
    /// Returns the hub error unchanged so callers can distinguish fatal
    /// failures (bad credentials) from transient ones via
    /// [`HubError::is_retryable`](crate::error::HubError::is_retryable).
    pub async fn connect(&self) -> Result<()> {
        if let Err(err) = self.client.login().await {
            if err.is_retryable() {
                tracing::warn!(%err, "hub not ready, setup should be retried");
            } else {
                tracing::error!(%err, "hub rejected setup");
            }
            return Err(err.into());
        }

        self.sync_devices().await?;
        tracing::info!(
            devices = self.devices.read().await.len(),
            "connected to hub"
        );
        Ok(())
    }

    /// Reconciles the device table with the hub's setup.
    ///
    /// New devices are added and announced; devices that disappeared from
    /// the setup are removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the device list cannot be fetched.
    pub async fn sync_devices(&self) -> Result<()> {
        let fetched = self.client.get_devices().await?;
        let mut devices = self.devices.write().await;

        let known: HashSet<DeviceUrl> = fetched.iter().map(|d| d.device_url().clone()).collect();
        let stale: Vec<DeviceUrl> = devices
            .keys()
            .filter(|url| !known.contains(url))
            .cloned()
            .collect();
        for url in stale {
            devices.remove(&url);
            self.event_bus.publish(BridgeEvent::device_removed(url));
        }

        for device in fetched {
            let url = device.device_url().clone();
            if let Some(existing) = devices.get_mut(&url) {
                existing.update_states(device.states().clone());
            } else {
                devices.insert(url.clone(), device);
                self.event_bus.publish(BridgeEvent::device_added(url));
            }
        }
        Ok(())
    }

    /// Polls the states of all tracked devices once.
    ///
    /// Publishes a state event for each device whose states changed and
    /// returns how many did.
    ///
    /// # Errors
    ///
    /// Returns an error if the state request fails.
    pub async fn poll_once(&self) -> Result<usize> {
        poll_devices(self.client.as_ref(), &self.devices, &self.event_bus).await
    }

    /// Returns a snapshot of all tracked devices.
    pub async fn devices(&self) -> Vec<Device> {
        self.devices.read().await.values().cloned().collect()
    }

    /// Returns a snapshot of one tracked device.
    pub async fn device(&self, url: &DeviceUrl) -> Option<Device> {
        self.devices.read().await.get(url).cloned()
    }

    /// Sorts the tracked devices into entity platforms.
    pub async fn discover(&self) -> DiscoveredDevices {
        classify_devices(self.devices().await)
    }

    /// Applies a command to a tracked device.
    ///
    /// This is the outward command-execution service: any vendor command
    /// can be forwarded, typically as a
    /// [`GenericCommand`](crate::command::GenericCommand).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] for unknown devices,
    /// [`DeviceError::UnsupportedOperation`] if the device's definition
    /// does not list the command, or the hub error if the execution is
    /// rejected.
    pub async fn execute_command<K: Command + Sync>(
        &self,
        device_url: &DeviceUrl,
        command: &K,
    ) -> Result<ExecutionId> {
        {
            let devices = self.devices.read().await;
            let Some(device) = devices.get(device_url) else {
                return Err(Error::DeviceNotFound);
            };
            // Devices synthesized without a definition carry no command
            // list; only a populated definition is authoritative.
            if !device.commands().is_empty() && !device.supports_command(command.name()) {
                return Err(DeviceError::UnsupportedOperation {
                    widget: device.widget().to_string(),
                    operation: command.name().to_string(),
                }
                .into());
            }
        }

        tracing::debug!(device_url = %device_url, command = command.name(), "executing command");
        let id = self.client.apply_action(device_url, command).await?;
        self.event_bus
            .publish(BridgeEvent::execution_started(device_url.clone(), id));
        Ok(id)
    }

    /// Asks the hub to refresh all device states from the field.
    ///
    /// This is the outward refresh-states service; the refreshed values
    /// arrive with the next poll.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn refresh_states(&self) -> Result<()> {
        self.client.refresh_states().await?;
        self.event_bus.publish(BridgeEvent::RefreshRequested);
        Ok(())
    }

    /// Returns the executions currently running on the hub.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn current_executions(&self) -> Result<Vec<Execution>> {
        Ok(self.client.get_current_executions().await?)
    }

    /// Returns scene entities for the scenarios stored on the hub.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario list cannot be fetched.
    pub async fn scenes(&self) -> Result<Vec<Scene<C>>> {
        let scenarios = self.client.get_scenarios().await?;
        Ok(scenarios
            .into_iter()
            .map(|scenario| Scene::new(self.client.clone(), scenario))
            .collect())
    }

    /// Executes a stored scenario by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SceneNotFound`] if no stored scenario has this
    /// identifier, or the hub error if the execution is rejected.
    pub async fn activate_scene(&self, oid: &str) -> Result<ExecutionId> {
        let scenarios = self.client.get_scenarios().await?;
        if !scenarios.iter().any(|s| s.oid == oid) {
            return Err(Error::SceneNotFound);
        }

        let id = self.client.execute_scenario(oid).await?;
        self.event_bus.publish(BridgeEvent::scenario_started(id));
        Ok(id)
    }

    /// Returns registration records for the account's gateways.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway list cannot be fetched.
    pub async fn gateways(&self) -> Result<Vec<GatewayInfo>> {
        let gateways = self.client.get_gateways().await?;
        Ok(gateways.iter().map(GatewayInfo::from_gateway).collect())
    }

    /// Fetches the hub's execution history and logs each recorded command.
    ///
    /// Useful for surfacing commands issued outside the bridge (vendor
    /// app, physical controls).
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be fetched.
    pub async fn log_execution_history(&self) -> Result<()> {
        for entry in self.client.get_execution_history().await? {
            for command in &entry.commands {
                tracing::info!(
                    label = %entry.label,
                    device_url = %command.device_url,
                    command = %command.command,
                    parameters = ?command.parameters,
                    timestamp = ?entry.timestamp(),
                    "command executed on hub"
                );
            }
        }
        Ok(())
    }
}

impl Bridge<TahomaHttpClient> {
    /// Creates a bridge with an HTTP client built from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: BridgeConfig) -> Result<Self> {
        let client = TahomaHttpClient::builder()
            .credentials(config.username(), config.password())
            .endpoint(config.endpoint())
            .build()?;
        Ok(Self::new(client, config))
    }

    /// Spawns the periodic device poll task.
    ///
    /// Runs [`poll_once`](Self::poll_once) every
    /// [`update_interval`](BridgeConfig::update_interval); failures are
    /// logged and the loop keeps running. Abort the handle to stop it.
    #[must_use]
    pub fn spawn_poll_task(&self) -> JoinHandle<()> {
        let client = self.client.clone();
        let devices = self.devices.clone();
        let event_bus = self.event_bus.clone();
        let period = self.config.update_interval();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(err) = poll_devices(client.as_ref(), &devices, &event_bus).await {
                    tracing::warn!(%err, "device state poll failed");
                }
            }
        })
    }

    /// Spawns the periodic hub-wide state refresh task.
    ///
    /// Asks the hub to refresh field data every
    /// [`refresh_state_interval`](BridgeConfig::refresh_state_interval).
    /// Abort the handle to stop it.
    #[must_use]
    pub fn spawn_refresh_task(&self) -> JoinHandle<()> {
        let client = self.client.clone();
        let event_bus = self.event_bus.clone();
        let period = self.config.refresh_state_interval();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            interval.tick().await;
            loop {
                interval.tick().await;
                match client.refresh_states().await {
                    Ok(()) => event_bus.publish(BridgeEvent::RefreshRequested),
                    Err(err) => tracing::warn!(%err, "periodic state refresh failed"),
                }
            }
        })
    }
}

async fn poll_devices<C: HubClient>(
    client: &C,
    devices: &RwLock<HashMap<DeviceUrl, Device>>,
    event_bus: &EventBus,
) -> Result<usize> {
    let urls: Vec<DeviceUrl> = devices.read().await.keys().cloned().collect();
    if urls.is_empty() {
        return Ok(0);
    }

    let polled = client.get_states(&urls).await?;

    let mut devices = devices.write().await;
    let mut changed = 0;
    for (url, states) in polled {
        let Some(device) = devices.get_mut(&url) else {
            continue;
        };
        let before = device.states().clone();
        device.update_states(states);
        if *device.states() != before {
            changed += 1;
            event_bus.publish(BridgeEvent::states_updated(url));
        }
    }

    tracing::debug!(polled = urls.len(), changed, "device state poll finished");
    Ok(changed)
}
