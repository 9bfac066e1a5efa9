// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub client contract and supporting models.
//!
//! The [`HubClient`] trait is the seam between the bridge and the vendor
//! cloud API: everything above it (entities, manager) is written against
//! the trait so tests can substitute an in-memory hub. The concrete
//! [`TahomaHttpClient`] lives in [`http`].

mod http;

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::command::Command;
use crate::device::{ActiveStates, Device, DeviceUrl};
use crate::error::HubError;

pub use http::{Endpoint, TahomaHttpClient, TahomaHttpClientBuilder};

/// Identifier of a command execution running on the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ExecutionId(Uuid);

impl ExecutionId {
    /// Creates an execution id from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A command execution currently running on the hub.
#[derive(Debug, Clone, Deserialize)]
pub struct Execution {
    /// The execution identifier.
    pub id: ExecutionId,
    /// User-visible label the execution was submitted with.
    #[serde(default)]
    pub label: String,
    /// Vendor execution state, e.g. `IN_PROGRESS`.
    #[serde(default)]
    pub state: String,
}

/// A scenario (action group) stored on the hub.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    /// The scenario identifier used to execute it.
    pub oid: String,
    /// User-visible scenario name.
    #[serde(default)]
    pub label: String,
}

/// A gateway registered on the account.
#[derive(Debug, Clone, Deserialize)]
pub struct Gateway {
    /// Gateway identifier (the box PIN).
    #[serde(rename = "gatewayId")]
    pub id: String,
    /// Gateway type name.
    #[serde(rename = "type", default)]
    pub gateway_type: String,
    /// Gateway sub-type name.
    #[serde(rename = "subType", default)]
    pub sub_type: String,
    /// Connectivity details.
    #[serde(default)]
    pub connectivity: GatewayConnectivity,
}

/// Connectivity block of a gateway.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConnectivity {
    /// Connection status, e.g. `OK`.
    #[serde(default)]
    pub status: String,
    /// Firmware protocol version.
    #[serde(rename = "protocolVersion", default)]
    pub protocol_version: String,
}

/// One command recorded in the execution history.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryCommand {
    /// The device the command was applied to.
    #[serde(rename = "deviceURL")]
    pub device_url: DeviceUrl,
    /// The vendor command name.
    pub command: String,
    /// The command parameters as submitted.
    #[serde(default)]
    pub parameters: Vec<serde_json::Value>,
}

/// One entry of the hub's execution history.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    /// Label the execution was submitted with (the originating app).
    #[serde(default)]
    pub label: String,
    /// Event time in milliseconds since the epoch.
    #[serde(rename = "eventTime")]
    pub event_time: i64,
    /// Commands executed.
    #[serde(default)]
    pub commands: Vec<HistoryCommand>,
}

impl HistoryEntry {
    /// Returns the event time as a UTC timestamp.
    ///
    /// Returns `None` if the millisecond value is outside the representable
    /// range.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.event_time)
    }
}

/// Contract of the vendor hub client.
///
/// Session management, retries and the wire protocol are the client's
/// concern; callers only see classified [`HubError`]s.
#[allow(async_fn_in_trait)]
pub trait HubClient {
    /// Establishes a session with the hub.
    ///
    /// # Errors
    ///
    /// Returns `HubError::BadCredentials` for rejected credentials (fatal)
    /// and retryable variants for transient failures.
    async fn login(&self) -> Result<(), HubError>;

    /// Returns all devices registered on the account.
    ///
    /// # Errors
    ///
    /// Returns `HubError` if the request fails.
    async fn get_devices(&self) -> Result<Vec<Device>, HubError>;

    /// Fetches the current states of the given devices.
    ///
    /// # Errors
    ///
    /// Returns `HubError` if any state request fails.
    async fn get_states(
        &self,
        devices: &[DeviceUrl],
    ) -> Result<HashMap<DeviceUrl, ActiveStates>, HubError>;

    /// Applies a command to a device and returns the execution id.
    ///
    /// # Errors
    ///
    /// Returns `HubError` if the execution is rejected.
    async fn apply_action<C: Command + Sync>(
        &self,
        device: &DeviceUrl,
        command: &C,
    ) -> Result<ExecutionId, HubError>;

    /// Returns the executions currently running on the hub.
    ///
    /// # Errors
    ///
    /// Returns `HubError` if the request fails.
    async fn get_current_executions(&self) -> Result<Vec<Execution>, HubError>;

    /// Asks the hub to refresh all device states from the field.
    ///
    /// # Errors
    ///
    /// Returns `HubError` if the request fails.
    async fn refresh_states(&self) -> Result<(), HubError>;

    /// Returns the scenarios stored on the hub.
    ///
    /// # Errors
    ///
    /// Returns `HubError` if the request fails.
    async fn get_scenarios(&self) -> Result<Vec<Scenario>, HubError>;

    /// Executes a scenario and returns the execution id.
    ///
    /// # Errors
    ///
    /// Returns `HubError` if the execution is rejected.
    async fn execute_scenario(&self, oid: &str) -> Result<ExecutionId, HubError>;

    /// Returns the execution history.
    ///
    /// # Errors
    ///
    /// Returns `HubError` if the request fails.
    async fn get_execution_history(&self) -> Result<Vec<HistoryEntry>, HubError>;

    /// Returns the gateways registered on the account.
    ///
    /// # Errors
    ///
    /// Returns `HubError` if the request fails.
    async fn get_gateways(&self) -> Result<Vec<Gateway>, HubError>;
}


#[cfg(test)]
pub(crate) mod testing {
    //! In-memory hub used by entity and manager unit tests.

    use std::collections::HashMap;

    use parking_lot::Mutex;
    use uuid::Uuid;

    use super::{Execution, ExecutionId, Gateway, HistoryEntry, HubClient, Scenario};
    use crate::command::Command;
    use crate::device::{ActiveStates, Device, DeviceUrl};
    use crate::error::HubError;

    /// Records every applied action so tests can assert on the exact
    /// command payloads an entity produced.
    #[derive(Default)]
    pub(crate) struct RecordingHub {
        pub actions: Mutex<Vec<(DeviceUrl, serde_json::Value)>>,
        pub devices: Mutex<Vec<Device>>,
        pub states: Mutex<HashMap<DeviceUrl, ActiveStates>>,
        pub scenarios: Mutex<Vec<Scenario>>,
        pub executed_scenarios: Mutex<Vec<String>>,
        pub history: Mutex<Vec<HistoryEntry>>,
    }

    impl RecordingHub {
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns the vendor names of all applied commands, in order.
        pub fn action_names(&self) -> Vec<String> {
            self.actions
                .lock()
                .iter()
                .filter_map(|(_, payload)| {
                    payload["name"].as_str().map(ToString::to_string)
                })
                .collect()
        }

        /// Returns the payload of the nth applied command.
        pub fn action_payload(&self, index: usize) -> serde_json::Value {
            self.actions.lock()[index].1.clone()
        }

        pub fn action_count(&self) -> usize {
            self.actions.lock().len()
        }
    }

    impl HubClient for RecordingHub {
        async fn login(&self) -> Result<(), HubError> {
            Ok(())
        }

        async fn get_devices(&self) -> Result<Vec<Device>, HubError> {
            Ok(self.devices.lock().clone())
        }

        async fn get_states(
            &self,
            devices: &[DeviceUrl],
        ) -> Result<HashMap<DeviceUrl, ActiveStates>, HubError> {
            let states = self.states.lock();
            Ok(devices
                .iter()
                .filter_map(|url| states.get(url).map(|s| (url.clone(), s.clone())))
                .collect())
        }

        async fn apply_action<C: Command + Sync>(
            &self,
            device: &DeviceUrl,
            command: &C,
        ) -> Result<ExecutionId, HubError> {
            self.actions
                .lock()
                .push((device.clone(), command.to_payload()));
            Ok(ExecutionId::from_uuid(Uuid::new_v4()))
        }

        async fn get_current_executions(&self) -> Result<Vec<Execution>, HubError> {
            Ok(Vec::new())
        }

        async fn refresh_states(&self) -> Result<(), HubError> {
            Ok(())
        }

        async fn get_scenarios(&self) -> Result<Vec<Scenario>, HubError> {
            Ok(self.scenarios.lock().clone())
        }

        async fn execute_scenario(&self, oid: &str) -> Result<ExecutionId, HubError> {
            self.executed_scenarios.lock().push(oid.to_string());
            Ok(ExecutionId::from_uuid(Uuid::new_v4()))
        }

        async fn get_execution_history(&self) -> Result<Vec<HistoryEntry>, HubError> {
            Ok(self.history.lock().drain(..).collect())
        }

        async fn get_gateways(&self) -> Result<Vec<Gateway>, HubError> {
            Ok(Vec::new())
        }
    }
}
