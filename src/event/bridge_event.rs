// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge event types.

use crate::device::DeviceUrl;
use crate::hub::ExecutionId;

/// Events emitted by the bridge.
///
/// These events notify subscribers about device discovery, polled state
/// updates and command executions. All device events carry the vendor
/// device URL for targeted handling.
///
/// # Examples
///
/// ```
/// use tahoma_bridge::device::DeviceUrl;
/// use tahoma_bridge::event::BridgeEvent;
///
/// let event = BridgeEvent::states_updated(DeviceUrl::new("io://gw/1"));
/// assert!(event.is_state_update());
/// ```
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    /// A device was discovered and added to the bridge.
    DeviceAdded {
        /// The vendor URL of the added device.
        device_url: DeviceUrl,
    },

    /// A device disappeared from the hub's setup and was removed.
    DeviceRemoved {
        /// The vendor URL of the removed device.
        device_url: DeviceUrl,
    },

    /// A poll produced new active states for a device.
    StatesUpdated {
        /// The vendor URL of the updated device.
        device_url: DeviceUrl,
    },

    /// An entity gained or lost its temperature reading.
    AvailabilityChanged {
        /// The vendor URL of the affected device.
        device_url: DeviceUrl,
        /// Whether the entity is usable now.
        available: bool,
    },

    /// A command execution was submitted to the hub.
    ExecutionStarted {
        /// The device the command targets, if any (scenarios have none).
        device_url: Option<DeviceUrl>,
        /// The hub-assigned execution id.
        execution_id: ExecutionId,
    },

    /// A hub-wide state refresh was requested.
    RefreshRequested,
}

impl BridgeEvent {
    /// Returns the device URL associated with this event, if any.
    #[must_use]
    pub fn device_url(&self) -> Option<&DeviceUrl> {
        match self {
            Self::DeviceAdded { device_url }
            | Self::DeviceRemoved { device_url }
            | Self::StatesUpdated { device_url }
            | Self::AvailabilityChanged { device_url, .. } => Some(device_url),
            Self::ExecutionStarted { device_url, .. } => device_url.as_ref(),
            Self::RefreshRequested => None,
        }
    }

    /// Returns `true` if this is a discovery event (added/removed).
    #[must_use]
    pub fn is_discovery(&self) -> bool {
        matches!(self, Self::DeviceAdded { .. } | Self::DeviceRemoved { .. })
    }

    /// Returns `true` if this is a state update event.
    #[must_use]
    pub fn is_state_update(&self) -> bool {
        matches!(self, Self::StatesUpdated { .. })
    }

    /// Creates a device added event.
    #[must_use]
    pub fn device_added(device_url: DeviceUrl) -> Self {
        Self::DeviceAdded { device_url }
    }

    /// Creates a device removed event.
    #[must_use]
    pub fn device_removed(device_url: DeviceUrl) -> Self {
        Self::DeviceRemoved { device_url }
    }

    /// Creates a states updated event.
    #[must_use]
    pub fn states_updated(device_url: DeviceUrl) -> Self {
        Self::StatesUpdated { device_url }
    }

    /// Creates an availability changed event.
    #[must_use]
    pub fn availability_changed(device_url: DeviceUrl, available: bool) -> Self {
        Self::AvailabilityChanged {
            device_url,
            available,
        }
    }

    /// Creates an execution started event for a device command.
    #[must_use]
    pub fn execution_started(device_url: DeviceUrl, execution_id: ExecutionId) -> Self {
        Self::ExecutionStarted {
            device_url: Some(device_url),
            execution_id,
        }
    }

    /// Creates an execution started event for a scenario.
    #[must_use]
    pub fn scenario_started(execution_id: ExecutionId) -> Self {
        Self::ExecutionStarted {
            device_url: None,
            execution_id,
        }
    }
}
