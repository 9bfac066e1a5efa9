// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge configuration.

use std::time::Duration;

use crate::hub::Endpoint;

/// Default interval between device state polls.
const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(30);

/// Default interval between hub-wide state refresh requests.
const DEFAULT_REFRESH_STATE_INTERVAL: Duration = Duration::from_secs(120);

/// Configuration for a [`Bridge`](super::Bridge).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tahoma_bridge::hub::Endpoint;
/// use tahoma_bridge::manager::BridgeConfig;
///
/// let config = BridgeConfig::new("user@example.com", "secret")
///     .with_endpoint(Endpoint::SomfyEurope)
///     .with_update_interval(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    username: String,
    password: String,
    endpoint: Endpoint,
    update_interval: Duration,
    refresh_state_interval: Duration,
}

impl BridgeConfig {
    /// Creates a configuration with default intervals and the default
    /// endpoint region.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            endpoint: Endpoint::default(),
            update_interval: DEFAULT_UPDATE_INTERVAL,
            refresh_state_interval: DEFAULT_REFRESH_STATE_INTERVAL,
        }
    }

    /// Selects the cloud endpoint region.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Sets the interval between device state polls.
    #[must_use]
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Sets the interval between hub-wide state refresh requests.
    #[must_use]
    pub fn with_refresh_state_interval(mut self, interval: Duration) -> Self {
        self.refresh_state_interval = interval;
        self
    }

    /// Returns the account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the account password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the endpoint region.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Returns the device poll interval.
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Returns the hub-wide refresh interval.
    #[must_use]
    pub fn refresh_state_interval(&self) -> Duration {
        self.refresh_state_interval
    }
}
