// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the TaHoma cloud API.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::command::Command;
use crate::device::{ActiveStates, Device, DeviceUrl, StateValue};
use crate::error::HubError;

use super::{Execution, ExecutionId, Gateway, HistoryEntry, HubClient, Scenario};

/// Cloud endpoint of a hub region.
///
/// # Examples
///
/// ```
/// use tahoma_bridge::hub::Endpoint;
///
/// assert!(Endpoint::SomfyEurope.base_url().starts_with("https://"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endpoint {
    /// Somfy Europe, Middle East and Africa (the default).
    #[default]
    SomfyEurope,
    /// Somfy Oceania.
    SomfyOceania,
    /// Somfy North America.
    SomfyNorthAmerica,
}

impl Endpoint {
    /// Returns the API base URL for this region.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::SomfyEurope => "https://ha101-1.overkiz.com/enduser-mobile-web/enduserAPI",
            Self::SomfyOceania => "https://ha201-1.overkiz.com/enduser-mobile-web/enduserAPI",
            Self::SomfyNorthAmerica => "https://ha401-1.overkiz.com/enduser-mobile-web/enduserAPI",
        }
    }
}

/// Builder for [`TahomaHttpClient`].
///
/// # Examples
///
/// ```no_run
/// use tahoma_bridge::hub::{Endpoint, TahomaHttpClient};
/// use std::time::Duration;
///
/// # fn example() -> tahoma_bridge::Result<()> {
/// let client = TahomaHttpClient::builder()
///     .credentials("user@example.com", "secret")
///     .endpoint(Endpoint::SomfyEurope)
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TahomaHttpClientBuilder {
    username: String,
    password: String,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl TahomaHttpClientBuilder {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account credentials.
    #[must_use]
    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Selects the cloud endpoint region.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.base_url = Some(endpoint.base_url().to_string());
        self
    }

    /// Overrides the API base URL. Used by tests against a local server.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns `HubError::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<TahomaHttpClient, HubError> {
        let http = Client::builder()
            .timeout(self.timeout.unwrap_or(Self::DEFAULT_TIMEOUT))
            .build()
            .map_err(HubError::Http)?;

        Ok(TahomaHttpClient {
            http,
            base_url: self
                .base_url
                .unwrap_or_else(|| Endpoint::default().base_url().to_string()),
            username: self.username,
            password: self.password,
            session: RwLock::new(None),
        })
    }
}

/// HTTP implementation of [`HubClient`] against the TaHoma cloud API.
///
/// Holds the session cookie issued at login; callers are expected to call
/// [`HubClient::login`] once before other operations. Retry and backoff are
/// left to the caller; this client only classifies failures.
#[derive(Debug)]
pub struct TahomaHttpClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
    /// Session cookie captured from the login response.
    session: RwLock<Option<String>>,
}

impl TahomaHttpClient {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> TahomaHttpClientBuilder {
        TahomaHttpClientBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn session_cookie(&self) -> Result<String, HubError> {
        self.session
            .read()
            .clone()
            .ok_or(HubError::NotAuthenticated)
    }

    /// Maps non-success statuses to classified hub errors.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, HubError> {
        let status = response.status();
        match status {
            s if s.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(HubError::NotAuthenticated),
            StatusCode::TOO_MANY_REQUESTS => Err(HubError::TooManyRequests),
            StatusCode::SERVICE_UNAVAILABLE => Err(HubError::Maintenance),
            s => {
                let message = response.text().await.unwrap_or_default();
                Err(HubError::UnexpectedStatus {
                    status: s.as_u16(),
                    message,
                })
            }
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, HubError> {
        let cookie = self.session_cookie()?;
        let response = self
            .http
            .get(self.url(path))
            .header(reqwest::header::COOKIE, cookie)
            .send()
            .await
            .map_err(HubError::Http)?;

        Self::check(response).await?.json().await.map_err(HubError::Http)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, HubError> {
        let cookie = self.session_cookie()?;
        let mut request = self
            .http
            .post(self.url(path))
            .header(reqwest::header::COOKIE, cookie);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(HubError::Http)?;

        Self::check(response).await?.json().await.map_err(HubError::Http)
    }
}

/// Reply to `exec/apply` and scenario executions.
#[derive(Deserialize)]
struct ExecReply {
    #[serde(rename = "execId")]
    exec_id: ExecutionId,
}

/// One entry of a device's states listing.
#[derive(Deserialize)]
struct StateReply {
    name: String,
    value: StateValue,
}

impl HubClient for TahomaHttpClient {
    async fn login(&self) -> Result<(), HubError> {
        tracing::debug!(base_url = %self.base_url, "Logging in to hub");

        let response = self
            .http
            .post(self.url("login"))
            .form(&[
                ("userId", self.username.as_str()),
                ("userPassword", self.password.as_str()),
            ])
            .send()
            .await
            .map_err(HubError::Http)?;

        // On the login path a 401 means rejected credentials, which is
        // fatal rather than retryable.
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(HubError::BadCredentials);
        }

        let response = Self::check(response).await?;

        let cookie = response
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(ToString::to_string)
            .ok_or_else(|| HubError::UnexpectedStatus {
                status: 200,
                message: "login reply carried no session cookie".to_string(),
            })?;

        *self.session.write() = Some(cookie);
        Ok(())
    }

    async fn get_devices(&self) -> Result<Vec<Device>, HubError> {
        self.get_json("setup/devices").await
    }

    async fn get_states(
        &self,
        devices: &[DeviceUrl],
    ) -> Result<HashMap<DeviceUrl, ActiveStates>, HubError> {
        let mut all = HashMap::with_capacity(devices.len());

        for device in devices {
            let path = format!("setup/devices/{}/states", device.encoded());
            let states: Vec<StateReply> = self.get_json(&path).await?;
            all.insert(
                device.clone(),
                states.into_iter().map(|s| (s.name, s.value)).collect(),
            );
        }

        Ok(all)
    }

    async fn apply_action<C: Command + Sync>(
        &self,
        device: &DeviceUrl,
        command: &C,
    ) -> Result<ExecutionId, HubError> {
        tracing::debug!(device = %device, command = command.name(), "Applying action");

        let body = serde_json::json!({
            "label": "tahoma_bridge",
            "actions": [{
                "deviceURL": device.as_str(),
                "commands": [command.to_payload()],
            }],
        });

        let reply: ExecReply = self.post_json("exec/apply", Some(&body)).await?;
        Ok(reply.exec_id)
    }

    async fn get_current_executions(&self) -> Result<Vec<Execution>, HubError> {
        self.get_json("exec/current").await
    }

    async fn refresh_states(&self) -> Result<(), HubError> {
        let cookie = self.session_cookie()?;
        let response = self
            .http
            .post(self.url("setup/devices/states/refresh"))
            .header(reqwest::header::COOKIE, cookie)
            .send()
            .await
            .map_err(HubError::Http)?;

        Self::check(response).await?;
        Ok(())
    }

    async fn get_scenarios(&self) -> Result<Vec<Scenario>, HubError> {
        self.get_json("actionGroups").await
    }

    async fn execute_scenario(&self, oid: &str) -> Result<ExecutionId, HubError> {
        let path = format!("exec/{}", urlencoding::encode(oid));
        let reply: ExecReply = self.post_json(&path, None).await?;
        Ok(reply.exec_id)
    }

    async fn get_execution_history(&self) -> Result<Vec<HistoryEntry>, HubError> {
        self.get_json("history/executions").await
    }

    async fn get_gateways(&self) -> Result<Vec<Gateway>, HubError> {
        self.get_json("setup/gateways").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_europe_endpoint() {
        let client = TahomaHttpClient::builder()
            .credentials("user", "pass")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), Endpoint::SomfyEurope.base_url());
    }

    #[test]
    fn builder_base_url_override() {
        let client = TahomaHttpClient::builder()
            .credentials("user", "pass")
            .base_url("http://127.0.0.1:8080")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
    }

    #[tokio::test]
    async fn requests_without_login_fail() {
        let client = TahomaHttpClient::builder()
            .credentials("user", "pass")
            .base_url("http://127.0.0.1:1")
            .build()
            .unwrap();

        let err = client.get_devices().await.unwrap_err();
        assert!(matches!(err, HubError::NotAuthenticated));
    }

    #[test]
    fn endpoint_urls_are_https() {
        for endpoint in [
            Endpoint::SomfyEurope,
            Endpoint::SomfyOceania,
            Endpoint::SomfyNorthAmerica,
        ] {
            assert!(endpoint.base_url().starts_with("https://"));
        }
    }
}
