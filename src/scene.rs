// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene entities backed by hub scenarios.

use std::sync::Arc;

use crate::error::Result;
use crate::hub::{ExecutionId, HubClient, Scenario};

/// A scene backed by a scenario stored on the hub.
///
/// Scenes are one-shot: activating one submits the stored action group for
/// execution and returns the execution id for tracking.
///
/// # Examples
///
/// ```no_run
/// # async fn example<C: tahoma_bridge::hub::HubClient>(client: std::sync::Arc<C>) -> tahoma_bridge::Result<()> {
/// use tahoma_bridge::hub::Scenario;
/// use tahoma_bridge::scene::Scene;
///
/// let scenario = Scenario { oid: "abc-123".to_string(), label: "Good night".to_string() };
/// let scene = Scene::new(client, scenario);
/// scene.activate().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Scene<C> {
    client: Arc<C>,
    scenario: Scenario,
}

impl<C: HubClient> Scene<C> {
    /// Creates a scene from a hub scenario.
    #[must_use]
    pub fn new(client: Arc<C>, scenario: Scenario) -> Self {
        Self { client, scenario }
    }

    /// Returns the user-visible scene name.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.scenario.label
    }

    /// Returns the scenario identifier.
    #[must_use]
    pub fn oid(&self) -> &str {
        &self.scenario.oid
    }

    /// Executes the scenario on the hub.
    ///
    /// # Errors
    ///
    /// Returns an error if the hub rejects the execution.
    pub async fn activate(&self) -> Result<ExecutionId> {
        tracing::debug!(label = %self.scenario.label, oid = %self.scenario.oid, "activating scene");
        let id = self.client.execute_scenario(&self.scenario.oid).await?;
        Ok(id)
    }
}
