// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! External temperature sensor feed.

use crate::types::Temperature;

/// States a host sensor reports when it has no reading.
const NO_READING: [&str; 2] = ["unknown", "unavailable"];

/// Cached reading from an external temperature sensor.
///
/// Climate devices without a built-in probe are paired with a separate
/// sensor whose readings arrive as raw strings. A malformed reading is
/// logged and discarded, keeping the previous value; an explicit
/// no-reading state clears the cache and marks the entity unavailable.
///
/// # Examples
///
/// ```
/// use tahoma_bridge::climate::TemperatureFeed;
///
/// let mut feed = TemperatureFeed::new();
/// assert!(feed.reading().is_none());
///
/// feed.apply_reading("19.5");
/// assert_eq!(feed.reading().unwrap().value(), 19.5);
///
/// // Garbage keeps the previous reading
/// feed.apply_reading("not-a-number");
/// assert_eq!(feed.reading().unwrap().value(), 19.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemperatureFeed {
    current: Option<Temperature>,
}

impl TemperatureFeed {
    /// Creates an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last accepted reading.
    #[must_use]
    pub fn reading(&self) -> Option<Temperature> {
        self.current
    }

    /// Applies a raw sensor reading.
    ///
    /// Returns `true` if the cached value changed.
    pub fn apply_reading(&mut self, raw: &str) -> bool {
        let raw = raw.trim();
        if raw.is_empty() || NO_READING.contains(&raw) {
            let changed = self.current.is_some();
            self.current = None;
            return changed;
        }

        match raw.parse::<f32>() {
            Ok(celsius) => {
                let reading = Temperature::new(celsius);
                let changed = self.current != Some(reading);
                self.current = Some(reading);
                changed
            }
            Err(err) => {
                tracing::error!(reading = raw, %err, "unable to update from sensor");
                false
            }
        }
    }
}
