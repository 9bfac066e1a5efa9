// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the TaHoma bridge.
//!
//! This module provides the error hierarchy used across the library: value
//! validation, hub communication, response parsing, and device operations.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the hub.
    #[error("hub error: {0}")]
    Hub(#[from] HubError),

    /// Error occurred while parsing a hub response or device state.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during device operations.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Device was not found in the bridge.
    #[error("device not found")]
    DeviceNotFound,

    /// Scene was not found in the bridge.
    #[error("scene not found")]
    SceneNotFound,
}

/// Errors related to value validation and vendor vocabulary.
///
/// These errors occur when constructing constrained types with invalid
/// values, or when the hub reports a state string outside the fixed
/// enumerated vocabulary for a device family.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A temperature is outside the allowed target range.
    #[error("temperature {actual} is out of range [{min}, {max}]")]
    TemperatureOutOfRange {
        /// Minimum allowed value in Celsius.
        min: f32,
        /// Maximum allowed value in Celsius.
        max: f32,
        /// The actual value that was provided.
        actual: f32,
    },

    /// An unknown derogation-type state string was reported.
    #[error("unknown derogation state: {0}")]
    UnknownDerogationState(String),

    /// An unknown heating-mode state string was reported.
    #[error("unknown heating mode: {0}")]
    UnknownHeatingMode(String),

    /// An unknown heating-level state string was reported.
    #[error("unknown heating level: {0}")]
    UnknownHeatingLevel(String),

    /// An unknown HVAC mode string was provided.
    #[error("unknown hvac mode: {0}")]
    UnknownHvacMode(String),

    /// An unknown preset mode string was provided.
    #[error("unknown preset mode: {0}")]
    UnknownPresetMode(String),
}

/// Errors related to hub communication.
///
/// Setup code distinguishes fatal failures (bad credentials) from transient
/// ones via [`HubError::is_retryable`].
#[derive(Debug, Error)]
pub enum HubError {
    /// The HTTP request itself failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The hub rejected the supplied credentials.
    #[error("bad credentials")]
    BadCredentials,

    /// The hub is rate limiting this account.
    #[error("too many requests")]
    TooManyRequests,

    /// The hub API is in maintenance.
    #[error("server in maintenance")]
    Maintenance,

    /// No session is established; `login` must be called first.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The hub returned an unexpected HTTP status.
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// The HTTP status code.
        status: u16,
        /// The response body or error message.
        message: String,
    },
}

impl HubError {
    /// Returns `true` if setup should be retried later rather than aborted.
    ///
    /// Bad credentials are fatal; rate limiting, maintenance windows and
    /// connectivity failures are transient.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::BadCredentials | Self::NotAuthenticated => false,
            Self::TooManyRequests | Self::Maintenance | Self::Http(_) => true,
            Self::UnexpectedStatus { status, .. } => *status >= 500,
        }
    }
}

/// Errors related to parsing hub responses and device states.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A state the entity relies on is missing from `active_states`.
    #[error("missing device state: {0}")]
    MissingState(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),

    /// A state value had the wrong type for the requested access.
    #[error("failed to read {state}: {message}")]
    InvalidValue {
        /// The vendor state name.
        state: String,
        /// Description of the failure.
        message: String,
    },
}

/// Errors related to device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device family does not support the requested operation.
    #[error("widget {widget} does not support {operation}")]
    UnsupportedOperation {
        /// The device family discriminator.
        widget: String,
        /// The operation that was attempted.
        operation: String,
    },

    /// Command was rejected by the hub.
    #[error("command rejected: {0}")]
    CommandRejected(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::TemperatureOutOfRange {
            min: 15.0,
            max: 26.0,
            actual: 30.0,
        };
        assert_eq!(err.to_string(), "temperature 30 is out of range [15, 26]");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::UnknownPresetMode("boost".to_string());
        let err: Error = value_err.into();
        assert!(matches!(
            err,
            Error::Value(ValueError::UnknownPresetMode(_))
        ));
    }

    #[test]
    fn bad_credentials_is_fatal() {
        assert!(!HubError::BadCredentials.is_retryable());
        assert!(!HubError::NotAuthenticated.is_retryable());
    }

    #[test]
    fn transient_hub_errors_are_retryable() {
        assert!(HubError::TooManyRequests.is_retryable());
        assert!(HubError::Maintenance.is_retryable());
        assert!(
            HubError::UnexpectedStatus {
                status: 503,
                message: "unavailable".to_string(),
            }
            .is_retryable()
        );
        assert!(
            !HubError::UnexpectedStatus {
                status: 404,
                message: "not found".to_string(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingState("core:TargetTemperatureState".to_string());
        assert_eq!(
            err.to_string(),
            "missing device state: core:TargetTemperatureState"
        );
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::UnsupportedOperation {
            widget: "SomfyThermostat".to_string(),
            operation: "setHeatingLevel".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "widget SomfyThermostat does not support setHeatingLevel"
        );
    }
}
