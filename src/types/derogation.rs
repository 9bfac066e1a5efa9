// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Derogation kinds.
//!
//! A derogation is the vendor term for a temporary manual override of the
//! thermostat programme. Every override command carries a kind telling the
//! hub how long the override lasts.

use std::fmt;

use crate::error::ValueError;

/// How long a derogation (manual override) remains active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerogationKind {
    /// Override until explicitly cancelled.
    FurtherNotice,
    /// Override until the next programmed mode change.
    NextMode,
    /// Override until a fixed date.
    Date,
}

impl DerogationKind {
    /// Returns the vendor string representation.
    #[must_use]
    pub const fn as_vendor_str(&self) -> &'static str {
        match self {
            Self::FurtherNotice => "further_notice",
            Self::NextMode => "next_mode",
            Self::Date => "date",
        }
    }

    /// Parses a vendor derogation-type value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownDerogationState` for values outside the
    /// mapped set.
    pub fn from_vendor_str(value: &str) -> Result<Self, ValueError> {
        match value {
            "further_notice" => Ok(Self::FurtherNotice),
            "next_mode" => Ok(Self::NextMode),
            "date" => Ok(Self::Date),
            other => Err(ValueError::UnknownDerogationState(other.to_string())),
        }
    }
}

impl fmt::Display for DerogationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_vendor_str())
    }
}
