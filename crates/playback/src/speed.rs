// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Playback speed configuration
//!
//! The unit is stored as the text the owning campaign persists: speed records
//! round-trip verbatim between sessions, and an unrecognized unit only
//! surfaces when a tick actually needs the rate.
//!

use chronoplay_core::CalendarMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unit label for advancing N days per wall-clock second
pub const DAYS_PER_SECOND: &str = "days-per-second";

/// Unit label for advancing N months per wall-clock second
pub const MONTHS_PER_SECOND: &str = "months-per-second";

/// Unit label for advancing N years per wall-clock second
pub const YEARS_PER_SECOND: &str = "years-per-second";

/// Mean Gregorian year length, used for years-per-second under the real
/// calendar
const MEAN_GREGORIAN_YEAR_DAYS: f64 = 365.2425;

/// Fixed month length used for months-per-second.  A deliberate
/// approximation, not calendar-exact month stepping.
const APPROX_MONTH_DAYS: f64 = 30.0;

/// Errors that can arise in relation to playback configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpeedError {
    /// The configured unit is not one of the known labels
    #[error("unknown playback speed unit `{0}`")]
    UnknownUnit(String),

    /// The configured magnitude is negative or not a number
    #[error("playback speed magnitude `{0}` is not allowed")]
    InvalidMagnitude(f64),
}

/// How fast playback advances: a magnitude in `unit`s per wall-clock second
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSpeed {
    unit: String,
    value: f64,
}

impl Default for PlaybackSpeed {
    /// One year of days per second
    fn default() -> Self {
        Self {
            unit: DAYS_PER_SECOND.to_string(),
            value: 365.0,
        }
    }
}

impl PlaybackSpeed {
    /// Create a new speed if the magnitude is valid.  The unit text is kept
    /// as given - an unknown unit is only an error once a tick asks for the
    /// rate, so stored configs from other versions load fine.
    pub fn from(unit: impl ToString, value: f64) -> Result<Self, SpeedError> {
        if !value.is_finite() || value < 0.0 {
            return Err(SpeedError::InvalidMagnitude(value));
        }
        Ok(Self {
            unit: unit.to_string(),
            value,
        })
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// The advance rate in days per second under the given calendar model.
    ///
    /// Months and years use fixed-length approximations (30 days; 365 or
    /// 365.2425 days) rather than calendar-exact stepping.
    pub fn rate_days_per_second(&self, mode: CalendarMode) -> Result<f64, SpeedError> {
        match self.unit.as_str() {
            DAYS_PER_SECOND => Ok(self.value),
            MONTHS_PER_SECOND => Ok(self.value * APPROX_MONTH_DAYS),
            YEARS_PER_SECOND => match mode {
                CalendarMode::NoLeap => Ok(self.value * 365.0),
                CalendarMode::Real => Ok(self.value * MEAN_GREGORIAN_YEAR_DAYS),
            },
            other => Err(SpeedError::UnknownUnit(other.to_string())),
        }
    }
}
