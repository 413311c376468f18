// SPDX-License-Identifier: MIT

//!
//! The Chronoplay date type
//!
//! A [`CalendarDate`] is an immutable, validated (year, month, day) triple.
//! The stored fields are calendar-agnostic: the same triple can be read under
//! either the real (proleptic Gregorian) calendar or the fixed-365-day
//! no-leap calendar of a game world.  The interpretation is therefore never
//! stored on the date - every ordinal-dependent operation takes a
//! [`CalendarMode`] argument.
//!
//! Construction is always leap-aware under the real calendar, so a real
//! leap-day date such as 2000-02-29 is representable.  There is no year zero:
//! year -1 is the year before year 1.  Years are bounded to
//! [`MIN_YEAR`]..=[`MAX_YEAR`] (the five digits the text grammar can carry),
//! which keeps every ordinal comfortably inside `i64` arithmetic.
//!

use crate::ordinal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// The minimum year a [`CalendarDate`] can hold
pub const MIN_YEAR: i64 = -99999;

/// The maximum year a [`CalendarDate`] can hold
pub const MAX_YEAR: i64 = 99999;

/// `[sign]Y{1,5}`, optionally followed by a separator and a month, optionally
/// followed by a separator and a day
static DATE_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^([+-]?[0-9]{1,5})(?:[.\-/年]([0-9]{1,2})(?:[.\-/月]([0-9]{1,2}))?)?$")
        .expect("date regex is valid")
});

/// Compact `[sign]YYYYMMDD` with no separators
static COMPACT_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^([+-]?[0-9]{1,5})([0-9]{2})([0-9]{2})$").expect("date regex is valid")
});

/// Errors that can arise in relation to a [`CalendarDate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The text did not match any accepted date form
    #[error("unrecognized date text `{0}`")]
    Unparsable(String),

    /// The month number is not allowed (must be 1 <= month <= 12)
    #[error("month `{0}` is not allowed")]
    InvalidMonth(u8),

    /// The day number is not allowed for the given year and month under the
    /// real calendar
    #[error("day `{day}` is not allowed for {year}-{month:02}")]
    InvalidDay { year: i64, month: u8, day: u8 },

    /// The year is not allowed (must be [`MIN_YEAR`] <= year <= [`MAX_YEAR`])
    #[error("year `{0}` is not allowed")]
    InvalidYear(i64),

    /// Year zero does not exist (year -1 is followed by year 1)
    #[error("year zero does not exist")]
    YearZero,

    /// The ordinal falls outside the supported year range
    #[error("ordinal `{0}` is out of range")]
    OrdinalOutOfRange(i64),
}

/// Which calendar model an ordinal-dependent operation should use
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalendarMode {
    /// Proleptic Gregorian, with the usual leap rule
    Real,

    /// Every year has exactly 365 days; February is always 28 days
    NoLeap,
}

/// The Chronoplay date type.  Ordering is lexicographic on
/// (year, month, day), which is the same under either calendar model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i64,
    month: u8,
    day: u8,
}

/// A date given to the library in one of the accepted shapes: text to be
/// parsed, an already-validated date, or a bare year (meaning January 1st)
#[derive(Clone, Debug)]
pub enum DateInput {
    Text(String),
    Date(CalendarDate),
    Year(i64),
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<CalendarDate> for DateInput {
    fn from(date: CalendarDate) -> Self {
        Self::Date(date)
    }
}

impl From<i64> for DateInput {
    fn from(year: i64) -> Self {
        Self::Year(year)
    }
}

impl CalendarDate {
    /// Create a new [`CalendarDate`] if the result will be valid.  The day
    /// range is checked against the real calendar's leap rule, so 2000-02-29
    /// is accepted and 2001-02-29 is not.
    pub fn from(year: i64, month: u8, day: u8) -> Result<Self, DateError> {
        if year == 0 {
            return Err(DateError::YearZero);
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateError::InvalidYear(year));
        }
        if !(1..=12).contains(&month) {
            return Err(DateError::InvalidMonth(month));
        }
        let max_day = ordinal::real_month_length(year, month);
        if !(1..=max_day).contains(&day) {
            return Err(DateError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Parse date text.  Accepted forms:
    ///
    /// - `[±]Y{1,5}` with optional `.`/`-`/`/`/`年` then month, optional
    ///   `.`/`-`/`/`/`月` then day (missing month/day default to 1),
    ///   e.g. `867`, `1444.11`, `-100-03-15`, `1066年10月14`
    /// - compact `[±]YYYYMMDD`, e.g. `18671009`
    pub fn parse(text: &str) -> Result<Self, DateError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DateError::Unparsable(text.to_string()));
        }
        let unparsable = || DateError::Unparsable(text.to_string());

        if let Some(caps) = DATE_RE.captures(text) {
            let year: i64 = caps[1].parse().map_err(|_| unparsable())?;
            let month: u8 = match caps.get(2) {
                Some(m) => m.as_str().parse().map_err(|_| unparsable())?,
                None => 1,
            };
            let day: u8 = match caps.get(3) {
                Some(d) => d.as_str().parse().map_err(|_| unparsable())?,
                None => 1,
            };
            return Self::from(year, month, day);
        }

        if let Some(caps) = COMPACT_RE.captures(text) {
            let year: i64 = caps[1].parse().map_err(|_| unparsable())?;
            let month: u8 = caps[2].parse().map_err(|_| unparsable())?;
            let day: u8 = caps[3].parse().map_err(|_| unparsable())?;
            return Self::from(year, month, day);
        }

        Err(unparsable())
    }

    /// Accept any [`DateInput`] shape.  Text is parsed; an existing date or a
    /// bare year is taken as-is without re-parsing.
    pub fn resolve(input: impl Into<DateInput>) -> Result<Self, DateError> {
        match input.into() {
            DateInput::Text(text) => Self::parse(&text),
            DateInput::Date(date) => Ok(date),
            DateInput::Year(year) => Self::from(year, 1, 1),
        }
    }

    /// Get the date's year
    pub fn year(&self) -> i64 {
        self.year
    }

    /// Get the date's month (1..=12)
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Get the date's day (1..=31)
    pub fn day(&self) -> u8 {
        self.day
    }

    /// The canonical `[sign]YYYY-MM-DD` text form (see the `Display` impl)
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// The date's ordinal under the given calendar model
    pub fn to_ordinal(&self, mode: CalendarMode) -> i64 {
        match mode {
            CalendarMode::Real => ordinal::days_from_civil(self.year, self.month, self.day),
            CalendarMode::NoLeap => ordinal::no_leap_ordinal(self.year, self.month, self.day),
        }
    }

    /// The date at the given ordinal under the given calendar model.  The
    /// ordinal must land within [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn from_ordinal(ordinal_value: i64, mode: CalendarMode) -> Result<Self, DateError> {
        let (min, max) = ordinal_range(mode);
        if !(min..=max).contains(&ordinal_value) {
            return Err(DateError::OrdinalOutOfRange(ordinal_value));
        }
        let (year, month, day) = match mode {
            CalendarMode::Real => ordinal::civil_from_days(ordinal_value),
            CalendarMode::NoLeap => ordinal::no_leap_from_ordinal(ordinal_value),
        };
        // within the ordinal range both inverse mappings only produce valid triples
        Ok(Self { year, month, day })
    }

    /// This date plus `days` (which can be negative) under the given model.
    /// Fails if the result would leave the supported year range.
    pub fn add_days(&self, days: i64, mode: CalendarMode) -> Result<Self, DateError> {
        // saturation is caught by the range check in from_ordinal
        Self::from_ordinal(self.to_ordinal(mode).saturating_add(days), mode)
    }

    /// Number of days from `self` to `other` (`other` minus `self`) under the
    /// given model
    pub fn days_until(&self, other: &CalendarDate, mode: CalendarMode) -> i64 {
        other.to_ordinal(mode) - self.to_ordinal(mode)
    }
}

/// The ordinals of [`MIN_YEAR`]-01-01 and [`MAX_YEAR`]-12-31 under the given
/// model - the domain over which the ordinal conversion is bijective
fn ordinal_range(mode: CalendarMode) -> (i64, i64) {
    match mode {
        CalendarMode::Real => (
            ordinal::days_from_civil(MIN_YEAR, 1, 1),
            ordinal::days_from_civil(MAX_YEAR, 12, 31),
        ),
        CalendarMode::NoLeap => (
            ordinal::no_leap_ordinal(MIN_YEAR, 1, 1),
            ordinal::no_leap_ordinal(MAX_YEAR, 12, 31),
        ),
    }
}

impl fmt::Display for CalendarDate {
    /// `[sign]YYYY-MM-DD`, year zero-padded to at least 4 digits (wider
    /// years are emitted at full width)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.year < 0 { "-" } else { "" };
        let year = self.year.unsigned_abs();
        write!(f, "{sign}{year:04}-{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        CalendarDate::parse(&text).map_err(serde::de::Error::custom)
    }
}
