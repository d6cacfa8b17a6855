//! Calendar dates for due-date handling
//!
//! Due dates are plain calendar dates (year, month, day) with no time zone
//! attached. Option values may carry a full timestamp (`2024-01-01T12:31:00Z`);
//! only the date part is kept.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid calendar date: {0}")]
    Invalid(String),
}

/// A timezone-agnostic calendar date.
///
/// Ordering is chronological, so `PlainDate` values can be compared and
/// sorted directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlainDate(NaiveDate);

impl PlainDate {
    /// Creates a date from calendar components, rejecting invalid
    /// combinations such as February 30th.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(PlainDate)
            .ok_or_else(|| DateError::Invalid(format!("{:04}-{:02}-{:02}", year, month, day)))
    }

    /// Returns today's date in the local time zone.
    pub fn today() -> Self {
        PlainDate(chrono::Local::now().date_naive())
    }

    /// True if this date is strictly before the reference date.
    pub fn is_past(&self, reference: PlainDate) -> bool {
        *self < reference
    }

    /// True if this date equals the reference date.
    pub fn is_today(&self, reference: PlainDate) -> bool {
        *self == reference
    }

    /// True if this date is strictly after the reference date.
    pub fn is_future(&self, reference: PlainDate) -> bool {
        *self > reference
    }
}

impl FromStr for PlainDate {
    type Err = DateError;

    /// Parses `YYYY-MM-DD`. A value carrying a time component
    /// (`YYYY-MM-DDT...`) is accepted by taking the date part.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date_part = s.split('T').next().unwrap_or(s).trim();

        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map(PlainDate)
            .map_err(|_| DateError::Invalid(s.to_string()))
    }
}

impl fmt::Display for PlainDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
