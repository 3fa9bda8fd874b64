//! Calendar-day key for the daily reward gate
//!
//! The gate compares canonical `YYYY-MM-DD` strings for equality. Days are cut
//! at midnight UTC, the deployment's fixed reference clock, never per user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const FORMAT: &str = "%Y-%m-%d";

/// A UTC calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Create from a calendar date
    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The UTC day containing the given epoch-millisecond instant
    pub fn from_millis(epoch_ms: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(epoch_ms).map(|dt| Self(dt.date_naive()))
    }

    /// Parse the canonical `YYYY-MM-DD` form
    pub fn parse(raw: &str) -> Option<Self> {
        NaiveDate::parse_from_str(raw, FORMAT).ok().map(Self)
    }

    /// The underlying date
    #[inline]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// Canonical storage form
    pub fn to_canonical(&self) -> String {
        self.0.format(FORMAT).to_string()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}
