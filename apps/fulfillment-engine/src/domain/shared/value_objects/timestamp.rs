//! Timestamp value object for order audit fields.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// A UTC timestamp for order dates and audit tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a new Timestamp from a `DateTime<Utc>`.
    #[must_use]
    pub const fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the current timestamp.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse from an RFC 3339 string.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not a valid RFC 3339 timestamp.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let dt = DateTime::parse_from_rfc3339(s)?;
        Ok(Self(dt.with_timezone(&Utc)))
    }

    /// Parse a query bound given either as RFC 3339 or as a bare
    /// `YYYY-MM-DD` date, which resolves to midnight UTC.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unparseable` naming `field` if neither form matches.
    pub fn parse_bound(field: &str, input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if let Ok(ts) = Self::parse(trimmed) {
            return Ok(ts);
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
            .ok_or_else(|| DomainError::Unparseable {
                field: field.to_string(),
                input: input.to_string(),
            })
    }

    /// Get the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Format as RFC 3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Get the Unix timestamp in milliseconds.
    #[must_use]
    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Current time, but never earlier than one millisecond after `previous`.
    ///
    /// Keeps `updatedAt` strictly increasing even when the wall clock stalls
    /// or steps backwards between two mutations.
    #[must_use]
    pub fn now_after(previous: Self) -> Self {
        let now = Self::now();
        if now > previous {
            now
        } else {
            Self(previous.0 + Duration::milliseconds(1))
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
