//! Time types for calendar events.
//!
//! This module provides [`Timestamp`], the value produced for `DTSTART` and
//! `DTEND` properties. A timestamp keeps the encoding it was read from (UTC,
//! named time zone, floating, or date-only) and can always be projected to an
//! absolute instant for ordering and duration arithmetic.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

/// The time of a calendar event, in the encoding it was written in.
///
/// Floating and date-only values carry no zone. For ordering and arithmetic
/// they are read as UTC wall-clock time. Equality compares the encoding too,
/// so order events through [`Timestamp::instant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// An absolute UTC time (`20200101T120000Z`).
    Utc(DateTime<Utc>),
    /// A local time qualified by an IANA zone (`TZID=Europe/Paris`).
    Zoned(DateTime<Tz>),
    /// A local time with no zone attached (`20200101T120000`).
    Floating(NaiveDateTime),
    /// A date with no time of day (`VALUE=DATE`).
    Date(NaiveDate),
}

impl Timestamp {
    /// Returns the zero timestamp, `0001-01-01T00:00:00Z`.
    ///
    /// This is what an event's start and end hold before a value is parsed.
    pub fn zero() -> Self {
        Self::Utc(zero_instant())
    }

    /// Returns `true` if this timestamp is the zero instant.
    pub fn is_zero(&self) -> bool {
        self.instant() == zero_instant()
    }

    /// Projects the timestamp to an absolute UTC instant.
    ///
    /// Date-only values map to midnight.
    pub fn instant(&self) -> DateTime<Utc> {
        match self {
            Self::Utc(dt) => *dt,
            Self::Zoned(dt) => dt.with_timezone(&Utc),
            Self::Floating(naive) => naive.and_utc(),
            Self::Date(date) => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// Returns the wall-clock date and time as written in the source.
    pub fn local(&self) -> NaiveDateTime {
        match self {
            Self::Utc(dt) => dt.naive_utc(),
            Self::Zoned(dt) => dt.naive_local(),
            Self::Floating(naive) => *naive,
            Self::Date(date) => date.and_time(NaiveTime::MIN),
        }
    }

    /// Returns the IANA zone for zoned timestamps.
    pub fn zone(&self) -> Option<Tz> {
        match self {
            Self::Zoned(dt) => Some(dt.timezone()),
            _ => None,
        }
    }

    /// Returns `true` for date-only values.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Returns `self − other`, measured between absolute instants.
    pub fn since(&self, other: &Timestamp) -> Duration {
        self.instant() - other.instant()
    }

    /// Formats the timestamp as RFC 3339.
    ///
    /// Floating and date-only values are written without an offset.
    pub fn to_rfc3339(&self) -> String {
        match self {
            Self::Utc(dt) => dt.to_rfc3339(),
            Self::Zoned(dt) => dt.to_rfc3339(),
            Self::Floating(naive) => naive.format("%Y-%m-%dT%H:%M:%S").to_string(),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Utc(dt)
    }
}

impl From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::Zoned(dt)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

/// Seconds from the Unix epoch back to `0001-01-01T00:00:00Z`.
const ZERO_UNIX_SECONDS: i64 = -62_135_596_800;

fn zero_instant() -> DateTime<Utc> {
    DateTime::from_timestamp(ZERO_UNIX_SECONDS, 0).unwrap_or_default()
}
