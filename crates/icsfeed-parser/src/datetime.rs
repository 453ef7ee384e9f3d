//! Date-time value parsing for `DTSTART` and `DTEND`.
//!
//! The first parameter of the property selects the encoding:
//!
//! | first parameter     | format              | result                  |
//! |---------------------|---------------------|-------------------------|
//! | none                | `YYYYMMDDTHHMMSSZ`, then `YYYYMMDDTHHMMSS` | UTC or floating |
//! | `VALUE=DATE-TIME`   | `YYYYMMDDTHHMMSSZ`  | UTC                     |
//! | `TZID=<zone>`       | `YYYYMMDDTHHMMSS`   | local time in `<zone>`  |
//! | `VALUE=DATE`        | `YYYYMMDD`          | date                    |
//! | anything else       | not parsed          | zero timestamp          |

use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use icsfeed_core::Timestamp;
use tracing::trace;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ParseError;
use crate::property::{ContentLine, Parameter};

const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const FLOATING_FORMAT: &str = "%Y%m%dT%H%M%S";
const DATE_FORMAT: &str = "%Y%m%d";

/// Parses the value of a date-time property.
///
/// Unrecognized parameter forms are not an error: they yield the zero
/// timestamp and an [`Diagnostic::UnsupportedParameter`]. A value that
/// parses to the zero timestamp is reported as [`Diagnostic::ZeroTimestamp`].
///
/// # Errors
///
/// Returns [`ParseError::InvalidDateTime`] when the value does not match the
/// selected format and [`ParseError::UnknownTimeZone`] when a `TZID` cannot
/// be resolved.
pub fn parse_timestamp(
    line: &ContentLine<'_>,
    diagnostics: &dyn Diagnostics,
) -> Result<Timestamp, ParseError> {
    let value = line.value;
    let invalid = |source: chrono::ParseError| ParseError::InvalidDateTime {
        property: line.name.to_string(),
        value: value.to_string(),
        source,
    };

    let timestamp = match line.params.first() {
        None => parse_utc(value)
            .or_else(|_| parse_floating(value).map(Timestamp::Floating))
            .map_err(invalid)?,
        Some(param) if param.is("VALUE", "DATE-TIME") => parse_utc(value).map_err(invalid)?,
        Some(&Parameter {
            key: "TZID",
            value: Some(tzid),
        }) => {
            let tz = resolve_tzid(tzid).ok_or_else(|| ParseError::UnknownTimeZone {
                property: line.name.to_string(),
                tzid: tzid.to_string(),
            })?;
            let naive = parse_floating(value).map_err(invalid)?;
            Timestamp::Zoned(localize(tz, naive))
        }
        Some(param) if param.is("VALUE", "DATE") => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Timestamp::Date)
            .map_err(invalid)?,
        Some(param) => {
            diagnostics.report(Diagnostic::UnsupportedParameter {
                property: line.name.to_string(),
                parameter: param.to_string(),
                value: value.to_string(),
            });
            return Ok(Timestamp::zero());
        }
    };

    if timestamp.is_zero() {
        diagnostics.report(Diagnostic::ZeroTimestamp {
            property: line.name.to_string(),
            value: value.to_string(),
        });
    }

    trace!(property = line.name, value, parsed = %timestamp, "Parsed date-time");
    Ok(timestamp)
}

fn parse_utc(value: &str) -> Result<Timestamp, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, UTC_FORMAT).map(|naive| Timestamp::Utc(naive.and_utc()))
}

fn parse_floating(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, FLOATING_FORMAT)
}

/// Resolves an IANA zone identifier.
pub fn resolve_tzid(tzid: &str) -> Option<Tz> {
    Tz::from_str(tzid).ok()
}

/// Places a wall-clock time in a zone.
///
/// Ambiguous times (DST fold) take the earlier instant. Times inside a DST
/// gap are read with the offset in force before the gap, which moves them
/// forward by the gap's length.
fn localize(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive).earliest().unwrap_or_else(|| {
        let before_gap = tz
            .offset_from_utc_datetime(&(naive - Duration::days(1)))
            .fix();
        let utc = naive - Duration::seconds(i64::from(before_gap.local_minus_utc()));
        tz.from_utc_datetime(&utc)
    })
}
