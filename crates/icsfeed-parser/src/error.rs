//! Error types for calendar parsing.
//!
//! A parse can abort for a handful of reasons (see [`ParseError`]). Aborting
//! never throws away progress: [`ParseFailure`] carries every event that was
//! finalized before the error together with the error itself.

use std::fmt;

use icsfeed_core::Event;
use thiserror::Error;

/// The reason a parse was aborted.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Reading the input stream failed.
    #[error("failed to read calendar data: {0}")]
    Io(#[from] std::io::Error),

    /// A `DTSTART`/`DTEND` value did not match the expected format.
    #[error("invalid {property} value {value:?}: {source}")]
    InvalidDateTime {
        /// Property the value belonged to.
        property: String,
        /// The offending value text.
        value: String,
        /// The underlying format mismatch.
        source: chrono::ParseError,
    },

    /// A `TZID` parameter named a zone that is not in the IANA database.
    #[error("unknown time zone {tzid:?} in {property}")]
    UnknownTimeZone {
        /// Property the parameter belonged to.
        property: String,
        /// The unresolved zone identifier.
        tzid: String,
    },

    /// The feed URL could not be parsed.
    #[cfg(feature = "http")]
    #[error("invalid feed URL {url:?}: {source}")]
    InvalidUrl {
        /// The URL as given.
        url: String,
        /// Why it was rejected.
        source: url::ParseError,
    },

    /// The HTTP transport failed.
    #[cfg(feature = "http")]
    #[error("failed to fetch calendar: {0}")]
    Http(#[from] reqwest::Error),
}

/// A parse that was aborted, with the events finalized before the abort.
///
/// The partial events are sorted by start time just like a successful result.
#[derive(Debug)]
pub struct ParseFailure {
    /// Events finalized before the error.
    pub events: Vec<Event>,
    /// Why the parse stopped.
    pub error: ParseError,
}

impl ParseFailure {
    /// Creates a failure with the given partial events.
    pub fn new(events: Vec<Event>, error: ParseError) -> Self {
        Self { events, error }
    }

    /// Splits the failure into partial events and error.
    pub fn into_parts(self) -> (Vec<Event>, ParseError) {
        (self.events, self.error)
    }
}

impl From<ParseError> for ParseFailure {
    fn from(error: ParseError) -> Self {
        Self::new(Vec::new(), error)
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} event(s) parsed before the error)",
            self.error,
            self.events.len()
        )
    }
}

impl std::error::Error for ParseFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Result of a parse: the sorted events, or the partial events plus error.
pub type ParseResult<T> = Result<T, ParseFailure>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn unknown_zone_display() {
        let err = ParseError::UnknownTimeZone {
            property: "DTSTART".to_string(),
            tzid: "Not/AZone".to_string(),
        };
        assert_eq!(err.to_string(), "unknown time zone \"Not/AZone\" in DTSTART");
    }

    #[test]
    fn failure_keeps_partial_events_and_source() {
        let io = std::io::Error::other("connection reset");
        let failure = ParseFailure::from(ParseError::from(io));
        assert!(failure.events.is_empty());
        assert!(failure.to_string().contains("connection reset"));
        assert!(failure.to_string().contains("0 event(s)"));
        assert!(failure.source().is_some());

        let (events, error) = failure.into_parts();
        assert!(events.is_empty());
        assert!(matches!(error, ParseError::Io(_)));
    }
}
