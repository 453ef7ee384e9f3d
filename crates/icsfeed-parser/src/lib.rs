//! ICS event parsing.
//!
//! This crate turns iCalendar-like text into a chronologically sorted list of
//! [`Event`]s. It is deliberately small: only `SUMMARY`, `ATTENDEE`,
//! `DTSTART` and `DTEND` inside `VEVENT` blocks are interpreted.
//!
//! # Pipeline
//!
//! ```text
//! bytes ─▶ Unfolder ─▶ logical lines ─▶ ContentLine ─▶ Assembler ─▶ sort_events
//!                                                         │
//!                                                 parse_timestamp
//! ```
//!
//! # Example
//!
//! ```
//! let ics = "BEGIN:VEVENT\r\nSUMMARY:Lunch\r\nDTSTART:20250205T120000Z\r\n\
//!            DTEND:20250205T130000Z\r\nEND:VEVENT\r\n";
//! let events = icsfeed_parser::parse_str(ics).unwrap();
//! assert_eq!(events[0].summary(), "Lunch");
//! ```
//!
//! A parse that hits a fatal error still hands back what it finished:
//!
//! ```
//! let ics = "BEGIN:VEVENT\nDTSTART:20250205T120000Z\nEND:VEVENT\n\
//!            BEGIN:VEVENT\nDTSTART:oops\nEND:VEVENT\n";
//! let failure = icsfeed_parser::parse_str(ics).unwrap_err();
//! assert_eq!(failure.events.len(), 1);
//! ```

pub mod assembler;
pub mod datetime;
pub mod diagnostics;
pub mod error;
#[cfg(feature = "http")]
pub mod fetch;
pub mod property;
pub mod unfold;

use std::io::{BufRead, BufReader, Read};

use tracing::debug;

pub use assembler::{Assembler, AssemblerState};
pub use diagnostics::{CollectingDiagnostics, Diagnostic, Diagnostics, TracingDiagnostics};
pub use error::{ParseError, ParseFailure, ParseResult};
#[cfg(feature = "http")]
pub use fetch::{FeedFetcher, FetchConfig, parse_from_url};
pub use icsfeed_core::{Event, Timestamp};
pub use property::{ContentLine, Parameter, PropertyKind};
pub use unfold::{RawCapture, Unfolder};

/// Parses events from a byte stream, reporting diagnostics through `tracing`.
///
/// The stream is read to the end or to the first fatal error.
///
/// # Errors
///
/// On a read failure or an invalid `DTSTART`/`DTEND`, returns a
/// [`ParseFailure`] holding the events finished so far.
pub fn parse_from_stream<R: Read>(reader: R) -> ParseResult<Vec<Event>> {
    parse_from_stream_with(reader, &TracingDiagnostics)
}

/// Parses events from a byte stream with a caller-supplied diagnostics sink.
///
/// # Errors
///
/// See [`parse_from_stream`].
pub fn parse_from_stream_with<R: Read>(
    reader: R,
    diagnostics: &dyn Diagnostics,
) -> ParseResult<Vec<Event>> {
    parse_buffered(BufReader::new(reader), diagnostics)
}

/// Parses events from ICS text.
///
/// # Errors
///
/// See [`parse_from_stream`].
pub fn parse_str(ics: &str) -> ParseResult<Vec<Event>> {
    parse_buffered(ics.as_bytes(), &TracingDiagnostics)
}

/// Parses events from an already buffered reader.
///
/// # Errors
///
/// See [`parse_from_stream`].
pub fn parse_buffered<R: BufRead>(
    reader: R,
    diagnostics: &dyn Diagnostics,
) -> ParseResult<Vec<Event>> {
    let mut unfolder = Unfolder::new(reader);
    let mut assembler = Assembler::new(diagnostics);

    let outcome = drive(&mut unfolder, &mut assembler);

    let mut events = assembler.into_events();
    sort_events(&mut events);

    match outcome {
        Ok(()) => {
            debug!(count = events.len(), "Parsed calendar");
            Ok(events)
        }
        Err(error) => {
            debug!(count = events.len(), error = %error, "Calendar parse aborted");
            Err(ParseFailure::new(events, error))
        }
    }
}

fn drive<R: BufRead>(
    unfolder: &mut Unfolder<R>,
    assembler: &mut Assembler<'_>,
) -> Result<(), ParseError> {
    while let Some(text) = unfolder.next_line()? {
        if let Some(line) = ContentLine::parse(&text) {
            assembler.feed(&line, unfolder.capture_mut())?;
        }
        // Raw lines only matter once a block is open.
        if assembler.is_idle() {
            unfolder.capture_mut().clear();
        }
    }
    Ok(())
}

/// Sorts events by start instant.
///
/// The sort is stable: events with the same start keep their input order.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by_key(|event| event.start().instant());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(summary: &str, start: &str) -> String {
        format!(
            "BEGIN:VEVENT\r\nSUMMARY:{}\r\nDTSTART:{}\r\nDTEND:{}\r\nEND:VEVENT\r\n",
            summary, start, start
        )
    }

    #[test]
    fn sorts_by_start() {
        let ics = [
            block("third", "20250207T090000Z"),
            block("first", "20250205T090000Z"),
            block("second", "20250206T090000Z"),
        ]
        .concat();
        let events = parse_str(&ics).unwrap();
        let order: Vec<_> = events.iter().map(|e| e.summary()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let ics = ["b", "a", "c", "d"]
            .iter()
            .map(|s| block(s, "20250205T090000Z"))
            .collect::<String>();
        let events = parse_str(&ics).unwrap();
        let order: Vec<_> = events.iter().map(|e| e.summary()).collect();
        assert_eq!(order, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn partial_results_are_sorted() {
        let ics = [
            block("late", "20250210T090000Z"),
            block("early", "20250201T090000Z"),
            block("broken", "nope"),
            block("never", "20250101T090000Z"),
        ]
        .concat();
        let failure = parse_str(&ics).unwrap_err();
        let order: Vec<_> = failure.events.iter().map(|e| e.summary()).collect();
        assert_eq!(order, vec!["early", "late"]);
    }

    #[test]
    fn diagnostics_go_to_supplied_sink() {
        let sink = CollectingDiagnostics::new();
        let ics = "BEGIN:VEVENT\nDTSTART;VALUE=PERIOD:x\nEND:VEVENT\n";
        let events = parse_from_stream_with(ics.as_bytes(), &sink).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn empty_input_yields_no_events() {
        assert!(parse_str("").unwrap().is_empty());
    }
}
