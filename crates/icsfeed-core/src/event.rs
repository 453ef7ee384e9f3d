//! Event types for parsed calendar feeds.
//!
//! This module provides [`Event`], one finished `VEVENT` block, and
//! [`EventBuilder`], the accumulator filled in while the block is still open.

use chrono::Duration;

use crate::time::Timestamp;

/// A finished calendar event.
///
/// Events are only produced by [`EventBuilder::finish`], which computes the
/// duration from the start and end times, so `duration == end - start`
/// always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    attendee: String,
    summary: String,
    start: Timestamp,
    end: Timestamp,
    duration: Duration,
    raw: Vec<String>,
}

impl Event {
    /// The attendee identity, without any `mailto:` prefix.
    pub fn attendee(&self) -> &str {
        &self.attendee
    }

    /// The `SUMMARY` value, verbatim.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// When the event starts.
    pub fn start(&self) -> &Timestamp {
        &self.start
    }

    /// When the event ends.
    pub fn end(&self) -> &Timestamp {
        &self.end
    }

    /// `end - start`. Negative when the source data is inconsistent.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The physical source lines from `BEGIN:VEVENT` through `END:VEVENT`.
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Returns true if the event starts on a date-only value.
    pub fn is_all_day(&self) -> bool {
        self.start.is_all_day()
    }
}

/// Accumulates the fields of an open `VEVENT` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBuilder {
    attendee: String,
    summary: String,
    start: Timestamp,
    end: Timestamp,
}

impl EventBuilder {
    /// Creates an empty builder. Start and end default to the zero timestamp.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the attendee, stripping a leading `mailto:` if present.
    pub fn attendee(&mut self, value: &str) -> &mut Self {
        self.attendee = value.strip_prefix("mailto:").unwrap_or(value).to_string();
        self
    }

    /// Sets the summary text.
    pub fn summary(&mut self, value: impl Into<String>) -> &mut Self {
        self.summary = value.into();
        self
    }

    /// Sets the start time.
    pub fn start(&mut self, start: Timestamp) -> &mut Self {
        self.start = start;
        self
    }

    /// Sets the end time.
    pub fn end(&mut self, end: Timestamp) -> &mut Self {
        self.end = end;
        self
    }

    /// Finalizes the event with its captured source lines.
    pub fn finish(self, raw: Vec<String>) -> Event {
        Event {
            duration: self.end.since(&self.start),
            attendee: self.attendee,
            summary: self.summary,
            start: self.start,
            end: self.end,
            raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(h: u32, m: u32) -> Timestamp {
        Timestamp::from(Utc.with_ymd_and_hms(2025, 2, 5, h, m, 0).unwrap())
    }

    #[test]
    fn finish_computes_duration() {
        let mut builder = EventBuilder::new();
        builder.summary("Standup").start(at(9, 0)).end(at(9, 15));
        let event = builder.finish(vec!["BEGIN:VEVENT\n".into(), "END:VEVENT\n".into()]);

        assert_eq!(event.summary(), "Standup");
        assert_eq!(event.duration(), Duration::minutes(15));
        assert_eq!(event.raw().len(), 2);
    }

    #[test]
    fn inverted_times_give_negative_duration() {
        let mut builder = EventBuilder::new();
        builder.start(at(10, 0)).end(at(9, 0));
        let event = builder.finish(vec!["BEGIN:VEVENT\n".into()]);
        assert_eq!(event.duration(), Duration::hours(-1));
    }

    #[test]
    fn attendee_strips_mailto() {
        let mut builder = EventBuilder::new();
        builder.attendee("mailto:a@b.com");
        assert_eq!(builder.clone().finish(Vec::new()).attendee(), "a@b.com");

        builder.attendee("a@b.com");
        assert_eq!(builder.finish(Vec::new()).attendee(), "a@b.com");
    }

    #[test]
    fn mailto_prefix_is_case_sensitive() {
        let mut builder = EventBuilder::new();
        builder.attendee("MAILTO:a@b.com");
        assert_eq!(builder.finish(Vec::new()).attendee(), "MAILTO:a@b.com");
    }

    #[test]
    fn unset_times_are_zero() {
        let event = EventBuilder::new().finish(Vec::new());
        assert!(event.start().is_zero());
        assert!(event.end().is_zero());
        assert_eq!(event.duration(), Duration::zero());
    }
}
