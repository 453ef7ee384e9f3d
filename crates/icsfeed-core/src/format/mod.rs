//! Output formatting for parsed events.
//!
//! This module renders events for the two output modes of the CLI:
//! - **TTY**: one human-readable line per event, optionally followed by the
//!   captured source lines
//! - **JSON**: machine-readable listing

use std::borrow::Cow;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::time::Timestamp;

#[cfg(test)]
mod golden_tests;

/// The output format for event listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// Time format preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// 24-hour format (e.g., "14:30").
    #[default]
    H24,
    /// 12-hour format with AM/PM (e.g., "2:30 PM").
    H12,
}

impl TimeFormat {
    fn pattern(self) -> &'static str {
        match self {
            Self::H24 => "%H:%M",
            Self::H12 => "%-I:%M %p",
        }
    }
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Maximum length for summaries (truncated with ellipsis).
    pub max_title_length: Option<usize>,
    /// Time format preference.
    pub time_format: TimeFormat,
    /// Whether to include the captured source lines.
    pub show_raw: bool,
    /// Text printed when there are no events.
    pub no_events_text: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_title_length: None,
            time_format: TimeFormat::H24,
            show_raw: false,
            no_events_text: "No events".to_string(),
        }
    }
}

/// JSON output format for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Events in start order.
    pub events: Vec<JsonEvent>,
    /// Number of events.
    pub count: usize,
}

/// A single event in JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEvent {
    /// Event summary (may be truncated).
    pub summary: String,
    /// Attendee, empty when the event had none.
    pub attendee: String,
    /// Start time in RFC 3339 (date only for all-day events).
    pub start: String,
    /// End time in RFC 3339 (date only for all-day events).
    pub end: String,
    /// `end - start` in seconds.
    pub duration_seconds: i64,
    /// Whether the event starts on a date-only value.
    pub is_all_day: bool,
    /// IANA zone of the start time, if it had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Captured source lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Vec<String>>,
}

/// Output formatter for event listings.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    /// Creates a new OutputFormatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Creates a new OutputFormatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(FormatOptions::default())
    }

    /// Returns the formatting options.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Formats events for TTY output, one entry per event.
    ///
    /// With `show_raw`, an entry spans several lines: the summary line
    /// followed by each source line indented by four spaces.
    pub fn format_tty(&self, events: &[Event]) -> Vec<String> {
        if events.is_empty() {
            return vec![self.options.no_events_text.clone()];
        }
        events.iter().map(|event| self.format_tty_event(event)).collect()
    }

    fn format_tty_event(&self, event: &Event) -> String {
        let mut line = format!(
            "{}  ({})  {}",
            self.format_when(event.start()),
            format_duration(event.duration()),
            self.title(event.summary())
        );
        if !event.attendee().is_empty() {
            line.push_str(&format!("  <{}>", event.attendee()));
        }
        if self.options.show_raw {
            for raw in event.raw() {
                line.push_str("\n    ");
                line.push_str(raw.trim_end_matches(['\r', '\n']));
            }
        }
        line
    }

    /// Formats events as a JSON document.
    pub fn format_json(&self, events: &[Event]) -> JsonOutput {
        let events: Vec<JsonEvent> = events.iter().map(|e| self.to_json_event(e)).collect();
        JsonOutput {
            count: events.len(),
            events,
        }
    }

    fn to_json_event(&self, event: &Event) -> JsonEvent {
        JsonEvent {
            summary: self.title(event.summary()).into_owned(),
            attendee: event.attendee().to_string(),
            start: event.start().to_rfc3339(),
            end: event.end().to_rfc3339(),
            duration_seconds: event.duration().num_seconds(),
            is_all_day: event.is_all_day(),
            time_zone: event.start().zone().map(|tz| tz.name().to_string()),
            raw: self.options.show_raw.then(|| event.raw().to_vec()),
        }
    }

    fn format_when(&self, ts: &Timestamp) -> String {
        let local = ts.local();
        if ts.is_all_day() {
            format!("{} all-day", local.format("%Y-%m-%d"))
        } else {
            format!(
                "{} {}",
                local.format("%Y-%m-%d"),
                local.format(self.options.time_format.pattern())
            )
        }
    }

    fn title<'a>(&self, summary: &'a str) -> Cow<'a, str> {
        match self.options.max_title_length {
            Some(max) => ellipsis(summary, max),
            None => Cow::Borrowed(summary),
        }
    }
}

/// Formats a duration compactly, e.g. `1h30m`, `2d`, `-15m`.
///
/// Seconds are dropped.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_minutes();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();

    let days = total / (24 * 60);
    let hours = (total / 60) % 24;
    let minutes = total % 60;

    let mut out = String::from(sign);
    if days > 0 {
        out.push_str(&format!("{}d", days));
    }
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if minutes > 0 || (days == 0 && hours == 0) {
        out.push_str(&format!("{}m", minutes));
    }
    out
}

/// Truncates a string with ellipsis if it exceeds the given length.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    let char_count = s.chars().count();

    if char_count <= max_len {
        return Cow::Borrowed(s);
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(Duration::minutes(15)), "15m");
        assert_eq!(format_duration(Duration::minutes(90)), "1h30m");
        assert_eq!(format_duration(Duration::hours(2)), "2h");
        assert_eq!(format_duration(Duration::days(1)), "1d");
        assert_eq!(format_duration(Duration::hours(26)), "1d2h");
        assert_eq!(format_duration(Duration::zero()), "0m");
        assert_eq!(format_duration(Duration::minutes(-45)), "-45m");
    }

    #[test]
    fn ellipsis_truncates_long_text() {
        assert_eq!(ellipsis("Quarterly planning", 10), "Quarter...");
        assert_eq!(ellipsis("Short", 10), "Short");
        assert_eq!(ellipsis("Anything", 0), "");
    }

    #[test]
    fn ellipsis_counts_chars_not_bytes() {
        assert_eq!(ellipsis("Réunion équipe", 14), "Réunion équipe");
        assert_eq!(ellipsis("Réunion équipe", 8), "Réuni...");
    }

    #[test]
    fn empty_listing_uses_placeholder() {
        let formatter = OutputFormatter::with_defaults();
        assert_eq!(formatter.format_tty(&[]), vec!["No events".to_string()]);
        assert_eq!(formatter.format_json(&[]).count, 0);
    }
}
