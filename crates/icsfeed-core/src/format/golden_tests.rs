//! Golden tests for output formatting.
//!
//! These tests use insta snapshots to keep the listing format stable.
//! Run with `cargo insta review` after intentional changes.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::event::{Event, EventBuilder};
use crate::format::{FormatOptions, OutputFormatter, TimeFormat};
use crate::time::Timestamp;

fn utc(d: u32, h: u32, min: u32) -> Timestamp {
    Timestamp::from(Utc.with_ymd_and_hms(2025, 2, d, h, min, 0).unwrap())
}

fn meeting(summary: &str, attendee: &str, start: Timestamp, end: Timestamp) -> Event {
    let mut builder = EventBuilder::new();
    builder.summary(summary).attendee(attendee).start(start).end(end);
    builder.finish(vec![
        "BEGIN:VEVENT\r\n".to_string(),
        format!("SUMMARY:{}\r\n", summary),
        "END:VEVENT\r\n".to_string(),
    ])
}

fn sample_events() -> Vec<Event> {
    let day = NaiveDate::from_ymd_opt(2025, 2, 5).unwrap();
    let next_day = NaiveDate::from_ymd_opt(2025, 2, 6).unwrap();
    let paris = chrono_tz::Europe::Paris
        .with_ymd_and_hms(2025, 2, 5, 14, 0, 0)
        .unwrap();

    vec![
        meeting("Company Holiday", "", day.into(), next_day.into()),
        meeting("Standup", "mailto:alice@example.com", utc(5, 9, 0), utc(5, 9, 15)),
        meeting(
            "Planning with the Paris office",
            "",
            paris.into(),
            Timestamp::from(paris + chrono::Duration::minutes(90)),
        ),
    ]
}

#[test]
fn golden_tty_listing() {
    let formatter = OutputFormatter::with_defaults();
    let output = formatter.format_tty(&sample_events());

    insta::assert_snapshot!(output.join("\n"), @r"
    2025-02-05 all-day  (1d)  Company Holiday
    2025-02-05 09:00  (15m)  Standup  <alice@example.com>
    2025-02-05 14:00  (1h30m)  Planning with the Paris office
    ");
}

#[test]
fn golden_tty_twelve_hour_truncated() {
    let formatter = OutputFormatter::new(FormatOptions {
        max_title_length: Some(12),
        time_format: TimeFormat::H12,
        ..FormatOptions::default()
    });
    let output = formatter.format_tty(&sample_events()[1..]);

    insta::assert_snapshot!(output.join("\n"), @r"
    2025-02-05 9:00 AM  (15m)  Standup  <alice@example.com>
    2025-02-05 2:00 PM  (1h30m)  Planning ...
    ");
}

#[test]
fn golden_tty_with_raw_lines() {
    let formatter = OutputFormatter::new(FormatOptions {
        show_raw: true,
        ..FormatOptions::default()
    });
    let output = formatter.format_tty(&sample_events()[1..2]);

    insta::assert_snapshot!(output.join("\n"), @r"
    2025-02-05 09:00  (15m)  Standup  <alice@example.com>
        BEGIN:VEVENT
        SUMMARY:Standup
        END:VEVENT
    ");
}

#[test]
fn golden_json_listing() {
    let formatter = OutputFormatter::with_defaults();
    let output = formatter.format_json(&sample_events()[1..]);

    insta::assert_json_snapshot!(output, @r#"
    {
      "events": [
        {
          "summary": "Standup",
          "attendee": "alice@example.com",
          "start": "2025-02-05T09:00:00+00:00",
          "end": "2025-02-05T09:15:00+00:00",
          "duration_seconds": 900,
          "is_all_day": false
        },
        {
          "summary": "Planning with the Paris office",
          "attendee": "",
          "start": "2025-02-05T14:00:00+01:00",
          "end": "2025-02-05T15:30:00+01:00",
          "duration_seconds": 5400,
          "is_all_day": false,
          "time_zone": "Europe/Paris"
        }
      ],
      "count": 2
    }
    "#);
}
