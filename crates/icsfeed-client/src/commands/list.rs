//! The default command: list events from a source.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use icsfeed_core::{FormatOptions, OutputFormat, OutputFormatter};
use icsfeed_parser::{CollectingDiagnostics, Diagnostics, Event, TracingDiagnostics};
use tracing::warn;

use crate::config::HttpSettings;
use crate::error::{ClientError, ClientResult};
use crate::source::Source;

/// Options for one listing, merged from the CLI and the configuration.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// TTY or JSON.
    pub format: OutputFormat,
    /// Formatter options.
    pub format_options: FormatOptions,
    /// Drop events that have already ended.
    pub upcoming: bool,
    /// Keep at most this many events.
    pub limit: Option<usize>,
    /// HTTP timeout override in seconds.
    pub timeout: Option<u64>,
    /// Fail when the parser reports diagnostics.
    pub strict: bool,
}

/// Loads `source`, prints its events and reports any failure.
///
/// Events parsed before an error are printed before the error is returned.
pub fn list(source: &Source, http: &HttpSettings, options: &ListOptions) -> ClientResult<()> {
    let collected = CollectingDiagnostics::new();
    let diagnostics: &dyn Diagnostics = if options.strict {
        &collected
    } else {
        &TracingDiagnostics
    };

    let (events, error) = match source.load(http, options.timeout, diagnostics) {
        Ok(events) => (events, None),
        Err(failure) => {
            let (events, error) = failure.into_parts();
            (events, Some(error))
        }
    };

    let events = select(events, options.upcoming, options.limit, Utc::now());
    let formatter = OutputFormatter::new(options.format_options.clone());
    let output = render(&events, options.format, &formatter)?;
    writeln!(io::stdout().lock(), "{}", output)?;

    if let Some(error) = error {
        return Err(error.into());
    }

    let reported = collected.take();
    for diagnostic in &reported {
        warn!(%diagnostic, "Parser diagnostic");
    }
    if !reported.is_empty() {
        return Err(ClientError::Strict(reported.len()));
    }

    Ok(())
}

/// Applies the `upcoming` and `limit` filters, keeping start order.
pub fn select(
    events: Vec<Event>,
    upcoming: bool,
    limit: Option<usize>,
    now: DateTime<Utc>,
) -> Vec<Event> {
    events
        .into_iter()
        .filter(|event| !upcoming || event.end().instant() > now)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Renders events in the requested format.
pub fn render(
    events: &[Event],
    format: OutputFormat,
    formatter: &OutputFormatter,
) -> ClientResult<String> {
    match format {
        OutputFormat::Tty => Ok(formatter.format_tty(events).join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(
            &formatter.format_json(events),
        )?),
    }
}
