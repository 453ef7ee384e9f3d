//! Fetching calendar feeds over HTTP.
//!
//! This module provides a [`FeedFetcher`] that downloads a feed and streams
//! the response body straight into the parser.
//!
//! # Features
//!
//! - `webcal://` and `webcals://` URLs
//! - Configurable timeout, user agent and TLS verification
//! - Non-success responses are logged and their body is parsed anyway
//!
//! # Example
//!
//! ```ignore
//! use icsfeed_parser::fetch::{FeedFetcher, FetchConfig};
//!
//! let config = FetchConfig::new("webcal://example.com/team.ics")?
//!     .with_timeout(Duration::from_secs(10));
//!
//! let events = FeedFetcher::new(config)?.fetch_events(&TracingDiagnostics)?;
//! ```

mod client;
mod config;

pub use client::FeedFetcher;
pub use config::{FetchConfig, normalize_feed_url};

use icsfeed_core::Event;

use crate::diagnostics::TracingDiagnostics;
use crate::error::{ParseError, ParseResult};

/// Fetches `url` with default settings and parses the body.
///
/// # Errors
///
/// Returns a [`ParseFailure`](crate::ParseFailure) with no events if the URL
/// is invalid or the transport fails, and with partial events if the body
/// fails to parse.
pub fn parse_from_url(url: &str) -> ParseResult<Vec<Event>> {
    let config = FetchConfig::new(url).map_err(|source| ParseError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    FeedFetcher::new(config)?.fetch_events(&TracingDiagnostics)
}
