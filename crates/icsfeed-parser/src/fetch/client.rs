//! Blocking HTTP client for calendar feeds.

use icsfeed_core::Event;
use reqwest::blocking::Client;
use tracing::{debug, trace, warn};

use crate::diagnostics::Diagnostics;
use crate::error::{ParseError, ParseResult};

use super::config::FetchConfig;

/// Downloads a feed and parses it.
pub struct FeedFetcher {
    /// The underlying HTTP client.
    client: Client,
    /// Configuration.
    config: FetchConfig,
}

impl FeedFetcher {
    /// Creates a fetcher with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Http`] if the HTTP client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self, ParseError> {
        let mut builder = Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(config.timeout)
            .user_agent(&config.user_agent);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Performs the GET request and parses the response body.
    ///
    /// The body is streamed into the parser and released when parsing ends,
    /// whether it succeeded or not. A non-success status is logged but does
    /// not stop the body from being parsed.
    ///
    /// # Errors
    ///
    /// Transport failures are returned as [`ParseError::Http`] with no
    /// events. Parse failures carry the events finished before the error.
    pub fn fetch_events(&self, diagnostics: &dyn Diagnostics) -> ParseResult<Vec<Event>> {
        trace!(url = %self.config.url, "Sending request");

        let response = self
            .client
            .get(self.config.url.clone())
            .send()
            .map_err(ParseError::from)?;

        let status = response.status();
        if status.is_success() {
            debug!(status = %status, url = %self.config.url, "Fetched calendar");
        } else {
            warn!(
                status = %status,
                url = %self.config.url,
                "Unexpected response status, parsing body anyway"
            );
        }

        crate::parse_from_stream_with(response, diagnostics)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}
