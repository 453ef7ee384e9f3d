//! Calendar sources: URLs, files and stdin.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use icsfeed_parser::{
    Diagnostics, Event, FeedFetcher, FetchConfig, ParseError, ParseFailure, ParseResult,
};
use tracing::debug;

use crate::config::HttpSettings;

/// Where calendar text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `http`, `https`, `webcal` or `webcals` URL.
    Url(String),
    /// Local file.
    File(PathBuf),
    /// Standard input.
    Stdin,
}

impl Source {
    /// Classifies a command-line argument.
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            return Self::Stdin;
        }
        let is_url = arg.split_once("://").is_some_and(|(scheme, _)| {
            ["http", "https", "webcal", "webcals"]
                .iter()
                .any(|known| scheme.eq_ignore_ascii_case(known))
        });
        if is_url {
            Self::Url(arg.to_string())
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Reads and parses the source.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseFailure`] with the events parsed before the error.
    pub fn load(
        &self,
        http: &HttpSettings,
        timeout_override: Option<u64>,
        diagnostics: &dyn Diagnostics,
    ) -> ParseResult<Vec<Event>> {
        debug!(source = %self, "Loading calendar");
        match self {
            Self::Url(url) => {
                let timeout = timeout_override
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| http.timeout());
                fetcher(url, http, timeout)?.fetch_events(diagnostics)
            }
            Self::File(path) => {
                let file = File::open(path).map_err(ParseError::from)?;
                icsfeed_parser::parse_from_stream_with(file, diagnostics)
            }
            Self::Stdin => icsfeed_parser::parse_from_stream_with(io::stdin().lock(), diagnostics),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
        }
    }
}

fn fetcher(url: &str, http: &HttpSettings, timeout: Duration) -> Result<FeedFetcher, ParseFailure> {
    let mut config = FetchConfig::new(url)
        .map_err(|source| ParseError::InvalidUrl {
            url: url.to_string(),
            source,
        })?
        .with_timeout(timeout);
    if let Some(ref agent) = http.user_agent {
        config = config.with_user_agent(agent);
    }
    if !http.verify_tls {
        config = config.with_insecure_tls();
    }
    Ok(FeedFetcher::new(config)?)
}
