//! Feed fetch configuration.

use std::time::Duration;
use url::Url;

/// Configuration for fetching a calendar feed.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Feed URL, after `webcal` normalization.
    pub url: Url,

    /// Whether to verify TLS certificates.
    pub verify_tls: bool,

    /// Whether to honour proxy settings from the environment.
    pub use_system_proxy: bool,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl FetchConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration for the given feed URL.
    ///
    /// `webcal://` and `webcals://` URLs are rewritten to HTTP(S).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(&normalize_feed_url(url.as_ref()))?;
        Ok(Self {
            url: parsed,
            verify_tls: true,
            use_system_proxy: true,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("icsfeed/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Disables TLS verification (for testing only).
    pub fn with_insecure_tls(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    /// Ignores `HTTP_PROXY` and friends.
    pub fn without_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the feed URL as a string.
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Rewrites `webcal://` to `http://` and `webcals://` to `https://`.
///
/// The scheme is matched case-insensitively. Other URLs are returned as-is.
pub fn normalize_feed_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    if scheme.eq_ignore_ascii_case("webcal") {
        format!("http://{}", rest)
    } else if scheme.eq_ignore_ascii_case("webcals") {
        format!("https://{}", rest)
    } else {
        url.to_string()
    }
}
