//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/icsfeed/config.toml` by default:
//!
//! ```toml
//! [source]
//! url = "webcals://calendar.example.com/team.ics"
//!
//! [display]
//! max_title_length = 40
//! time_format = "h12"
//! limit = 10
//!
//! [http]
//! timeout = 10
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use icsfeed_core::{FormatOptions, TimeFormat};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the icsfeed client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Default calendar source.
    pub source: SourceSettings,

    /// Display settings.
    pub display: DisplaySettings,

    /// HTTP fetch settings.
    pub http: HttpSettings,
}

/// Default calendar source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// URL or path used when no source is given on the command line.
    pub url: Option<String>,
}

/// Display settings for output formatting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum title length (truncated with ellipsis).
    pub max_title_length: Option<usize>,

    /// Clock style for event times.
    pub time_format: TimeFormat,

    /// Print the captured source lines under each event.
    pub show_raw: bool,

    /// Maximum number of events to display.
    pub limit: Option<usize>,
}

impl DisplaySettings {
    /// Builds formatter options from these settings.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            max_title_length: self.max_title_length,
            time_format: self.time_format,
            show_raw: self.show_raw,
            ..FormatOptions::default()
        }
    }
}

/// HTTP fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    pub timeout: u64,

    /// User agent override.
    pub user_agent: Option<String>,

    /// Whether to verify TLS certificates.
    pub verify_tls: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: None,
            verify_tls: true,
        }
    }
}

impl HttpSettings {
    /// Returns the timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Loads configuration from `path`, or the default path when `None`,
    /// and rejects values that cannot be used.
    pub fn load_validated(path: Option<&Path>) -> Result<Self, String> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), String> {
        if self.http.timeout == 0 {
            return Err("http.timeout must be greater than zero".to_string());
        }
        if self.display.max_title_length == Some(0) {
            return Err("display.max_title_length must be greater than zero".to_string());
        }
        if let Some(ref url) = self.source.url {
            if url.trim().is_empty() {
                return Err("source.url must not be empty".to_string());
            }
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("icsfeed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert!(config.source.url.is_none());
        assert_eq!(config.display.time_format, TimeFormat::H24);
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert!(config.http.verify_tls);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[source]
url = "webcal://calendar.example.com/team.ics"

[display]
max_title_length = 20
time_format = "h12"
show_raw = true
limit = 5

[http]
timeout = 10
user_agent = "custom/1.0"
verify_tls = false
"#
        )
        .unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(
            config.source.url.as_deref(),
            Some("webcal://calendar.example.com/team.ics")
        );
        assert_eq!(config.display.max_title_length, Some(20));
        assert_eq!(config.display.time_format, TimeFormat::H12);
        assert!(config.display.show_raw);
        assert_eq!(config.display.limit, Some(5));
        assert_eq!(config.http.timeout, 10);
        assert_eq!(config.http.user_agent.as_deref(), Some("custom/1.0"));
        assert!(!config.http.verify_tls);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nlimit = 3").unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(config.display.limit, Some(3));
        assert_eq!(config.http.timeout, 30);
        assert!(config.http.verify_tls);
    }

    #[test]
    fn malformed_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display\nlimit = ").unwrap();

        let err = ClientConfig::load_from(file.path()).unwrap_err();
        assert!(err.contains("failed to parse config"));
    }

    #[test]
    fn missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.contains("failed to read config"));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = ClientConfig::default();
        config.http.timeout = 0;
        assert!(config.validate().unwrap_err().contains("http.timeout"));
    }

    #[test]
    fn load_validated_rejects_zero_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\ntimeout = 0").unwrap();

        assert!(ClientConfig::load_from(file.path()).is_ok());
        let err = ClientConfig::load_validated(Some(file.path())).unwrap_err();
        assert!(err.contains("http.timeout"));
    }

    #[test]
    fn load_validated_accepts_good_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\ntimeout = 5").unwrap();

        let config = ClientConfig::load_validated(Some(file.path())).unwrap();
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn format_options_follow_display_settings() {
        let display = DisplaySettings {
            max_title_length: Some(12),
            time_format: TimeFormat::H12,
            show_raw: true,
            limit: None,
        };
        let options = display.format_options();
        assert_eq!(options.max_title_length, Some(12));
        assert_eq!(options.time_format, TimeFormat::H12);
        assert!(options.show_raw);
        assert_eq!(options.no_events_text, "No events");
    }

    #[test]
    fn default_path_ends_with_config_toml() {
        let path = ClientConfig::default_path();
        assert!(path.ends_with("icsfeed/config.toml"));
    }
}
