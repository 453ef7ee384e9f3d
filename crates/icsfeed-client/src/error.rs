//! Client error types.

use icsfeed_parser::ParseError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The calendar could not be parsed or fetched.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// `--strict` was given and the parser reported diagnostics.
    #[error("{0} diagnostic(s) reported in strict mode")]
    Strict(usize),

    /// No source was given on the command line or in the configuration.
    #[error("no source given; pass a URL, a file or '-', or set source.url in {0}")]
    NoSource(String),
}
