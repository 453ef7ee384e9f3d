//! CLI, configuration and event listing
//!
//! This crate provides the `icsfeed` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod source;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use source::Source;
