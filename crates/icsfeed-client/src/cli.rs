//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use icsfeed_core::OutputFormat;

/// icsfeed - List events from ICS files and calendar feeds
#[derive(Debug, Parser)]
#[command(name = "icsfeed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Calendar source: an http(s):// or webcal:// URL, a file path, or '-' for stdin
    pub source: Option<String>,

    /// Path to configuration file
    #[arg(long, short, env = "ICSFEED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    // --- Output format flags ---
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    // --- Display options ---
    /// Maximum title length (truncated with ellipsis)
    #[arg(long)]
    pub max_title_length: Option<usize>,

    /// Print the source lines captured for each event
    #[arg(long)]
    pub raw: bool,

    // --- Filter flags ---
    /// Only show events that have not ended yet
    #[arg(long)]
    pub upcoming: bool,

    /// Maximum number of events to display
    #[arg(long)]
    pub limit: Option<usize>,

    // --- Fetch flags ---
    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Fail if the parser reported any diagnostic
    #[arg(long)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the output format based on CLI flags.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Tty
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_and_flags() {
        let cli = Cli::try_parse_from([
            "icsfeed",
            "team.ics",
            "--json",
            "--limit",
            "3",
            "--upcoming",
            "--strict",
        ])
        .unwrap();

        assert_eq!(cli.source.as_deref(), Some("team.ics"));
        assert_eq!(cli.output_format(), OutputFormat::Json);
        assert_eq!(cli.limit, Some(3));
        assert!(cli.upcoming);
        assert!(cli.strict);
        assert!(cli.command.is_none());
    }

    #[test]
    fn stdin_dash_is_a_source() {
        let cli = Cli::try_parse_from(["icsfeed", "-"]).unwrap();
        assert_eq!(cli.source.as_deref(), Some("-"));
        assert_eq!(cli.output_format(), OutputFormat::Tty);
    }

    #[test]
    fn config_subcommand() {
        let cli = Cli::try_parse_from(["icsfeed", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Path
            })
        ));
    }
}
