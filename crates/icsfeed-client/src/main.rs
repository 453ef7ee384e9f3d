//! icsfeed CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use icsfeed_client::Source;
use icsfeed_client::cli::{Cli, Command, ConfigAction};
use icsfeed_client::commands::list::ListOptions;
use icsfeed_client::config::ClientConfig;
use icsfeed_client::error::{ClientError, ClientResult};
use icsfeed_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ClientResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let config =
        ClientConfig::load_validated(cli.config.as_deref()).map_err(ClientError::Config)?;

    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => icsfeed_client::commands::config::dump(&config, &config_path),
            ConfigAction::Validate => icsfeed_client::commands::config::validate(&config),
            ConfigAction::Path => icsfeed_client::commands::config::path(&config_path),
        },
        None => {
            let source = cli
                .source
                .as_deref()
                .or(config.source.url.as_deref())
                .map(Source::parse)
                .ok_or_else(|| ClientError::NoSource(config_path.display().to_string()))?;

            let mut format_options = config.display.format_options();
            if cli.max_title_length.is_some() {
                format_options.max_title_length = cli.max_title_length;
            }
            format_options.show_raw |= cli.raw;

            let options = ListOptions {
                format: cli.output_format(),
                format_options,
                upcoming: cli.upcoming,
                limit: cli.limit.or(config.display.limit),
                timeout: cli.timeout,
                strict: cli.strict,
            };

            icsfeed_client::commands::list::list(&source, &config.http, &options)
        }
    }
}
