//! wallet-bridge - Secret-safe command bridge for wallet engines.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wallet_bridge::cli::output;
use wallet_bridge::cli::{execute, Cli};
use wallet_bridge::core::constants;
use wallet_bridge::error::{CommandError, EngineError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("wallet_bridge=debug")
        } else {
            EnvFilter::new("wallet_bridge=warn")
        }
    });

    // Logs go to stderr; stdout is reserved for engine output.
    let (plain, json) = if cli.log_json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (
            Some(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            ),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();

    if let Err(e) = execute(cli.command, cli.config) {
        let suggestion = match &e {
            Error::InvalidCommand(CommandError::MissingStorageLocation) => {
                Some("pass --storage-location or run: wallet-bridge init --storage-location <PATH>")
            }
            Error::InvalidCommand(CommandError::ReservedFlag { .. }) => {
                Some("the bridge appends storage, output format and secret flags itself")
            }
            Error::EngineUnavailable(EngineError::NotConfigured) => {
                Some("pass --engine or run: wallet-bridge init --engine <PROGRAM>")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Error::SecretScrubFailed(_) = e {
            output::warn("secret memory may not have been wiped; the engine call may have completed");
        }
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(e.exit_code());
    }
}
