//! Command-line interface.

pub mod call;
pub mod completions;
pub mod init;
pub mod output;
pub mod preview;
pub mod secret_input;
pub mod settings;
pub mod show;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::OutputFormat;
use crate::core::constants;

/// wallet-bridge - Secret-safe command bridge for wallet engines.
#[derive(Parser)]
#[command(
    name = "wallet-bridge",
    about = "Secret-safe command bridge for wallet engines",
    version,
    after_help = "Secrets are wiped after every call and never logged."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file (default: .wallet-bridge.toml, then the user config dir)
    #[arg(long, global = true, env = constants::CONFIG_ENV, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Run a command through the engine and print its output
    Call {
        /// Base command, e.g. "wallet balance"
        command: String,
        #[command(flatten)]
        options: OptionArgs,
        #[command(flatten)]
        secret: SecretArgs,
        /// Engine program (overrides the config file)
        #[arg(long, env = constants::ENGINE_ENV, value_name = "PROGRAM")]
        engine: Option<String>,
    },

    /// Print the assembled command with the secret masked, without running it
    Preview {
        /// Base command, e.g. "wallet unlock"
        command: String,
        #[command(flatten)]
        options: OptionArgs,
        #[command(flatten)]
        secret: SecretArgs,
    },

    /// Write a configuration file
    Init {
        #[command(flatten)]
        options: OptionArgs,
        /// Engine program to record
        #[arg(long, value_name = "PROGRAM")]
        engine: Option<String>,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options forwarded to the engine; override the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
    /// Engine data store
    #[arg(long, env = constants::STORAGE_ENV, value_name = "PATH")]
    pub storage_location: Option<PathBuf>,

    /// Output format requested from the engine
    #[arg(long, value_enum)]
    pub output_format: Option<Format>,
}

/// Where the secret comes from. At most one source.
#[derive(Args, Debug, Default, Clone)]
#[group(multiple = false)]
pub struct SecretArgs {
    /// Prompt for the secret with hidden input
    #[arg(long)]
    pub ask_secret: bool,

    /// Read the secret from the first line of stdin
    #[arg(long)]
    pub secret_stdin: bool,

    /// Read the secret from an environment variable (removed after reading)
    #[arg(long, value_name = "VAR")]
    pub secret_env: Option<String>,
}

/// Output format values accepted on the command line.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Human,
    Structured,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Human => OutputFormat::Human,
            Format::Structured => OutputFormat::Structured,
        }
    }
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, config: Option<PathBuf>) -> crate::error::Result<()> {
    use Command::*;

    let config = config.as_deref();
    match command {
        Call {
            command,
            options,
            secret,
            engine,
        } => call::execute(&command, &options, &secret, engine.as_deref(), config),
        Preview {
            command,
            options,
            secret,
        } => preview::execute(&command, &options, &secret, config),
        Init {
            options,
            engine,
            force,
        } => init::execute(&options, engine, force, config),
        Config { json } => show::execute(json, config),
        Completions { shell } => completions::execute(shell),
    }
}
