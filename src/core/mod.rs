//! Core library components.
//!
//! Command assembly, the secret lifecycle guard, engine dispatch and the
//! configuration they share. Nothing in here prints or prompts.

pub mod bridge;
pub mod command;
pub mod config;
pub mod constants;
pub mod engine;
pub mod secret;
pub mod types;

pub use bridge::Bridge;
pub use command::{assemble, Command, CommandBuilder};
pub use config::{BridgeConfig, ConfigOptions, EngineFlags, EngineSettings, OutputFormat};
pub use engine::{dispatch, Engine, ProcessEngine};
pub use secret::{redact, redact_line, with_secret, RedactedCommand, Secret, SecretStorage};
