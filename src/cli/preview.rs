//! Preview command.
//!
//! Assembles the command exactly as `call` would and prints its redacted
//! form. Nothing is sent to an engine.

use std::path::Path;

use crate::cli::{secret_input, settings, OptionArgs, SecretArgs};
use crate::core::command::assemble;
use crate::core::secret::with_secret;
use crate::error::Result;

/// Print the redacted command line.
pub fn execute(
    command: &str,
    options: &OptionArgs,
    secret: &SecretArgs,
    config: Option<&Path>,
) -> Result<()> {
    let settings = settings::resolve(config, options)?;
    let options = &settings.config.options;

    let redacted = match secret_input::acquire(secret)?.as_deref_mut() {
        None => assemble(command, options, None)?.redacted(),
        Some(storage) => with_secret(storage, |secret| {
            Ok(assemble(command, options, Some(secret))?.redacted())
        })?,
    };

    println!("{}", redacted);
    Ok(())
}
