//! Call command.
//!
//! Runs a base command through the engine with the configured options and an
//! optional secret, and prints the engine's output verbatim.

use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::cli::{secret_input, settings, OptionArgs, SecretArgs};
use crate::core::bridge::Bridge;
use crate::core::secret::SecretStorage;
use crate::error::Result;

/// Run `command` and print the engine output.
pub fn execute(
    command: &str,
    options: &OptionArgs,
    secret: &SecretArgs,
    engine: Option<&str>,
    config: Option<&Path>,
) -> Result<()> {
    let settings = settings::resolve(config, options)?;
    let engine = settings::engine(&settings.config, engine)?;
    info!(
        engine = %engine.program().display(),
        config = %settings
            .source
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string()),
        "using engine"
    );

    let bridge = Bridge::new(engine);
    let mut secret = secret_input::acquire(secret)?;
    let output = bridge.call(
        command,
        &settings.config.options,
        secret
            .as_deref_mut()
            .map(|s| s as &mut dyn SecretStorage),
    )?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
