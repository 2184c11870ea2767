//! Init command - write a configuration file.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::{output, settings, OptionArgs};
use crate::core::config::{BridgeConfig, EngineSettings};
use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Write `.wallet-bridge.toml` (or `path`) from the given options.
pub fn execute(
    options: &OptionArgs,
    engine: Option<String>,
    force: bool,
    path: Option<&Path>,
) -> Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(constants::CONFIG_FILE));

    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path).into());
    }

    let mut config = BridgeConfig::default();
    settings::apply(options, &mut config.options);
    config.engine = engine.map(|program| EngineSettings {
        program,
        args: Vec::new(),
    });
    config.validate()?;
    config.save(&path)?;

    info!(path = %path.display(), "config written");
    output::success(&format!("wrote {}", output::path(&path.display().to_string())));

    if config.options.storage_location.is_none() {
        output::hint(&format!(
            "set storage_location in the file or pass {}",
            output::cmd("--storage-location <PATH>")
        ));
    }
    if config.engine.is_none() {
        output::hint(&format!(
            "add an [engine] program to the file or pass {}",
            output::cmd("--engine <PROGRAM>")
        ));
    }
    Ok(())
}
