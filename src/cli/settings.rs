//! Effective settings for CLI commands.
//!
//! The config file supplies defaults; command-line options override them.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::OptionArgs;
use crate::core::config::{BridgeConfig, ConfigOptions};
use crate::core::engine::ProcessEngine;
use crate::error::{EngineError, Result};

/// Loaded configuration plus where it came from.
pub struct Settings {
    pub config: BridgeConfig,
    pub source: Option<PathBuf>,
}

/// Discover the config file and apply command-line overrides.
pub fn resolve(config_path: Option<&Path>, options: &OptionArgs) -> Result<Settings> {
    let (mut config, source) = BridgeConfig::discover(config_path)?;
    apply(options, &mut config.options);

    debug!(
        source = ?source,
        storage = ?config.options.storage_location,
        output_format = %config.options.output_format,
        "settings resolved"
    );
    Ok(Settings { config, source })
}

/// Overlay command-line options onto `target`.
pub fn apply(options: &OptionArgs, target: &mut ConfigOptions) {
    if let Some(path) = &options.storage_location {
        target.storage_location = Some(path.clone());
    }
    if let Some(format) = options.output_format {
        target.output_format = format.into();
    }
}

/// Pick the engine program: `--engine` wins over the config file.
///
/// # Errors
///
/// `EngineUnavailable` when no program is configured or it cannot be found.
pub fn engine(config: &BridgeConfig, program: Option<&str>) -> Result<ProcessEngine> {
    let engine = match (program, &config.engine) {
        (Some(program), _) => ProcessEngine::new(program, Vec::new())?,
        (None, Some(settings)) => ProcessEngine::new(&settings.program, settings.args.clone())?,
        (None, None) => return Err(EngineError::NotConfigured.into()),
    };
    Ok(engine)
}
