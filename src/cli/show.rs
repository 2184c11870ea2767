//! Config command - show the effective configuration.

use std::path::Path;

use crate::cli::output;
use crate::core::config::BridgeConfig;
use crate::error::Result;

/// Print the configuration that `call` would use.
pub fn execute(json: bool, config_path: Option<&Path>) -> Result<()> {
    let (config, source) = BridgeConfig::discover(config_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let options = &config.options;
    output::header("Configuration");
    output::kv(
        "source ",
        source
            .map(|p| output::path(&p.display().to_string()))
            .unwrap_or_else(|| "built-in defaults".to_string()),
    );
    output::kv("version", options.version);
    output::kv(
        "storage",
        options
            .storage_location
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    output::kv("output ", options.output_format);
    output::kv(
        "flags  ",
        format!(
            "{} {} {}",
            options.flags.storage_location, options.flags.output_format, options.flags.secret
        ),
    );
    output::kv(
        "engine ",
        config
            .engine
            .as_ref()
            .map(|e| {
                let mut line = e.program.clone();
                for arg in &e.args {
                    line.push(' ');
                    line.push_str(&shell_words::quote(arg));
                }
                line
            })
            .unwrap_or_else(|| "(not set)".to_string()),
    );

    if options.storage_location.is_none() {
        output::warn("no storage location: every call will need --storage-location");
    }
    Ok(())
}
