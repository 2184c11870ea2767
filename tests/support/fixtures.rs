//! Test fixtures and constants.

/// Storage location used across tests.
pub const STORAGE: &str = "/data/app";

/// A secret that must never appear in logs or redacted output.
pub const SECRET: &str = "HUNTER2-S3CR3T";

/// Engine that echoes its input line back, so stdout shows what the engine saw.
#[cfg(unix)]
pub const ECHO_ENGINE: &str = "cat";

/// Config with a storage location and the echo engine.
#[cfg(unix)]
pub const ECHO_CONFIG: &str = r#"
version = 1
storage_location = "/data/app"

[engine]
program = "cat"
"#;

/// Config using the legacy key name and custom engine flags.
pub const LEGACY_CONFIG: &str = r#"
wallet_dir = "/legacy/wallet"
output_format = "structured"

[flags]
storage_location = "--wallet-dir"
output_format = "--json-output"
output_format_value = false
secret = "--password"
"#;
