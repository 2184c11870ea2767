//! Constants used throughout wallet-bridge.
//!
//! Centralizes flag names, file names and environment variables.

/// Placeholder substituted for secret values in diagnostics.
pub const REDACTED: &str = "[redacted]";

/// Project-local configuration file name.
pub const CONFIG_FILE: &str = ".wallet-bridge.toml";

/// Directory under the user config dir holding `config.toml`.
pub const USER_CONFIG_DIR: &str = "wallet-bridge";

/// File name of the user-level configuration.
pub const USER_CONFIG_FILE: &str = "config.toml";

/// Newest configuration schema version this build understands.
pub const CONFIG_VERSION: u32 = 1;

/// Default engine flag carrying the storage location.
pub const STORAGE_LOCATION_FLAG: &str = "--storage-location";

/// Default engine flag carrying the output format.
pub const OUTPUT_FORMAT_FLAG: &str = "--output-format";

/// Default engine flag carrying the secret.
pub const SECRET_FLAG: &str = "--secret";

/// Environment variable selecting the log filter.
pub const LOG_ENV: &str = "WALLET_BRIDGE_LOG";

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV: &str = "WALLET_BRIDGE_CONFIG";

/// Environment variable naming the engine program.
pub const ENGINE_ENV: &str = "WALLET_BRIDGE_ENGINE";

/// Environment variable holding the storage location.
pub const STORAGE_ENV: &str = "WALLET_BRIDGE_STORAGE";
