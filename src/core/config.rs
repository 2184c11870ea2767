//! Configuration management.
//!
//! [`ConfigOptions`] is the versioned option set handed to the assembler.
//! [`BridgeConfig`] is what lives in `.wallet-bridge.toml`: the options plus
//! the engine program to run.
//!
//! Engine flag names are configuration too, so the option surface stays
//! stable while the engine renames its flags (`--wallet-dir`,
//! `--wallet-path`, ...).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::types::FlagName;
use crate::error::{CommandError, ConfigError, Result};

/// Output format requested from the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Engine default; no flag is emitted.
    #[default]
    Human,
    /// Machine-readable output.
    Structured,
}

impl OutputFormat {
    /// Value token passed to the engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Human => "human",
            OutputFormat::Structured => "structured",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == OutputFormat::Human
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flag names understood by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineFlags {
    pub storage_location: FlagName,
    pub output_format: FlagName,
    /// When false, the output format flag is a bare switch
    /// (`--json-output`) with no value token.
    #[serde(skip_serializing_if = "is_true")]
    pub output_format_value: bool,
    pub secret: FlagName,
}

fn is_true(value: &bool) -> bool {
    *value
}

impl Default for EngineFlags {
    fn default() -> Self {
        Self {
            storage_location: constants::STORAGE_LOCATION_FLAG.to_string(),
            output_format: constants::OUTPUT_FORMAT_FLAG.to_string(),
            output_format_value: true,
            secret: constants::SECRET_FLAG.to_string(),
        }
    }
}

impl EngineFlags {
    /// Every flag the bridge appends itself.
    pub fn managed(&self) -> [&str; 3] {
        [
            self.storage_location.as_str(),
            self.output_format.as_str(),
            self.secret.as_str(),
        ]
    }

    fn validate(&self) -> Result<()> {
        for flag in self.managed() {
            if !flag.starts_with("--") || flag.len() < 3 {
                return Err(ConfigError::Invalid {
                    field: "flags",
                    reason: format!("'{}' must start with -- and name a flag", flag),
                }
                .into());
            }
            if flag.chars().any(|c| c.is_whitespace() || c == '=') {
                return Err(ConfigError::Invalid {
                    field: "flags",
                    reason: format!("'{}' must not contain whitespace or '='", flag),
                }
                .into());
            }
        }

        let [storage, format, secret] = self.managed();
        if storage == format || storage == secret || format == secret {
            return Err(ConfigError::Invalid {
                field: "flags",
                reason: "storage, output format and secret flags must be distinct".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Options forwarded to the engine with every command.
///
/// Fields are only ever added; unknown fields in a file are ignored so older
/// builds keep reading newer files of the same major version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOptions {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Engine data store. Required by every command.
    #[serde(
        default,
        alias = "wallet_dir",
        alias = "wallet_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_location: Option<PathBuf>,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub flags: EngineFlags,
}

fn default_version() -> u32 {
    constants::CONFIG_VERSION
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigOptions {
    /// Options at the current version with default flags and no storage.
    pub fn new() -> Self {
        Self {
            version: constants::CONFIG_VERSION,
            storage_location: None,
            output_format: OutputFormat::default(),
            flags: EngineFlags::default(),
        }
    }

    pub fn with_storage_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_location = Some(path.into());
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_flags(mut self, flags: EngineFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Storage location as a command token.
    ///
    /// # Errors
    ///
    /// `MissingStorageLocation` when unset or empty, `NonUtf8StorageLocation`
    /// when the path cannot be written into a command line.
    pub fn storage_token(&self) -> std::result::Result<&str, CommandError> {
        let path = self
            .storage_location
            .as_deref()
            .ok_or(CommandError::MissingStorageLocation)?;
        let token = path
            .to_str()
            .ok_or(CommandError::NonUtf8StorageLocation)?;
        if token.trim().is_empty() {
            return Err(CommandError::MissingStorageLocation);
        }
        Ok(token)
    }

    /// Validate version and flag names.
    ///
    /// A missing or empty storage location is not checked here; the
    /// assembler rejects it per command as `MissingStorageLocation`.
    pub fn validate(&self) -> Result<()> {
        if self.version == 0 {
            return Err(ConfigError::Invalid {
                field: "version",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.version > constants::CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: constants::CONFIG_VERSION,
            }
            .into());
        }
        self.flags.validate()
    }
}

/// External engine program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Program name or path; bare names are looked up on `PATH`.
    pub program: String,
    /// Fixed arguments passed before anything else.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(flatten)]
    pub options: ConfigOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineSettings>,
}

impl BridgeConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// `ConfigError::Parse` if the TOML is malformed, or a validation error.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            version = config.options.version,
            has_storage = config.options.storage_location.is_some(),
            has_engine = config.engine.is_some(),
            "config loaded"
        );

        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.options.validate()?;
        if let Some(engine) = &self.engine {
            if engine.program.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "engine.program",
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Project-local configuration path in `dir`.
    pub fn local_path(dir: &Path) -> PathBuf {
        dir.join(constants::CONFIG_FILE)
    }

    /// User-level configuration path, if the platform has a config dir.
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| {
            d.join(constants::USER_CONFIG_DIR)
                .join(constants::USER_CONFIG_FILE)
        })
    }

    /// Find and load the effective configuration.
    ///
    /// Order: `explicit`, then `.wallet-bridge.toml` in the current
    /// directory, then the user-level file, then defaults. Returns the path
    /// that was loaded, if any.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let cwd = std::env::current_dir()?;
        Self::discover_in(explicit, &cwd, Self::user_path())
    }

    pub(crate) fn discover_in(
        explicit: Option<&Path>,
        project_dir: &Path,
        user_path: Option<PathBuf>,
    ) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidates = std::iter::once(Self::local_path(project_dir)).chain(user_path);
        for path in candidates {
            if path.exists() {
                return Ok((Self::load(&path)?, Some(path)));
            }
        }

        debug!("no config file found, using defaults");
        Ok((Self::default(), None))
    }
}
