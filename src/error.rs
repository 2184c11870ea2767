//! Error types.
//!
//! A top-level [`Error`] wraps one enum per concern. [`Error::kind`] folds
//! them into the three kinds a host application acts on.
//!
//! No variant carries secret material. Errors that mention a command never
//! hold the rendered line, only flag names or counts.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate error.
#[derive(Error, Debug)]
pub enum Error {
    /// The command or its configuration was malformed.
    #[error("invalid command: {0}")]
    InvalidCommand(#[from] CommandError),

    /// Secret memory could not be guaranteed to be wiped.
    #[error("secret scrub failed: {0}")]
    SecretScrubFailed(#[from] ScrubError),

    /// The engine could not be reached or invoked.
    #[error("engine unavailable: {0}")]
    EngineUnavailable(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Recoverable: the caller should fix the command or configuration.
    InvalidCommand,
    /// Fatal for secret hygiene, even if the engine call succeeded.
    SecretScrubFailed,
    /// Recoverable: the caller may retry.
    EngineUnavailable,
    Other,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidCommand(_) => ErrorKind::InvalidCommand,
            Error::Config(
                ConfigError::Invalid { .. }
                | ConfigError::UnsupportedVersion { .. }
                | ConfigError::Parse(_),
            ) => ErrorKind::InvalidCommand,
            Error::SecretScrubFailed(_) => ErrorKind::SecretScrubFailed,
            Error::EngineUnavailable(_) => ErrorKind::EngineUnavailable,
            _ => ErrorKind::Other,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidCommand => 2,
            ErrorKind::SecretScrubFailed => 3,
            ErrorKind::EngineUnavailable => 4,
            ErrorKind::Other => 1,
        }
    }
}

/// Command assembly errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("base command is empty")]
    EmptyCommand,

    #[error("storage location is required")]
    MissingStorageLocation,

    #[error("storage location is not valid UTF-8")]
    NonUtf8StorageLocation,

    #[error("cannot parse base command: {0}")]
    Unparseable(String),

    #[error("base command must not contain the managed flag {flag}")]
    ReservedFlag { flag: String },

    #[error("secret is empty")]
    EmptySecret,

    #[error("secret is not valid UTF-8")]
    NonUtf8Secret,
}

/// Failures of the zeroing step.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScrubError {
    /// The storage is shared or borrowed and cannot be wiped in place.
    #[error("secret storage cannot be mutated in place")]
    Immutable,

    /// Bytes were still set after the wipe.
    #[error("{remaining} of {len} secret bytes still set after wipe")]
    Residue { remaining: usize, len: usize },
}

/// Failures at the engine call boundary.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no engine configured")]
    NotConfigured,

    #[error("engine program not found: {program}")]
    NotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to start engine {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("engine i/o failed: {0}")]
    Io(#[source] std::io::Error),

    #[error("engine terminated without an exit status")]
    Terminated,

    /// Fault raised by an in-process engine's call boundary.
    #[error("{0}")]
    Fault(String),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("config file already exists: {} (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
