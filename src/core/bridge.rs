//! Host-facing entry point.
//!
//! [`Bridge::call`] is the one operation a host application needs:
//! assemble, guard the secret, dispatch, return the raw output.

use tracing::info;

use crate::core::command::assemble;
use crate::core::config::ConfigOptions;
use crate::core::engine::{dispatch, Engine};
use crate::core::secret::{with_secret, SecretStorage};
use crate::core::types::EngineOutput;
use crate::error::Result;

/// Forwards commands to one engine.
///
/// Holds no per-call state, so independent calls never share anything but
/// the engine.
pub struct Bridge<E> {
    engine: E,
}

impl<E: Engine> Bridge<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run `command` against the engine.
    ///
    /// With a secret, assembly and dispatch both happen inside
    /// [`with_secret`], so `secret` is wiped after the engine has the
    /// command, on success and on failure alike.
    ///
    /// # Errors
    ///
    /// - `InvalidCommand` if the command cannot be assembled; nothing reaches
    ///   the engine
    /// - `EngineUnavailable` if the engine call fails
    /// - `SecretScrubFailed` if `secret` could not be wiped, whatever the
    ///   engine returned
    pub fn call(
        &self,
        command: &str,
        config: &ConfigOptions,
        secret: Option<&mut dyn SecretStorage>,
    ) -> Result<EngineOutput> {
        let output = match secret {
            None => {
                let assembled = assemble(command, config, None)?;
                dispatch(&self.engine, &assembled)?
            }
            Some(storage) => with_secret(storage, |secret| {
                let assembled = assemble(command, config, Some(secret))?;
                dispatch(&self.engine, &assembled)
            })?,
        };

        info!(output_len = output.len(), "call completed");
        Ok(output)
    }
}
