//! Engine invocation.
//!
//! The engine is a black box behind one call: a command line in, raw output
//! back. [`dispatch`] forwards an assembled [`Command`] and hands the output
//! back untouched.
//!
//! ## Implementations
//!
//! - any `Fn(&str) -> Result<String, EngineError>`, for engines linked into
//!   the host process
//! - [`ProcessEngine`], which runs an external program per call

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command as ProcessCommand, Stdio};

use tracing::debug;

use crate::core::command::Command;
use crate::core::types::EngineOutput;
use crate::error::{EngineError, Result};

/// A wallet command processor.
pub trait Engine {
    /// Run one command line and return the engine's raw output.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` only for faults of the call itself. Failures of
    /// the command are reported by the engine in its output.
    fn invoke(&self, command_line: &str) -> std::result::Result<EngineOutput, EngineError>;
}

impl<F> Engine for F
where
    F: Fn(&str) -> std::result::Result<EngineOutput, EngineError>,
{
    fn invoke(&self, command_line: &str) -> std::result::Result<EngineOutput, EngineError> {
        self(command_line)
    }
}

/// Pin a closure to the [`Engine`] call signature.
///
/// ```
/// use wallet_bridge::core::engine::{self, Engine};
///
/// let echo = engine::from_fn(|line| Ok(line.to_uppercase()));
/// assert_eq!(echo.invoke("balance").unwrap(), "BALANCE");
/// ```
pub fn from_fn<F>(f: F) -> F
where
    F: Fn(&str) -> std::result::Result<EngineOutput, EngineError>,
{
    f
}

/// Forward `command` to `engine`.
///
/// No retries and no interpretation of the output.
///
/// # Errors
///
/// Returns `EngineUnavailable` when the call boundary fails.
pub fn dispatch<E: Engine + ?Sized>(engine: &E, command: &Command) -> Result<EngineOutput> {
    debug!(command = %command.redacted(), "dispatching to engine");

    let line = command.expose_line();
    let output = engine.invoke(&line)?;

    debug!(output_len = output.len(), "engine returned");
    Ok(output)
}

/// External engine program.
///
/// Each call spawns the program with its fixed arguments, writes the command
/// line to its stdin followed by a newline and closes stdin. The secret thus
/// never shows up in the process table. Stdout is returned as is; the exit
/// status is not interpreted.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessEngine {
    /// Resolve `program` on `PATH` (or as a path) and keep its arguments.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotFound` if the program cannot be located.
    pub fn new(program: &str, args: Vec<String>) -> std::result::Result<Self, EngineError> {
        let resolved = which::which(program).map_err(|source| EngineError::NotFound {
            program: program.to_string(),
            source,
        })?;
        debug!(program = %resolved.display(), args = args.len(), "engine resolved");
        Ok(Self {
            program: resolved,
            args,
        })
    }

    pub fn program(&self) -> &std::path::Path {
        &self.program
    }
}

impl Engine for ProcessEngine {
    fn invoke(&self, command_line: &str) -> std::result::Result<EngineOutput, EngineError> {
        let mut child = ProcessCommand::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin
                .write_all(command_line.as_bytes())
                .and_then(|_| stdin.write_all(b"\n")),
            None => Ok(()),
        };

        let output = child.wait_with_output().map_err(EngineError::Io)?;
        let code = output.status.code().ok_or(EngineError::Terminated)?;

        // An engine may exit without reading its input.
        if let Err(e) = written {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(EngineError::Io(e));
            }
        }

        debug!(code, stdout_len = output.stdout.len(), "engine exited");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::assemble;
    use crate::core::config::ConfigOptions;
    use crate::error::Error;
    use std::cell::RefCell;

    fn config() -> ConfigOptions {
        ConfigOptions::new().with_storage_location("/data/app")
    }

    #[test]
    fn test_dispatch_forwards_verbatim() {
        let seen = RefCell::new(String::new());
        let engine = from_fn(|line| {
            seen.borrow_mut().push_str(line);
            Ok("{\"balance\": 0}\n".to_string())
        });

        let command = assemble("wallet balance", &config(), None).unwrap();
        let output = dispatch(&engine, &command).unwrap();

        assert_eq!(output, "{\"balance\": 0}\n");
        assert_eq!(*seen.borrow(), "wallet balance --storage-location /data/app");
    }

    #[test]
    fn test_dispatch_maps_faults() {
        let engine = from_fn(|_| Err(EngineError::Fault("library not loaded".to_string())));
        let command = assemble("wallet balance", &config(), None).unwrap();

        let err = dispatch(&engine, &command).unwrap_err();
        assert!(matches!(err, Error::EngineUnavailable(EngineError::Fault(_))));
    }

    #[test]
    fn test_dispatch_through_trait_object() {
        let engine = from_fn(|line| Ok(line.len().to_string()));
        let engine: &dyn Engine = &engine;
        let command = assemble("wallet balance", &config(), None).unwrap();

        assert_eq!(dispatch(engine, &command).unwrap(), "43");
    }

    #[test]
    fn test_process_engine_not_found() {
        let err = ProcessEngine::new("wallet-bridge-no-such-engine", Vec::new()).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_engine_reads_stdin() {
        let engine = ProcessEngine::new("cat", Vec::new()).unwrap();
        let output = engine.invoke("wallet balance --storage-location /data").unwrap();
        assert_eq!(output, "wallet balance --storage-location /data\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_process_engine_ignores_exit_status() {
        let engine = ProcessEngine::new(
            "sh",
            vec!["-c".to_string(), "echo 'wallet locked'; exit 3".to_string()],
        )
        .unwrap();
        assert_eq!(engine.invoke("wallet balance").unwrap(), "wallet locked\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_process_engine_killed_by_signal() {
        let engine =
            ProcessEngine::new("sh", vec!["-c".to_string(), "kill -9 $$".to_string()]).unwrap();
        assert!(matches!(
            engine.invoke("wallet balance"),
            Err(EngineError::Terminated)
        ));
    }
}
