//! Secret acquisition for CLI commands.
//!
//! Every source ends up in a `Zeroizing<Vec<u8>>` that is handed to the
//! guard by mutable reference and wiped again when dropped.

use std::io::{self, BufRead};

use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::SecretArgs;
use crate::error::{Error, Result};

/// Upper bound for a secret line read from stdin before the buffer grows.
const STDIN_CAPACITY: usize = 1024;

/// Read the secret from whichever source `args` selects.
pub fn acquire(args: &SecretArgs) -> Result<Option<Zeroizing<Vec<u8>>>> {
    let secret = if args.ask_secret {
        Some(prompt()?)
    } else if args.secret_stdin {
        Some(read_line(io::stdin().lock())?)
    } else if let Some(var) = &args.secret_env {
        Some(from_env(var)?)
    } else {
        None
    };

    if let Some(secret) = &secret {
        debug!(secret_len = secret.len(), "secret read");
    }
    Ok(secret)
}

fn prompt() -> Result<Zeroizing<Vec<u8>>> {
    let value = Password::new().with_prompt("Secret").interact()?;
    Ok(Zeroizing::new(value.into_bytes()))
}

/// Read one line, without its line ending.
///
/// The buffer is preallocated so typical secrets never trigger a
/// reallocation that would leave a copy behind.
fn read_line<R: BufRead>(mut reader: R) -> Result<Zeroizing<Vec<u8>>> {
    let mut line = Zeroizing::new(String::with_capacity(STDIN_CAPACITY));
    reader.read_line(&mut line)?;

    let len = line.trim_end_matches(&['\r', '\n'][..]).len();
    line.truncate(len);
    Ok(Zeroizing::new(std::mem::take(&mut *line).into_bytes()))
}

/// Take the secret out of the environment so the engine does not inherit it.
fn from_env(var: &str) -> Result<Zeroizing<Vec<u8>>> {
    let value = std::env::var(var)
        .map_err(|_| Error::Other(format!("environment variable {} is not set", var)))?;
    std::env::remove_var(var);
    Ok(Zeroizing::new(value.into_bytes()))
}
