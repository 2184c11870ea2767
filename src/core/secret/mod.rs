//! Secret lifecycle guard.
//!
//! A [`Secret`] only exists inside [`with_secret`]. It borrows the caller's
//! storage, so the borrow checker keeps any component from holding on to it
//! after the invocation, and the storage is wiped on every way out of the
//! scope: normal return, error and unwinding panic.
//!
//! ```text
//! caller buffer ──► with_secret ──► Secret<'_> ──► assemble ──► dispatch
//!       ▲                                                          │
//!       └──────────────── scrub + verify (always) ◄────────────────┘
//! ```

pub mod redact;
mod storage;

use serde::{Serialize, Serializer};
use tracing::{debug, error, warn};

use crate::core::constants::REDACTED;
use crate::error::{CommandError, Result, ScrubError};

pub use redact::{redact, redact_line, RedactedCommand};
pub use storage::{verify_zeroed, SecretStorage};

/// A password or passphrase borrowed for one invocation.
///
/// Every human- or machine-readable rendering prints `[redacted]`; the bytes
/// are only reachable through [`Secret::expose_secret`].
pub struct Secret<'a> {
    bytes: &'a [u8],
}

impl<'a> Secret<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Raw secret bytes.
    pub fn expose_secret(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Secret as a command token.
    pub(crate) fn as_token(&self) -> std::result::Result<&'a str, CommandError> {
        if self.bytes.is_empty() {
            return Err(CommandError::EmptySecret);
        }
        std::str::from_utf8(self.bytes).map_err(|_| CommandError::NonUtf8Secret)
    }
}

impl std::fmt::Debug for Secret<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(REDACTED)
    }
}

impl std::fmt::Display for Secret<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(REDACTED)
    }
}

impl Serialize for Secret<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

/// Wipes the storage when dropped unless released first.
///
/// The drop path covers unwinding; [`ScrubGuard::release`] covers every
/// other exit and reports whether the wipe held.
struct ScrubGuard<'s, S: SecretStorage + ?Sized> {
    storage: &'s mut S,
    armed: bool,
}

impl<'s, S: SecretStorage + ?Sized> ScrubGuard<'s, S> {
    fn new(storage: &'s mut S) -> Self {
        Self {
            storage,
            armed: true,
        }
    }

    fn expose(&self) -> &[u8] {
        self.storage.expose()
    }

    fn release(mut self) -> std::result::Result<(), ScrubError> {
        self.armed = false;
        self.storage.scrub()
    }
}

impl<S: SecretStorage + ?Sized> Drop for ScrubGuard<'_, S> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.storage.scrub() {
                error!(error = %e, "secret scrub failed while unwinding");
            }
        }
    }
}

/// Run `use_secret` with a [`Secret`] borrowed from `storage`, then wipe
/// `storage`.
///
/// The wipe runs whether `use_secret` succeeds, fails or panics. A failed
/// wipe wins over the closure's result: the caller gets
/// `SecretScrubFailed` even if the engine call behind it succeeded.
///
/// # Errors
///
/// Returns the closure's error, or `SecretScrubFailed` if the storage could
/// not be verified as all zero bytes afterwards.
pub fn with_secret<S, T, F>(storage: &mut S, use_secret: F) -> Result<T>
where
    S: SecretStorage + ?Sized,
    F: FnOnce(Secret<'_>) -> Result<T>,
{
    let guard = ScrubGuard::new(storage);
    debug!(secret_len = guard.expose().len(), "secret acquired");

    let outcome = use_secret(Secret::new(guard.expose()));

    match (outcome, guard.release()) {
        (outcome, Ok(())) => {
            debug!("secret scrubbed");
            outcome
        }
        (Ok(_), Err(e)) => {
            error!(error = %e, "secret scrub failed after a successful invocation");
            Err(e.into())
        }
        (Err(inner), Err(e)) => {
            warn!(error = %inner, "invocation failed before the scrub failure");
            error!(error = %e, "secret scrub failed");
            Err(e.into())
        }
    }
}
