//! Backing storage for secret bytes.
//!
//! The guard only ever sees storage through [`SecretStorage`], so a host can
//! plug in its own buffer type (locked pages, FFI memory) as long as it can
//! wipe it in place.

use std::borrow::Cow;

use zeroize::Zeroize;

use crate::error::ScrubError;

/// Memory holding a secret that can be wiped in place.
pub trait SecretStorage {
    /// Current contents.
    fn expose(&self) -> &[u8];

    /// Overwrite the contents with zero bytes.
    ///
    /// # Errors
    ///
    /// Returns `ScrubError` when the bytes cannot be wiped where they live.
    fn scrub(&mut self) -> Result<(), ScrubError>;
}

impl SecretStorage for [u8] {
    fn expose(&self) -> &[u8] {
        self
    }

    fn scrub(&mut self) -> Result<(), ScrubError> {
        self.zeroize();
        verify_zeroed(self)
    }
}

/// Zeroes the contents but keeps the length, so the wiped buffer can be
/// inspected afterwards.
impl SecretStorage for Vec<u8> {
    fn expose(&self) -> &[u8] {
        self.as_slice()
    }

    fn scrub(&mut self) -> Result<(), ScrubError> {
        self.as_mut_slice().scrub()
    }
}

/// A borrowed `Cow` points at memory someone else owns; wiping it would
/// mean copying first, which leaves the original untouched.
impl SecretStorage for Cow<'_, [u8]> {
    fn expose(&self) -> &[u8] {
        self
    }

    fn scrub(&mut self) -> Result<(), ScrubError> {
        match self {
            Cow::Owned(bytes) => bytes.scrub(),
            Cow::Borrowed(_) => Err(ScrubError::Immutable),
        }
    }
}

/// Check that every byte is zero.
pub fn verify_zeroed(bytes: &[u8]) -> Result<(), ScrubError> {
    let remaining = bytes.iter().filter(|b| **b != 0).count();
    if remaining == 0 {
        Ok(())
    } else {
        Err(ScrubError::Residue {
            remaining,
            len: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_scrub() {
        let mut buf = *b"hunter2";
        buf.as_mut_slice().scrub().unwrap();
        assert_eq!(buf, [0u8; 7]);
    }

    #[test]
    fn test_vec_scrub_keeps_length() {
        let mut buf = b"correct horse".to_vec();
        buf.scrub().unwrap();
        assert_eq!(buf.len(), 13);
        assert!(buf.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_owned_cow_scrub() {
        let mut buf: Cow<'_, [u8]> = Cow::Owned(b"passphrase".to_vec());
        buf.scrub().unwrap();
        assert!(buf.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_borrowed_cow_cannot_scrub() {
        let original = b"passphrase".to_vec();
        let mut buf: Cow<'_, [u8]> = Cow::Borrowed(&original);
        assert_eq!(buf.scrub(), Err(ScrubError::Immutable));
        assert_eq!(original, b"passphrase");
    }

    #[test]
    fn test_verify_zeroed() {
        assert!(verify_zeroed(&[]).is_ok());
        assert!(verify_zeroed(&[0, 0, 0]).is_ok());
        assert_eq!(
            verify_zeroed(&[0, 1, 0, 2]),
            Err(ScrubError::Residue {
                remaining: 2,
                len: 4
            })
        );
    }
}
