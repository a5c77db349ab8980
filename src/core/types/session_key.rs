//! Recovered symmetric session key.

use core::fmt::{self, Debug};

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::core::error::{GostError, GostResult};
use crate::core::family::CipherFamily;

/// Length of a GOST symmetric session key.
pub const SESSION_KEY_LEN: usize = 32;

/// A 256-bit session key tagged with the cipher it is meant for.
///
/// # Security
///
/// - Key material is zeroized on drop
/// - Debug output redacts the key
/// - Equality comparison uses constant-time comparison
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SessionKey {
    key: [u8; SESSION_KEY_LEN],
    #[zeroize(skip)]
    cipher: CipherFamily,
}

impl SessionKey {
    /// Creates a session key.
    #[must_use]
    pub const fn new(key: [u8; SESSION_KEY_LEN], cipher: CipherFamily) -> Self {
        Self { key, cipher }
    }

    /// Creates a session key from a slice.
    ///
    /// # Errors
    ///
    /// Returns `GostError::FixedLengthViolation` if `key` is not 32 bytes.
    pub fn from_slice(key: &[u8], cipher: CipherFamily) -> GostResult<Self> {
        let key: [u8; SESSION_KEY_LEN] = key
            .try_into()
            .map_err(|_| GostError::length("sessionKey", "32", key.len()))?;
        Ok(Self::new(key, cipher))
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_KEY_LEN] {
        &self.key
    }

    /// Returns the cipher this key is meant for.
    #[must_use]
    pub const fn cipher(&self) -> CipherFamily {
        self.cipher
    }
}

impl AsRef<[u8]> for SessionKey {
    fn as_ref(&self) -> &[u8] {
        &self.key
    }
}

// =============================================================================
// Debug (security: don't expose key material)
// =============================================================================

impl Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKey")
            .field("cipher", &self.cipher)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Constant-time equality
// =============================================================================

impl PartialEq for SessionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cipher == other.cipher && bool::from(self.key.ct_eq(&other.key))
    }
}

impl Eq for SessionKey {}
