//! Provider traits: the seam to the native cryptographic provider.
//!
//! The formatter and deformatter never compute key agreement, key
//! derivation or MACs themselves. Everything cryptographic goes through
//! these traits, so a hardware token, a native library, or a test double
//! can be injected without touching the wire logic.
//!
//! Provider calls are synchronous and are not retried. Any blocking (for
//! example waiting on a token) happens inside the implementation.

use zeroize::Zeroizing;

use crate::core::error::{ProviderError, UnwrapError};
use crate::core::family::{AlgorithmFamily, WrapVariant};
use crate::core::oid::OidValue;
use crate::core::types::{ENCRYPTED_KEY_LEN, UKM_LEN};

/// A private key held by the provider.
pub trait PrivateKeyHandle {
    /// Returns the family the key belongs to.
    fn family(&self) -> AlgorithmFamily;
}

/// Output of a provider wrap operation.
///
/// Lengths are checked by the caller: the ciphertext must be 32 bytes, the
/// MAC 1 to 4 bytes and the UKM 8 bytes (or empty under a shared key).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrappedKey {
    /// Encrypted session key.
    pub ciphertext: Vec<u8>,
    /// MAC over the session key.
    pub mac: Vec<u8>,
    /// User keying material chosen by the provider.
    pub ukm: Vec<u8>,
}

/// Key agreement with an ephemeral key pair.
pub trait KeyExchangeProvider {
    /// Provider-side private key handle.
    type PrivateKey: PrivateKeyHandle;

    /// Generates a fresh ephemeral key pair under the given parameter sets.
    ///
    /// Returns the private handle and the raw public key, whose length must
    /// match the family.
    ///
    /// # Errors
    ///
    /// Returns the provider's own error.
    fn generate_ephemeral_keypair(
        &self,
        family: AlgorithmFamily,
        digest_param_set: &OidValue,
        public_key_param_set: &OidValue,
    ) -> Result<(Self::PrivateKey, Vec<u8>), ProviderError>;

    /// Agrees a key-encryption key between `private_key` and `public_key`
    /// using `variant`, then wraps `plaintext` under it.
    ///
    /// # Errors
    ///
    /// Returns the provider's own error.
    fn agree_and_wrap(
        &self,
        private_key: &Self::PrivateKey,
        public_key: &[u8],
        variant: WrapVariant,
        plaintext: &[u8],
    ) -> Result<WrappedKey, ProviderError>;

    /// Agrees the same key-encryption key from the recipient side, unwraps
    /// `ciphertext`, and verifies `mac`.
    ///
    /// # Errors
    ///
    /// Returns `UnwrapError::MacMismatch` if the recomputed MAC differs, or
    /// `UnwrapError::Provider` for any other failure.
    fn agree_and_unwrap(
        &self,
        private_key: &Self::PrivateKey,
        ephemeral_public_key: &[u8],
        variant: WrapVariant,
        ukm: &[u8; UKM_LEN],
        ciphertext: &[u8; ENCRYPTED_KEY_LEN],
        mac: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, UnwrapError>;
}

/// Key wrap under a key-encryption key agreed out of band.
pub trait SharedKeyProvider {
    /// Provider-side handle of the shared key.
    type SharedKey;

    /// Wraps `plaintext` under `shared_key`.
    ///
    /// The returned UKM may be empty, in which case none is transported.
    ///
    /// # Errors
    ///
    /// Returns the provider's own error.
    fn wrap_with_shared_key(
        &self,
        shared_key: &Self::SharedKey,
        variant: WrapVariant,
        encryption_param_set: &OidValue,
        plaintext: &[u8],
    ) -> Result<WrappedKey, ProviderError>;

    /// Unwraps `ciphertext` under `shared_key` and verifies `mac`.
    ///
    /// # Errors
    ///
    /// Returns `UnwrapError::MacMismatch` if the recomputed MAC differs, or
    /// `UnwrapError::Provider` for any other failure.
    fn unwrap_with_shared_key(
        &self,
        shared_key: &Self::SharedKey,
        variant: WrapVariant,
        encryption_param_set: &OidValue,
        ukm: Option<&[u8; UKM_LEN]>,
        ciphertext: &[u8; ENCRYPTED_KEY_LEN],
        mac: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, UnwrapError>;
}
