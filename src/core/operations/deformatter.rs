//! Key-exchange deformatter (receiver side).
//!
//! The deformatter decodes a `KeyTransportMessage`, checks it against the
//! recipient's algorithm family, and asks the provider to repeat the key
//! agreement and unwrap the session key.
//!
//! # Security
//!
//! Every unwrap failure caused by the data (bad MAC, wrong recipient key,
//! tampered ciphertext, mismatched wrap variant) is reported as the single
//! `GostError::KeyRecoveryFailed`, so MAC verification cannot be used as a
//! decryption oracle.

use tracing::debug;

use crate::core::ber::BerSequence;
use crate::core::config::ExchangeConfig;
use crate::core::error::{GostError, GostResult, UnwrapError};
use crate::core::family::CipherFamily;
use crate::core::operations::provider::{KeyExchangeProvider, PrivateKeyHandle, SharedKeyProvider};
use crate::core::types::{EncryptedKey, KeyTransportMessage, KeyWrap, SessionKey};

/// Recovers session keys from key-transport structures.
#[derive(Debug)]
pub struct KeyExchangeDeformatter<'p, P: ?Sized> {
    provider: &'p P,
    config: ExchangeConfig,
}

impl<'p, P: ?Sized> KeyExchangeDeformatter<'p, P> {
    /// Creates a deformatter with the default configuration (simple wrap).
    #[must_use]
    pub fn new(provider: &'p P) -> Self {
        Self::with_config(provider, ExchangeConfig::default())
    }

    /// Creates a deformatter with an explicit configuration.
    ///
    /// The wrap variant must match the sender's.
    #[must_use]
    pub const fn with_config(provider: &'p P, config: ExchangeConfig) -> Self {
        Self { provider, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ExchangeConfig {
        &self.config
    }
}

fn recovery_error(err: UnwrapError) -> GostError {
    match err {
        UnwrapError::MacMismatch => GostError::KeyRecoveryFailed,
        UnwrapError::Provider(inner) => GostError::Provider(inner),
    }
}

fn unmasked(encrypted_key: &EncryptedKey) -> GostResult<()> {
    if encrypted_key.mask_key().is_some() {
        return Err(GostError::UnsupportedMaskedKey);
    }
    Ok(())
}

fn session_key(plaintext: &[u8], cipher: CipherFamily) -> GostResult<SessionKey> {
    SessionKey::from_slice(plaintext, cipher).map_err(|_| GostError::KeyRecoveryFailed)
}

// =============================================================================
// Ephemeral key agreement
// =============================================================================

impl<P: KeyExchangeProvider + ?Sized> KeyExchangeDeformatter<'_, P> {
    /// Decodes `encoded` and recovers the session key with `recipient`.
    ///
    /// # Errors
    ///
    /// Returns a decode error, `GostError::WrongAlgorithmFamily` if the
    /// message was made for another family, or the errors of
    /// [`Self::decrypt_message`].
    pub fn decrypt_key_exchange(
        &self,
        encoded: &[u8],
        recipient: &P::PrivateKey,
    ) -> GostResult<SessionKey> {
        let message = KeyTransportMessage::decode_for_family(encoded, recipient.family())?;
        self.decrypt_message(&message, recipient)
    }

    /// Recovers the session key from a decoded message.
    ///
    /// # Errors
    ///
    /// Returns `GostError::MissingRequiredElement` if the message carries no
    /// transport parameters or ephemeral key, `GostError::UnsupportedMaskedKey`
    /// for a masked key, `GostError::KeyRecoveryFailed` if the provider
    /// cannot verify the MAC, or `GostError::Provider` for other provider
    /// failures.
    pub fn decrypt_message(
        &self,
        message: &KeyTransportMessage,
        recipient: &P::PrivateKey,
    ) -> GostResult<SessionKey> {
        let family = recipient.family();
        let transport = message
            .transport_parameters()
            .ok_or(GostError::MissingRequiredElement("transportParameters"))?;
        let ephemeral = message.ephemeral_key_for(family)?;
        let encrypted_key = message.session_encrypted_key();
        unmasked(encrypted_key)?;

        let cipher = transport.cipher();
        debug!(
            family = %family,
            variant = %self.config.wrap_variant,
            cipher = %cipher,
            "decrypting key exchange"
        );
        let plaintext = self
            .provider
            .agree_and_unwrap(
                recipient,
                ephemeral.as_bytes(),
                self.config.wrap_variant,
                transport.ukm(),
                encrypted_key.encrypted_key(),
                encrypted_key.mac(),
            )
            .map_err(recovery_error)?;
        let key = session_key(&plaintext, cipher)?;
        debug!(family = %family, cipher = %cipher, "session key recovered");
        Ok(key)
    }
}

// =============================================================================
// Shared key
// =============================================================================

impl<P: SharedKeyProvider + ?Sized> KeyExchangeDeformatter<'_, P> {
    /// Recovers the session key from a decoded `KeyWrap`.
    ///
    /// # Errors
    ///
    /// Returns `GostError::UnsupportedMaskedKey` for a masked key,
    /// `GostError::KeyRecoveryFailed` if the provider cannot verify the MAC,
    /// or `GostError::Provider` for other provider failures.
    pub fn decrypt_key_wrap(
        &self,
        wrap: &KeyWrap,
        shared_key: &P::SharedKey,
    ) -> GostResult<SessionKey> {
        let encrypted_key = wrap.encrypted_key();
        unmasked(encrypted_key)?;
        let params = wrap.wrap_params();
        let cipher = params.cipher();
        debug!(
            variant = %self.config.wrap_variant,
            cipher = %cipher,
            "unwrapping shared key wrap"
        );
        let plaintext = self
            .provider
            .unwrap_with_shared_key(
                shared_key,
                self.config.wrap_variant,
                params.encryption_param_set(),
                params.ukm(),
                encrypted_key.encrypted_key(),
                encrypted_key.mac(),
            )
            .map_err(recovery_error)?;
        session_key(&plaintext, cipher)
    }

    /// Decodes an encoded `KeyWrap` and recovers the session key.
    ///
    /// # Errors
    ///
    /// Returns a decode error or any error of [`Self::decrypt_key_wrap`].
    pub fn decrypt_shared_key_exchange(
        &self,
        encoded: &[u8],
        shared_key: &P::SharedKey,
    ) -> GostResult<SessionKey> {
        let wrap = KeyWrap::from_ber(encoded)?;
        self.decrypt_key_wrap(&wrap, shared_key)
    }
}
