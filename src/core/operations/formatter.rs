//! Key-exchange formatter (sender side).
//!
//! The formatter takes a session key and the recipient's public key,
//! drives the provider through ephemeral key generation and key
//! agreement, and assembles the resulting `KeyTransportMessage`.
//!
//! # Example
//!
//! ```rust
//! use gost_kex::core::types::{ENCRYPTED_KEY_LEN, UKM_LEN};
//! use gost_kex::prelude::*;
//! use zeroize::Zeroizing;
//!
//! // XOR under the shared key. Illustration only.
//! struct XorProvider;
//!
//! impl SharedKeyProvider for XorProvider {
//!     type SharedKey = [u8; 32];
//!
//!     fn wrap_with_shared_key(
//!         &self,
//!         shared_key: &[u8; 32],
//!         _variant: WrapVariant,
//!         _encryption_param_set: &OidValue,
//!         plaintext: &[u8],
//!     ) -> Result<WrappedKey, ProviderError> {
//!         let ciphertext = plaintext.iter().zip(shared_key).map(|(p, k)| p ^ k).collect();
//!         Ok(WrappedKey { ciphertext, mac: vec![0x01; 4], ukm: Vec::new() })
//!     }
//!
//!     fn unwrap_with_shared_key(
//!         &self,
//!         shared_key: &[u8; 32],
//!         _variant: WrapVariant,
//!         _encryption_param_set: &OidValue,
//!         _ukm: Option<&[u8; UKM_LEN]>,
//!         ciphertext: &[u8; ENCRYPTED_KEY_LEN],
//!         _mac: &[u8],
//!     ) -> Result<Zeroizing<Vec<u8>>, UnwrapError> {
//!         let plaintext = ciphertext.iter().zip(shared_key).map(|(c, k)| c ^ k).collect();
//!         Ok(Zeroizing::new(plaintext))
//!     }
//! }
//!
//! let formatter = KeyExchangeFormatter::new(&XorProvider);
//! let encoded = formatter.create_shared_key_exchange_data(&[0x5a; 32], &[0x0f; 32])?;
//!
//! let wrap = KeyWrap::from_ber(&encoded)?;
//! assert_eq!(wrap.encrypted_key().encrypted_key(), &[0x55; 32]);
//! assert!(wrap.wrap_params().ukm().is_none());
//!
//! let recovered = KeyExchangeDeformatter::new(&XorProvider)
//!     .decrypt_shared_key_exchange(&encoded, &[0x0f; 32])?;
//! assert_eq!(recovered.as_bytes(), &[0x5a; 32]);
//! # Ok::<(), GostError>(())
//! ```

use tracing::debug;

use crate::core::ber::BerSequence;
use crate::core::config::ExchangeConfig;
use crate::core::error::{GostError, GostResult};
use crate::core::oid::{known, OidValue};
use crate::core::operations::provider::{KeyExchangeProvider, SharedKeyProvider, WrappedKey};
use crate::core::types::{
    EncryptedKey, KeyExchangeParameters, KeyTransportMessage, KeyWrap, KeyWrapParams,
    PublicKeyValue, TransportParameters, SESSION_KEY_LEN, UKM_LEN,
};

/// Builds key-transport structures for a recipient.
#[derive(Debug)]
pub struct KeyExchangeFormatter<'p, P: ?Sized> {
    provider: &'p P,
    config: ExchangeConfig,
}

impl<'p, P: ?Sized> KeyExchangeFormatter<'p, P> {
    /// Creates a formatter with the default configuration (simple wrap).
    #[must_use]
    pub fn new(provider: &'p P) -> Self {
        Self::with_config(provider, ExchangeConfig::default())
    }

    /// Creates a formatter with an explicit configuration.
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

fn check_session_key(session_key: &[u8]) -> GostResult<()> {
    if session_key.is_empty() {
        return Err(GostError::EmptySessionKey);
    }
    if session_key.len() != SESSION_KEY_LEN {
        return Err(GostError::length("sessionKey", "32", session_key.len()));
    }
    Ok(())
}

fn fixed_ukm(ukm: &[u8]) -> GostResult<[u8; UKM_LEN]> {
    ukm.try_into()
        .map_err(|_| GostError::length("ukm", "8", ukm.len()))
}

// =============================================================================
// Ephemeral key agreement
// =============================================================================

impl<P: KeyExchangeProvider + ?Sized> KeyExchangeFormatter<'_, P> {
    /// Wraps `session_key` for `recipient` and returns the message.
    ///
    /// # Errors
    ///
    /// Returns `GostError::EmptySessionKey` before any provider call if the
    /// key is empty, `GostError::Provider` with the provider's error
    /// unchanged, or `GostError::FixedLengthViolation` if the provider
    /// returns values of the wrong size.
    pub fn create_key_transport(
        &self,
        session_key: &[u8],
        recipient: &KeyExchangeParameters,
    ) -> GostResult<KeyTransportMessage> {
        check_session_key(session_key)?;
        let family = recipient.family();
        let params = recipient.params();
        debug!(
            family = %family,
            variant = %self.config.wrap_variant,
            "creating key transport"
        );

        let (ephemeral_private, ephemeral_public) = self
            .provider
            .generate_ephemeral_keypair(
                family,
                params.digest_param_set(),
                params.public_key_param_set(),
            )
            .map_err(GostError::Provider)?;
        let ephemeral_public = PublicKeyValue::new(family, &ephemeral_public)?;

        let wrapped = self
            .provider
            .agree_and_wrap(
                &ephemeral_private,
                recipient.public_key().as_bytes(),
                self.config.wrap_variant,
                session_key,
            )
            .map_err(GostError::Provider)?;
        let encrypted_key = EncryptedKey::from_slices(&wrapped.ciphertext, &wrapped.mac)?;
        let ukm = fixed_ukm(&wrapped.ukm)?;

        let encryption_param_set = self.config.encryption_param_set_for(recipient);
        let ephemeral = KeyExchangeParameters::new(params.clone(), ephemeral_public);
        let transport = TransportParameters::new(
            encryption_param_set,
            Some(ephemeral.to_spki()),
            ukm,
        );
        debug!(
            family = %family,
            cipher = %transport.cipher(),
            "key transport created"
        );
        Ok(KeyTransportMessage::new(encrypted_key, transport))
    }

    /// Wraps `session_key` for `recipient` and returns the encoded message.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Self::create_key_transport`] or an encode error.
    pub fn create_key_exchange_data(
        &self,
        session_key: &[u8],
        recipient: &KeyExchangeParameters,
    ) -> GostResult<Vec<u8>> {
        let encoded = self.create_key_transport(session_key, recipient)?.to_ber()?;
        debug!(len = encoded.len(), "key exchange data encoded");
        Ok(encoded)
    }
}

// =============================================================================
// Shared key
// =============================================================================

impl<P: SharedKeyProvider + ?Sized> KeyExchangeFormatter<'_, P> {
    /// Wraps `session_key` under a key agreed out of band.
    ///
    /// The encryption parameter set comes from the configuration, or
    /// GOST 28147-89 CryptoPro A when none is configured.
    ///
    /// # Errors
    ///
    /// Returns `GostError::EmptySessionKey` before any provider call if the
    /// key is empty, `GostError::Provider` with the provider's error
    /// unchanged, or `GostError::FixedLengthViolation` for wrong sizes.
    pub fn create_key_wrap(
        &self,
        session_key: &[u8],
        shared_key: &P::SharedKey,
    ) -> GostResult<KeyWrap> {
        check_session_key(session_key)?;
        let encryption_param_set = self
            .config
            .encryption_param_set
            .clone()
            .unwrap_or_else(|| OidValue::from(known::GOST_28147_89_CRYPTOPRO_A_PARAMSET));
        debug!(
            variant = %self.config.wrap_variant,
            param_set = %encryption_param_set,
            "creating shared key wrap"
        );

        let WrappedKey {
            ciphertext,
            mac,
            ukm,
        } = self
            .provider
            .wrap_with_shared_key(
                shared_key,
                self.config.wrap_variant,
                &encryption_param_set,
                session_key,
            )
            .map_err(GostError::Provider)?;
        let encrypted_key = EncryptedKey::from_slices(&ciphertext, &mac)?;
        let ukm = if ukm.is_empty() {
            None
        } else {
            Some(fixed_ukm(&ukm)?)
        };
        Ok(KeyWrap::new(
            encrypted_key,
            KeyWrapParams::new(encryption_param_set, ukm),
        ))
    }

    /// Wraps `session_key` under a shared key and returns the encoded `KeyWrap`.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Self::create_key_wrap`] or an encode error.
    pub fn create_shared_key_exchange_data(
        &self,
        session_key: &[u8],
        shared_key: &P::SharedKey,
    ) -> GostResult<Vec<u8>> {
        self.create_key_wrap(session_key, shared_key)?.to_ber()
    }
}
