//! GOST key-transport structures and key exchange.
//!
//! This crate encodes and decodes the ASN.1 structures used to transport a
//! symmetric session key under the GOST R 34.10 families, and drives a
//! pluggable native provider through the sender and recipient sides of
//! the exchange.
//!
//! # Quick Start
//!
//! ```rust
//! use gost_kex::core::types::EncryptedKey;
//! use gost_kex::core::ber::BerSequence;
//!
//! // Build an EncryptedKey and serialize it
//! let key = EncryptedKey::new([0x11; 32], &[0xaa, 0xbb, 0xcc, 0xdd]).expect("valid lengths");
//! let der = key.to_ber().expect("encode should succeed");
//! assert_eq!(&der[..4], &[0x30, 0x28, 0x04, 0x20]);
//!
//! // Parse it back
//! let parsed = EncryptedKey::from_ber(&der).expect("decode should succeed");
//! assert_eq!(parsed.mac(), &[0xaa, 0xbb, 0xcc, 0xdd]);
//! ```
//!
//! # Structures
//!
//! | Type | Contents |
//! |------|----------|
//! | `EncryptedKey` | 32-byte wrapped key, optional mask key, 1..4 byte MAC |
//! | `KeyWrapParams` | Encryption parameter set and optional 8-byte UKM |
//! | `KeyWrap` | `EncryptedKey` plus `KeyWrapParams` |
//! | `TransportParameters` | Parameter set, ephemeral public key, UKM |
//! | `KeyTransportMessage` | `EncryptedKey` plus `[0]` `TransportParameters` |
//! | `PublicKeyParams` | Public-key, digest and encryption parameter sets |
//!
//! # Families
//!
//! - **GOST R 34.10-94**: 64-byte public keys
//! - **GOST R 34.10-2001**: 64-byte public keys
//! - **GOST R 34.10-2012 (256)**: 64-byte public keys
//! - **GOST R 34.10-2012 (512)**: 128-byte public keys
//!
//! # Providers
//!
//! Key agreement, key derivation and MAC computation are not done here.
//! They are delegated to an implementation of
//! [`KeyExchangeProvider`](core::operations::KeyExchangeProvider) (ephemeral
//! agreement) or [`SharedKeyProvider`](core::operations::SharedKeyProvider)
//! (pre-shared key).
//!
//! # Security
//!
//! - Recovered session keys are zeroized on drop
//! - Debug output redacts key material
//! - Session keys compare in constant time
//! - Every MAC failure is reported as the same `KeyRecoveryFailed` error
//! - No unsafe code
//!
//! # Modules
//!
//! - [`core`] - Core types and operations
//! - [`prelude`] - Ergonomic imports (requires `prelude` feature)

#![forbid(unsafe_code)]

pub mod core;

#[cfg(feature = "prelude")]
pub mod prelude;

// Re-export commonly used items at crate root
pub use crate::core::error::{GostError, GostResult, ProviderError, UnwrapError};
pub use crate::core::family::{AlgorithmFamily, CipherFamily, WrapVariant};
pub use crate::core::oid::OidValue;

pub use crate::core::types::{
    EncryptedKey, KeyExchangeParameters, KeyTransportMessage, KeyWrap, KeyWrapParams,
    PublicKeyParams, PublicKeyValue, SessionKey, SubjectPublicKeyInfo, TransportParameters,
};

pub use crate::core::config::ExchangeConfig;
pub use crate::core::operations::{
    KeyExchangeDeformatter, KeyExchangeFormatter, KeyExchangeProvider, PrivateKeyHandle,
    SharedKeyProvider, WrappedKey,
};
