//! Ergonomic layer for GOST key exchange.
//!
//! The prelude re-exports the types most callers need and adds a builder
//! for exchange configuration with per-variant presets.
//!
//! # Usage
//!
//! ```rust
//! use gost_kex::prelude::*;
//! ```

mod builders;

pub use builders::ExchangeConfigBuilder;

// Re-export core types for convenience
pub use crate::core::ber::BerSequence;
pub use crate::core::config::ExchangeConfig;
pub use crate::core::error::{GostError, GostResult, ProviderError, UnwrapError};
pub use crate::core::family::{AlgorithmFamily, CipherFamily, WrapVariant};
pub use crate::core::oid::{known, OidValue};
pub use crate::core::operations::{
    KeyExchangeDeformatter, KeyExchangeFormatter, KeyExchangeProvider, PrivateKeyHandle,
    SharedKeyProvider, WrappedKey,
};
pub use crate::core::types::{
    EncryptedKey, KeyExchangeParameters, KeyTransportMessage, KeyWrap, KeyWrapParams,
    PublicKeyParams, PublicKeyValue, SessionKey, SubjectPublicKeyInfo, TransportParameters,
};
