//! Key-transport structure types.
//!
//! Every structure implements [`BerSequence`](crate::core::ber::BerSequence)
//! and keeps unknown trailing elements so they survive a decode/encode
//! round trip:
//!
//! - [`AlgorithmIdentifier`] - algorithm OID with resolver-typed parameters
//! - [`PublicKeyParams`] / [`SubjectPublicKeyInfo`] - GOST public keys
//! - [`Gost28147Params`] - cipher IV and parameter set
//! - [`EncryptedKey`] - wrapped session key with MAC
//! - [`KeyWrapParams`] / [`KeyWrap`] - wrap under a shared key
//! - [`TransportParameters`] / [`KeyTransportMessage`] - wrap under an
//!   ephemeral key agreement
//! - [`SessionKey`] - the recovered key

mod algorithm_identifier;
mod cipher_params;
mod encrypted_key;
mod key_wrap;
mod public_key;
mod session_key;
mod transport;

pub use algorithm_identifier::{
    AlgorithmIdentifier, AlgorithmParameters, AlgorithmRegistry, ParamSetRole, ParameterShape,
};
pub use cipher_params::Gost28147Params;
pub use encrypted_key::{EncryptedKey, ENCRYPTED_KEY_LEN, MAX_MAC_LEN};
pub use key_wrap::{KeyWrap, KeyWrapParams, UKM_LEN};
pub use public_key::{KeyExchangeParameters, PublicKeyParams, PublicKeyValue, SubjectPublicKeyInfo};
pub use session_key::{SessionKey, SESSION_KEY_LEN};
pub use transport::{KeyTransportMessage, TransportParameters};
