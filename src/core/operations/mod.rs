//! Key-exchange operations.
//!
//! - [`provider`] - Traits the native cryptographic provider implements
//! - [`KeyExchangeFormatter`] - Sender side: wraps a session key
//! - [`KeyExchangeDeformatter`] - Recipient side: recovers a session key

mod deformatter;
mod formatter;
pub mod provider;

#[cfg(test)]
pub(crate) mod mock;

pub use deformatter::KeyExchangeDeformatter;
pub use formatter::KeyExchangeFormatter;
pub use provider::{KeyExchangeProvider, PrivateKeyHandle, SharedKeyProvider, WrappedKey};
