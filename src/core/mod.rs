//! Core GOST key-transport types and operations.
//!
//! - [`ber`] - BER reader and writer for the key-transport structures
//! - [`config`] - Settings both ends agree on out of band
//! - [`error`] - Error types
//! - [`family`] - Algorithm, cipher and wrap-variant enumerations
//! - [`oid`] - Object identifiers and the known GOST OIDs
//! - [`types`] - ASN.1 structures (`EncryptedKey`, `KeyTransportMessage`, ...)
//! - [`operations`] - Formatter, deformatter and provider traits

pub mod ber;
pub mod config;
pub mod error;
pub mod family;
pub mod oid;
pub mod operations;
pub mod types;

// Re-export commonly used items
pub use error::{GostError, GostResult};
pub use family::{AlgorithmFamily, CipherFamily, WrapVariant};
