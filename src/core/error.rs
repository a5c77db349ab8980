//! Error types for GOST key-exchange operations.
//!
//! This module provides a unified error type for the BER codec, the
//! key-transport structures and the formatter/deformatter. Key-recovery
//! errors are intentionally vague so that MAC verification cannot be used
//! as a decryption oracle.

use thiserror::Error;

use crate::core::family::AlgorithmFamily;

/// Error raised by a key-exchange provider, carried through unchanged.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while encoding, decoding or running a key exchange.
#[derive(Debug, Error)]
pub enum GostError {
    /// The identifier octets of an element are truncated or malformed.
    #[error("Malformed BER tag")]
    MalformedTag,

    /// The length octets are truncated, indefinite, or overrun the enclosing data.
    #[error("Malformed BER length")]
    MalformedLength,

    /// A mandatory element is absent or carries an unexpected tag.
    #[error("Missing required element: {0}")]
    MissingRequiredElement(&'static str),

    /// An element appears in a position reserved for a different element.
    #[error("Element out of order: {0}")]
    OutOfOrderElement(&'static str),

    /// A fixed-size field has the wrong length.
    #[error("Invalid length for {field}: expected {expected}, got {actual}")]
    FixedLengthViolation {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable expected size (e.g. "8" or "1..=4").
        expected: &'static str,
        /// Actual size found.
        actual: usize,
    },

    /// The embedded algorithm does not belong to the expected family.
    #[error("Wrong algorithm family: expected {expected}, found {found}")]
    WrongAlgorithmFamily {
        /// Family the caller expected.
        expected: AlgorithmFamily,
        /// Algorithm OID (or family) that was actually found.
        found: String,
    },

    /// Parameters of a known algorithm do not decode as the registered shape.
    #[error("Parameters for {oid} do not match the registered shape")]
    ParameterShapeMismatch {
        /// Algorithm OID whose parameters were rejected.
        oid: String,
        /// Decode error raised by the registered shape.
        #[source]
        source: Box<GostError>,
    },

    /// An OID is not supported in this position.
    #[error("Unsupported OID: {0}")]
    UnsupportedOid(String),

    /// The content octets of an OBJECT IDENTIFIER are invalid.
    #[error("Malformed object identifier")]
    MalformedOid,

    /// Bytes remain after a complete top-level structure.
    #[error("Trailing data after encoded structure")]
    TrailingData,

    /// The session key handed to the formatter is empty.
    #[error("Session key must not be empty")]
    EmptySessionKey,

    /// The message carries a mask key, which the provider seam cannot unwrap.
    #[error("Masked session keys are not supported")]
    UnsupportedMaskedKey,

    /// Key recovery failed (bad MAC, wrong key, corrupted ciphertext).
    /// Intentionally vague for security.
    #[error("Key recovery failed")]
    KeyRecoveryFailed,

    /// Base64 decoding error.
    #[error("Base64 decode error: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The key-exchange provider reported a failure.
    #[error("Key exchange provider failure: {0}")]
    Provider(#[source] ProviderError),
}

/// Result type alias for GOST key-exchange operations.
pub type GostResult<T> = Result<T, GostError>;

/// Failure reported by a provider while unwrapping a session key.
#[derive(Debug, Error)]
pub enum UnwrapError {
    /// The recomputed MAC does not match the transported one.
    #[error("MAC mismatch")]
    MacMismatch,

    /// Any other provider failure (token unavailable, handle invalid, ...).
    #[error(transparent)]
    Provider(ProviderError),
}

impl GostError {
    /// Shorthand for a fixed-length violation.
    pub(crate) fn length(field: &'static str, expected: &'static str, actual: usize) -> Self {
        Self::FixedLengthViolation {
            field,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = GostError::MalformedTag;
        assert_eq!(err.to_string(), "Malformed BER tag");

        let err = GostError::MalformedLength;
        assert_eq!(err.to_string(), "Malformed BER length");

        let err = GostError::MissingRequiredElement("ukm");
        assert_eq!(err.to_string(), "Missing required element: ukm");

        let err = GostError::length("ukm", "8", 7);
        assert_eq!(err.to_string(), "Invalid length for ukm: expected 8, got 7");

        let err = GostError::WrongAlgorithmFamily {
            expected: AlgorithmFamily::Gost2012_256,
            found: "1.2.643.2.2.19".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Wrong algorithm family: expected GOST R 34.10-2012 (256), found 1.2.643.2.2.19"
        );

        let err = GostError::KeyRecoveryFailed;
        assert_eq!(err.to_string(), "Key recovery failed");
    }

    #[test]
    fn test_shape_mismatch_keeps_cause() {
        let err = GostError::ParameterShapeMismatch {
            oid: "1.2.643.2.2.21".to_string(),
            source: Box::new(GostError::MissingRequiredElement("iv")),
        };
        assert_eq!(
            err.to_string(),
            "Parameters for 1.2.643.2.2.21 do not match the registered shape"
        );
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("Missing required element: iv"));
    }

    #[test]
    fn test_provider_error_is_source() {
        let inner: ProviderError = "token removed".into();
        let err = GostError::Provider(inner);
        assert_eq!(err.to_string(), "Key exchange provider failure: token removed");
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("token removed"));
    }

    #[test]
    fn test_unwrap_error_display() {
        assert_eq!(UnwrapError::MacMismatch.to_string(), "MAC mismatch");
        let err = UnwrapError::Provider("busy".into());
        assert_eq!(err.to_string(), "busy");
    }

    #[test]
    fn test_error_debug() {
        let err = GostError::TrailingData;
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("TrailingData"));
    }
}
