//! GOST algorithm families and related selectors.
//!
//! Every key-transport structure is shaped by one of four algorithm
//! families. A family binds the key-algorithm OID, the key-agreement OID,
//! the signature OID, the digest it pairs with, and the length of its
//! public key. The structures themselves are written once and driven by
//! these constants.

use core::fmt::{self, Display};

use crate::core::oid::{known, ObjectIdentifier, OidValue};

/// One of the four GOST R 34.10 algorithm families.
///
/// The family is never written to the wire directly; it is implied by the
/// algorithm OID of the embedded `SubjectPublicKeyInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    /// GOST R 34.10-94 with GOST R 34.11-94.
    Gost94,
    /// GOST R 34.10-2001 with GOST R 34.11-94.
    Gost2001,
    /// GOST R 34.10-2012 with a 256-bit key and GOST R 34.11-2012 (256).
    Gost2012_256,
    /// GOST R 34.10-2012 with a 512-bit key and GOST R 34.11-2012 (512).
    Gost2012_512,
}

impl AlgorithmFamily {
    /// All families, in historical order.
    pub const ALL: [Self; 4] = [
        Self::Gost94,
        Self::Gost2001,
        Self::Gost2012_256,
        Self::Gost2012_512,
    ];

    /// Public-key algorithm OID (the `SubjectPublicKeyInfo` algorithm).
    #[must_use]
    pub const fn key_algorithm(self) -> ObjectIdentifier {
        match self {
            Self::Gost94 => known::GOST_R3410_94,
            Self::Gost2001 => known::GOST_R3410_2001,
            Self::Gost2012_256 => known::GOST_R3410_2012_256,
            Self::Gost2012_512 => known::GOST_R3410_2012_512,
        }
    }

    /// Key-agreement (Diffie-Hellman) algorithm OID.
    #[must_use]
    pub const fn dh_algorithm(self) -> ObjectIdentifier {
        match self {
            Self::Gost94 => known::GOST_R3410_94_DH,
            Self::Gost2001 => known::GOST_R3410_2001_DH,
            Self::Gost2012_256 => known::GOST_R3410_2012_256_DH,
            Self::Gost2012_512 => known::GOST_R3410_2012_512_DH,
        }
    }

    /// Signature algorithm OID (hash paired with the family's key).
    #[must_use]
    pub const fn signature_algorithm(self) -> ObjectIdentifier {
        match self {
            Self::Gost94 => known::GOST_R3411_94_WITH_R3410_94,
            Self::Gost2001 => known::GOST_R3411_94_WITH_R3410_2001,
            Self::Gost2012_256 => known::GOST_R3411_2012_256_WITH_R3410_2012_256,
            Self::Gost2012_512 => known::GOST_R3411_2012_512_WITH_R3410_2012_512,
        }
    }

    /// Digest algorithm OID the family pairs with.
    #[must_use]
    pub const fn digest_algorithm(self) -> ObjectIdentifier {
        match self {
            Self::Gost94 | Self::Gost2001 => known::GOST_R3411_94,
            Self::Gost2012_256 => known::GOST_R3411_2012_256,
            Self::Gost2012_512 => known::GOST_R3411_2012_512,
        }
    }

    /// Length in bytes of the family's public key value.
    #[must_use]
    pub const fn public_key_len(self) -> usize {
        match self {
            Self::Gost94 | Self::Gost2001 | Self::Gost2012_256 => 64,
            Self::Gost2012_512 => 128,
        }
    }

    /// Human-readable expected public key length, for error reporting.
    pub(crate) const fn public_key_len_str(self) -> &'static str {
        match self {
            Self::Gost94 | Self::Gost2001 | Self::Gost2012_256 => "64",
            Self::Gost2012_512 => "128",
        }
    }

    /// Encryption parameter set used when neither the caller nor the
    /// recipient names one.
    #[must_use]
    pub const fn default_encryption_param_set(self) -> ObjectIdentifier {
        match self {
            Self::Gost94 | Self::Gost2001 => known::GOST_28147_89_CRYPTOPRO_A_PARAMSET,
            Self::Gost2012_256 | Self::Gost2012_512 => known::GOST_28147_89_TC26_Z_PARAMSET,
        }
    }

    /// Looks up the family that owns `oid` as its key or key-agreement algorithm.
    #[must_use]
    pub fn from_algorithm(oid: &OidValue) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| oid.is(family.key_algorithm()) || oid.is(family.dh_algorithm()))
    }

    /// Returns the display name of the family.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gost94 => "GOST R 34.10-94",
            Self::Gost2001 => "GOST R 34.10-2001",
            Self::Gost2012_256 => "GOST R 34.10-2012 (256)",
            Self::Gost2012_512 => "GOST R 34.10-2012 (512)",
        }
    }
}

impl Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Block cipher a recovered session key is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherFamily {
    /// GOST 28147-89.
    Gost28147,
    /// GOST R 34.12-2015 64-bit block cipher (Magma).
    Magma,
    /// GOST R 34.12-2015 128-bit block cipher (Kuznyechik).
    Kuznyechik,
}

impl CipherFamily {
    /// Infers the cipher family from an encryption parameter set OID.
    ///
    /// Magma and Kuznyechik cipher or key-wrap arcs select the newer
    /// ciphers; every other parameter set denotes GOST 28147-89.
    #[must_use]
    pub fn from_param_set(oid: &OidValue) -> Self {
        if oid.starts_with(known::MAGMA) || oid.starts_with(known::MAGMA_KEY_WRAP) {
            Self::Magma
        } else if oid.starts_with(known::KUZNYECHIK) || oid.starts_with(known::KUZNYECHIK_KEY_WRAP)
        {
            Self::Kuznyechik
        } else {
            Self::Gost28147
        }
    }
}

impl Display for CipherFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gost28147 => "GOST 28147-89",
            Self::Magma => "Magma",
            Self::Kuznyechik => "Kuznyechik",
        })
    }
}

/// Key-derivation variant the provider uses to turn the agreed secret
/// into a key-encryption key.
///
/// The variant is not written to the wire. Sender and recipient must agree
/// on it out of band; a mismatch surfaces as a key-recovery failure.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapVariant {
    /// Simple export: the agreed key is used directly.
    #[default]
    Simple,
    /// Provider-specific key diversification (CryptoPro style).
    ProviderSpecific,
    /// Standards-track export defined by TC 26.
    Tk26,
}

impl Display for WrapVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simple => "simple",
            Self::ProviderSpecific => "provider-specific",
            Self::Tk26 => "tk26",
        })
    }
}
