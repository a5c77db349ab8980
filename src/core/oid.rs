//! Object identifiers.
//!
//! [`OidValue`] wraps a [`der::asn1::ObjectIdentifier`] together with its
//! dotted-decimal form. Equality compares arcs only. The [`known`] module
//! lists the GOST algorithm and parameter-set OIDs this crate understands.

use core::fmt::{self, Debug, Display};
use core::hash::{Hash, Hasher};
use core::str::FromStr;

pub use der::asn1::ObjectIdentifier;

use crate::core::error::{GostError, GostResult};

/// An ASN.1 OBJECT IDENTIFIER value.
#[derive(Clone)]
pub struct OidValue {
    oid: ObjectIdentifier,
    dotted: String,
}

impl OidValue {
    /// Creates an OID from its arcs.
    ///
    /// # Errors
    ///
    /// Returns `GostError::MalformedOid` if there are fewer than two arcs,
    /// the first arc exceeds 2, the second arc exceeds 39, or the encoding
    /// would not fit an [`ObjectIdentifier`].
    pub fn from_arcs(arcs: &[u32]) -> GostResult<Self> {
        if arcs.len() < 2 {
            return Err(GostError::MalformedOid);
        }
        let oid = ObjectIdentifier::from_arcs(arcs.iter().copied())
            .map_err(|_| GostError::MalformedOid)?;
        Ok(Self::from(oid))
    }

    /// Returns the underlying identifier.
    #[must_use]
    pub const fn object_identifier(&self) -> ObjectIdentifier {
        self.oid
    }

    /// Returns the arcs of this OID.
    pub fn arcs(&self) -> impl Iterator<Item = u32> + '_ {
        self.oid.arcs()
    }

    /// Returns the canonical dotted-decimal form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.dotted
    }

    /// Returns `true` if this OID is exactly `oid`.
    #[must_use]
    pub fn is(&self, oid: ObjectIdentifier) -> bool {
        self.oid == oid
    }

    /// Returns `true` if this OID equals `prefix` or lies underneath it.
    #[must_use]
    pub fn starts_with(&self, prefix: ObjectIdentifier) -> bool {
        let mut arcs = self.oid.arcs();
        prefix.arcs().all(|arc| arcs.next() == Some(arc))
    }

    /// Decodes BER content octets of an OBJECT IDENTIFIER.
    ///
    /// Subidentifiers must use the minimal number of base-128 groups.
    pub(crate) fn from_ber_content(content: &[u8]) -> GostResult<Self> {
        let mut group_start = true;
        for &byte in content {
            if group_start && byte == 0x80 {
                return Err(GostError::MalformedOid);
            }
            group_start = byte & 0x80 == 0;
        }
        if !group_start {
            return Err(GostError::MalformedOid);
        }
        let oid = ObjectIdentifier::from_bytes(content).map_err(|_| GostError::MalformedOid)?;
        Ok(Self::from(oid))
    }

    /// Returns the BER content octets of this OID.
    pub(crate) fn as_ber_content(&self) -> &[u8] {
        self.oid.as_bytes()
    }
}

impl From<ObjectIdentifier> for OidValue {
    fn from(oid: ObjectIdentifier) -> Self {
        Self {
            oid,
            dotted: oid.to_string(),
        }
    }
}

impl PartialEq for OidValue {
    fn eq(&self, other: &Self) -> bool {
        self.arcs().eq(other.arcs())
    }
}

impl Eq for OidValue {}

impl Hash for OidValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for arc in self.arcs() {
            arc.hash(state);
        }
    }
}

impl Display for OidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted)
    }
}

impl Debug for OidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OidValue({})", self.dotted)
    }
}

impl FromStr for OidValue {
    type Err = GostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let oid = s
            .parse::<ObjectIdentifier>()
            .map_err(|_| GostError::MalformedOid)?;
        if oid.arcs().count() < 2 {
            return Err(GostError::MalformedOid);
        }
        Ok(Self::from(oid))
    }
}

/// OIDs used by GOST key transport.
pub mod known {
    use super::ObjectIdentifier;

    // Public-key algorithms.
    /// GOST R 34.10-94 public key.
    pub const GOST_R3410_94: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.643.2.2.20");
    /// GOST R 34.10-2001 public key.
    pub const GOST_R3410_2001: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.643.2.2.19");
    /// GOST R 34.10-2012 public key, 256-bit.
    pub const GOST_R3410_2012_256: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.1.1.1");
    /// GOST R 34.10-2012 public key, 512-bit.
    pub const GOST_R3410_2012_512: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.1.1.2");

    // Key agreement.
    /// GOST R 34.10-94 Diffie-Hellman.
    pub const GOST_R3410_94_DH: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.643.2.2.99");
    /// GOST R 34.10-2001 Diffie-Hellman.
    pub const GOST_R3410_2001_DH: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.643.2.2.98");
    /// GOST R 34.10-2012 (256) key agreement.
    pub const GOST_R3410_2012_256_DH: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.1.6.1");
    /// GOST R 34.10-2012 (512) key agreement.
    pub const GOST_R3410_2012_512_DH: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.1.6.2");

    // Signatures.
    /// GOST R 34.11-94 with GOST R 34.10-94.
    pub const GOST_R3411_94_WITH_R3410_94: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.4");
    /// GOST R 34.11-94 with GOST R 34.10-2001.
    pub const GOST_R3411_94_WITH_R3410_2001: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.3");
    /// GOST R 34.11-2012 (256) with GOST R 34.10-2012 (256).
    pub const GOST_R3411_2012_256_WITH_R3410_2012_256: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.1.3.2");
    /// GOST R 34.11-2012 (512) with GOST R 34.10-2012 (512).
    pub const GOST_R3411_2012_512_WITH_R3410_2012_512: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.1.3.3");

    // Digests.
    /// GOST R 34.11-94.
    pub const GOST_R3411_94: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.643.2.2.9");
    /// GOST R 34.11-2012 (256), also used as its own digest parameter set.
    pub const GOST_R3411_2012_256: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.1.2.2");
    /// GOST R 34.11-2012 (512), also used as its own digest parameter set.
    pub const GOST_R3411_2012_512: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.1.2.3");

    // Symmetric ciphers.
    /// GOST 28147-89 encryption.
    pub const GOST_28147_89: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.643.2.2.21");
    /// GOST R 34.12-2015 Magma cipher arc.
    pub const MAGMA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.643.7.1.1.5.1");
    /// GOST R 34.12-2015 Kuznyechik cipher arc.
    pub const KUZNYECHIK: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.643.7.1.1.5.2");
    /// Magma key-wrap arc.
    pub const MAGMA_KEY_WRAP: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.643.7.1.1.7.1");
    /// Kuznyechik key-wrap arc.
    pub const KUZNYECHIK_KEY_WRAP: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.1.7.2");

    // GOST 28147-89 encryption parameter sets.
    /// Test parameter set.
    pub const GOST_28147_89_TEST_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.31.0");
    /// CryptoPro A.
    pub const GOST_28147_89_CRYPTOPRO_A_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.31.1");
    /// CryptoPro B.
    pub const GOST_28147_89_CRYPTOPRO_B_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.31.2");
    /// CryptoPro C.
    pub const GOST_28147_89_CRYPTOPRO_C_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.31.3");
    /// CryptoPro D.
    pub const GOST_28147_89_CRYPTOPRO_D_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.31.4");
    /// TC 26 Z.
    pub const GOST_28147_89_TC26_Z_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.2.5.1.1");

    // Digest parameter sets.
    /// GOST R 34.11-94 test parameter set.
    pub const GOST_R3411_94_TEST_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.30.0");
    /// GOST R 34.11-94 CryptoPro parameter set.
    pub const GOST_R3411_94_CRYPTOPRO_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.30.1");

    // GOST R 34.10-94 public-key parameter sets.
    /// CryptoPro A.
    pub const GOST_R3410_94_CRYPTOPRO_A_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.32.2");
    /// CryptoPro B.
    pub const GOST_R3410_94_CRYPTOPRO_B_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.32.3");
    /// CryptoPro C.
    pub const GOST_R3410_94_CRYPTOPRO_C_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.32.4");
    /// CryptoPro D.
    pub const GOST_R3410_94_CRYPTOPRO_D_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.32.5");
    /// CryptoPro XchA.
    pub const GOST_R3410_94_CRYPTOPRO_XCHA_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.33.1");
    /// CryptoPro XchB.
    pub const GOST_R3410_94_CRYPTOPRO_XCHB_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.33.2");
    /// CryptoPro XchC.
    pub const GOST_R3410_94_CRYPTOPRO_XCHC_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.33.3");

    // GOST R 34.10-2001 public-key parameter sets (also valid for 2012-256).
    /// CryptoPro A.
    pub const GOST_R3410_2001_CRYPTOPRO_A_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.35.1");
    /// CryptoPro B.
    pub const GOST_R3410_2001_CRYPTOPRO_B_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.35.2");
    /// CryptoPro C.
    pub const GOST_R3410_2001_CRYPTOPRO_C_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.35.3");
    /// CryptoPro XchA.
    pub const GOST_R3410_2001_CRYPTOPRO_XCHA_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.36.0");
    /// CryptoPro XchB.
    pub const GOST_R3410_2001_CRYPTOPRO_XCHB_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.2.2.36.1");

    // GOST R 34.10-2012 public-key parameter sets.
    /// TC 26 256-bit A.
    pub const GOST_R3410_2012_256_TC26_A_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.2.1.1.1");
    /// TC 26 256-bit B.
    pub const GOST_R3410_2012_256_TC26_B_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.2.1.1.2");
    /// TC 26 256-bit C.
    pub const GOST_R3410_2012_256_TC26_C_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.2.1.1.3");
    /// TC 26 256-bit D.
    pub const GOST_R3410_2012_256_TC26_D_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.2.1.1.4");
    /// TC 26 512-bit A.
    pub const GOST_R3410_2012_512_TC26_A_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.2.1.2.1");
    /// TC 26 512-bit B.
    pub const GOST_R3410_2012_512_TC26_B_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.2.1.2.2");
    /// TC 26 512-bit C.
    pub const GOST_R3410_2012_512_TC26_C_PARAMSET: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.643.7.1.2.1.2.3");

    /// Every public-key parameter set listed above.
    pub const PUBLIC_KEY_PARAM_SETS: &[ObjectIdentifier] = &[
        GOST_R3410_94_CRYPTOPRO_A_PARAMSET,
        GOST_R3410_94_CRYPTOPRO_B_PARAMSET,
        GOST_R3410_94_CRYPTOPRO_C_PARAMSET,
        GOST_R3410_94_CRYPTOPRO_D_PARAMSET,
        GOST_R3410_94_CRYPTOPRO_XCHA_PARAMSET,
        GOST_R3410_94_CRYPTOPRO_XCHB_PARAMSET,
        GOST_R3410_94_CRYPTOPRO_XCHC_PARAMSET,
        GOST_R3410_2001_CRYPTOPRO_A_PARAMSET,
        GOST_R3410_2001_CRYPTOPRO_B_PARAMSET,
        GOST_R3410_2001_CRYPTOPRO_C_PARAMSET,
        GOST_R3410_2001_CRYPTOPRO_XCHA_PARAMSET,
        GOST_R3410_2001_CRYPTOPRO_XCHB_PARAMSET,
        GOST_R3410_2012_256_TC26_A_PARAMSET,
        GOST_R3410_2012_256_TC26_B_PARAMSET,
        GOST_R3410_2012_256_TC26_C_PARAMSET,
        GOST_R3410_2012_256_TC26_D_PARAMSET,
        GOST_R3410_2012_512_TC26_A_PARAMSET,
        GOST_R3410_2012_512_TC26_B_PARAMSET,
        GOST_R3410_2012_512_TC26_C_PARAMSET,
    ];

    /// Every digest parameter set listed above.
    pub const DIGEST_PARAM_SETS: &[ObjectIdentifier] = &[
        GOST_R3411_94_TEST_PARAMSET,
        GOST_R3411_94_CRYPTOPRO_PARAMSET,
        GOST_R3411_2012_256,
        GOST_R3411_2012_512,
    ];

    /// Every encryption parameter set listed above.
    pub const ENCRYPTION_PARAM_SETS: &[ObjectIdentifier] = &[
        GOST_28147_89_TEST_PARAMSET,
        GOST_28147_89_CRYPTOPRO_A_PARAMSET,
        GOST_28147_89_CRYPTOPRO_B_PARAMSET,
        GOST_28147_89_CRYPTOPRO_C_PARAMSET,
        GOST_28147_89_CRYPTOPRO_D_PARAMSET,
        GOST_28147_89_TC26_Z_PARAMSET,
    ];
}
