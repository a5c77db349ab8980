//! GOST public-key structures.
//!
//! ```text
//! PublicKeyParams ::= SEQUENCE {
//!   publicKeyParamSet   OBJECT IDENTIFIER,
//!   digestParamSet      OBJECT IDENTIFIER,
//!   encryptionParamSet  OBJECT IDENTIFIER OPTIONAL
//! }
//!
//! SubjectPublicKeyInfo ::= SEQUENCE {
//!   algorithm         AlgorithmIdentifier,
//!   subjectPublicKey  BIT STRING
//! }
//! ```
//!
//! For GOST keys the BIT STRING holds a DER OCTET STRING with the raw
//! public key, whose length is fixed by the algorithm family.

use core::fmt::{self, Debug};

use crate::core::ber::{BerReader, BerSequence, BerWriter, OpenExtension, Tag};
use crate::core::error::{GostError, GostResult};
use crate::core::family::AlgorithmFamily;
use crate::core::oid::OidValue;
use crate::core::types::algorithm_identifier::{
    AlgorithmIdentifier, AlgorithmParameters, AlgorithmRegistry, ParamSetRole,
};

// =============================================================================
// PublicKeyParams
// =============================================================================

/// Parameter sets bound to a GOST public key.
///
/// The three OIDs are ordered. Decoding checks each known OID against the
/// slot it appears in and rejects one that belongs elsewhere, so swapped
/// parameter sets are a structural error rather than silently accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyParams {
    public_key_param_set: OidValue,
    digest_param_set: OidValue,
    encryption_param_set: Option<OidValue>,
    extension: OpenExtension,
}

impl PublicKeyParams {
    /// Creates parameters without an encryption parameter set.
    #[must_use]
    pub fn new(public_key_param_set: OidValue, digest_param_set: OidValue) -> Self {
        Self {
            public_key_param_set,
            digest_param_set,
            encryption_param_set: None,
            extension: OpenExtension::new(),
        }
    }

    /// Sets the encryption parameter set.
    #[must_use]
    pub fn with_encryption_param_set(mut self, oid: OidValue) -> Self {
        self.encryption_param_set = Some(oid);
        self
    }

    /// Returns the public-key parameter set.
    #[must_use]
    pub fn public_key_param_set(&self) -> &OidValue {
        &self.public_key_param_set
    }

    /// Returns the digest parameter set.
    #[must_use]
    pub fn digest_param_set(&self) -> &OidValue {
        &self.digest_param_set
    }

    /// Returns the encryption parameter set, if present.
    #[must_use]
    pub fn encryption_param_set(&self) -> Option<&OidValue> {
        self.encryption_param_set.as_ref()
    }

    /// Returns unknown trailing elements captured on decode.
    #[must_use]
    pub fn extension(&self) -> &OpenExtension {
        &self.extension
    }

    /// Decodes a standalone SEQUENCE, checking slots against `registry`.
    ///
    /// # Errors
    ///
    /// Returns a decode error or `GostError::OutOfOrderElement`.
    pub fn from_ber_with(bytes: &[u8], registry: &AlgorithmRegistry) -> GostResult<Self> {
        let mut reader = BerReader::new(bytes);
        let mut inner = reader.read_sequence("PublicKeyParams")?;
        let params = Self::decode_fields_with(&mut inner, registry)?;
        inner.finish()?;
        reader.finish()?;
        Ok(params)
    }

    fn decode_fields_with(
        reader: &mut BerReader<'_>,
        registry: &AlgorithmRegistry,
    ) -> GostResult<Self> {
        let public_key_param_set = read_slot(
            reader,
            registry,
            "publicKeyParamSet",
            ParamSetRole::PublicKey,
        )?;
        let digest_param_set = read_slot(reader, registry, "digestParamSet", ParamSetRole::Digest)?;
        let encryption_param_set = if reader.peek_tag()? == Some(Tag::OBJECT_IDENTIFIER) {
            Some(read_slot(
                reader,
                registry,
                "encryptionParamSet",
                ParamSetRole::Encryption,
            )?)
        } else {
            None
        };
        let extension = reader.read_extension()?;
        Ok(Self {
            public_key_param_set,
            digest_param_set,
            encryption_param_set,
            extension,
        })
    }
}

// Reads one OID slot; a known OID registered for another slot is out of order.
fn read_slot(
    reader: &mut BerReader<'_>,
    registry: &AlgorithmRegistry,
    name: &'static str,
    role: ParamSetRole,
) -> GostResult<OidValue> {
    let oid = reader.read_oid(name)?;
    match registry.param_set_role(&oid) {
        Some(found) if found != role => Err(GostError::OutOfOrderElement(name)),
        _ => Ok(oid),
    }
}

impl BerSequence for PublicKeyParams {
    fn encode_fields(&self, writer: &mut BerWriter) -> GostResult<()> {
        self.extension.encode(writer);
        if let Some(oid) = &self.encryption_param_set {
            writer.write_oid(oid);
        }
        writer.write_oid(&self.digest_param_set);
        writer.write_oid(&self.public_key_param_set);
        Ok(())
    }

    fn decode_fields(reader: &mut BerReader<'_>) -> GostResult<Self> {
        Self::decode_fields_with(reader, AlgorithmRegistry::global())
    }
}

// =============================================================================
// PublicKeyValue
// =============================================================================

/// A raw GOST public key whose length matches its family.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKeyValue {
    family: AlgorithmFamily,
    bytes: Vec<u8>,
}

impl PublicKeyValue {
    /// Creates a public key value for `family`.
    ///
    /// # Errors
    ///
    /// Returns `GostError::FixedLengthViolation` if the length is not the
    /// family's public-key length.
    pub fn new(family: AlgorithmFamily, bytes: &[u8]) -> GostResult<Self> {
        if bytes.len() != family.public_key_len() {
            return Err(GostError::length(
                "publicKey",
                family.public_key_len_str(),
                bytes.len(),
            ));
        }
        Ok(Self {
            family,
            bytes: bytes.to_vec(),
        })
    }

    /// Returns the family this key belongs to.
    #[must_use]
    pub const fn family(&self) -> AlgorithmFamily {
        self.family
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for PublicKeyValue {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Debug for PublicKeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKeyValue")
            .field("family", &self.family)
            .field("len", &self.bytes.len())
            .finish()
    }
}

// =============================================================================
// SubjectPublicKeyInfo
// =============================================================================

/// An algorithm identifier with its public key bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo {
    algorithm: AlgorithmIdentifier,
    unused_bits: u8,
    subject_public_key: Vec<u8>,
    extension: OpenExtension,
}

impl SubjectPublicKeyInfo {
    /// Creates a key info from an algorithm and whole-octet key bits.
    #[must_use]
    pub fn new(algorithm: AlgorithmIdentifier, subject_public_key: Vec<u8>) -> Self {
        Self {
            algorithm,
            unused_bits: 0,
            subject_public_key,
            extension: OpenExtension::new(),
        }
    }

    /// Wraps a GOST public key under its family's key algorithm.
    #[must_use]
    pub fn for_gost_key(params: PublicKeyParams, key: &PublicKeyValue) -> Self {
        let algorithm = AlgorithmIdentifier::new(
            OidValue::from(key.family().key_algorithm()),
            AlgorithmParameters::PublicKey(params),
        );
        let mut writer = BerWriter::new();
        writer.write_octet_string(key.as_bytes());
        Self::new(algorithm, writer.into_bytes())
    }

    /// Returns the algorithm identifier.
    #[must_use]
    pub fn algorithm(&self) -> &AlgorithmIdentifier {
        &self.algorithm
    }

    /// Returns the number of unused bits in the last key octet.
    #[must_use]
    pub const fn unused_bits(&self) -> u8 {
        self.unused_bits
    }

    /// Returns the key bits as carried in the BIT STRING.
    #[must_use]
    pub fn subject_public_key(&self) -> &[u8] {
        &self.subject_public_key
    }

    /// Returns unknown trailing elements captured on decode.
    #[must_use]
    pub fn extension(&self) -> &OpenExtension {
        &self.extension
    }

    /// Returns the family named by the algorithm OID, if it is a GOST key.
    #[must_use]
    pub fn family(&self) -> Option<AlgorithmFamily> {
        AlgorithmFamily::from_algorithm(self.algorithm.algorithm())
    }

    /// Extracts the GOST public key from the BIT STRING.
    ///
    /// # Errors
    ///
    /// Returns `GostError::UnsupportedOid` for a non-GOST algorithm, a
    /// decode error if the bits are not an OCTET STRING, or
    /// `GostError::FixedLengthViolation` for a wrong key length.
    pub fn gost_public_key(&self) -> GostResult<PublicKeyValue> {
        let family = self
            .family()
            .ok_or_else(|| GostError::UnsupportedOid(self.algorithm.algorithm().to_string()))?;
        if self.unused_bits != 0 {
            return Err(GostError::MalformedLength);
        }
        let mut reader = BerReader::new(&self.subject_public_key);
        let key = reader.read_octet_string("publicKey")?;
        reader.finish()?;
        PublicKeyValue::new(family, key)
    }

    /// GOST keys must carry the family's key length. Other algorithms stay
    /// opaque.
    fn check_gost_key(&self) -> GostResult<()> {
        if self.family().is_some() {
            self.gost_public_key()?;
        }
        Ok(())
    }
}

impl BerSequence for SubjectPublicKeyInfo {
    fn encode_fields(&self, writer: &mut BerWriter) -> GostResult<()> {
        self.check_gost_key()?;
        self.extension.encode(writer);
        writer.write_bit_string(self.unused_bits, &self.subject_public_key);
        self.algorithm.encode_ber(writer)?;
        Ok(())
    }

    fn decode_fields(reader: &mut BerReader<'_>) -> GostResult<Self> {
        let algorithm = AlgorithmIdentifier::decode_ber(reader, "algorithm")?;
        let (unused_bits, bits) = reader.read_bit_string("subjectPublicKey")?;
        let extension = reader.read_extension()?;
        let spki = Self {
            algorithm,
            unused_bits,
            subject_public_key: bits.to_vec(),
            extension,
        };
        spki.check_gost_key()?;
        Ok(spki)
    }
}

// =============================================================================
// KeyExchangeParameters
// =============================================================================

/// A recipient's public key together with its parameter sets.
///
/// This is what the formatter needs to address a key transport: the
/// family, the parameter sets to generate the ephemeral key under, and the
/// key to agree with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyExchangeParameters {
    params: PublicKeyParams,
    public_key: PublicKeyValue,
}

impl KeyExchangeParameters {
    /// Creates recipient parameters.
    #[must_use]
    pub fn new(params: PublicKeyParams, public_key: PublicKeyValue) -> Self {
        Self { params, public_key }
    }

    /// Returns the algorithm family.
    #[must_use]
    pub const fn family(&self) -> AlgorithmFamily {
        self.public_key.family()
    }

    /// Returns the parameter sets.
    #[must_use]
    pub fn params(&self) -> &PublicKeyParams {
        &self.params
    }

    /// Returns the public key.
    #[must_use]
    pub fn public_key(&self) -> &PublicKeyValue {
        &self.public_key
    }

    /// Converts to a `SubjectPublicKeyInfo`.
    #[must_use]
    pub fn to_spki(&self) -> SubjectPublicKeyInfo {
        SubjectPublicKeyInfo::for_gost_key(self.params.clone(), &self.public_key)
    }

    /// Extracts recipient parameters from a `SubjectPublicKeyInfo`.
    ///
    /// # Errors
    ///
    /// Returns `GostError::UnsupportedOid` for a non-GOST algorithm,
    /// `GostError::MissingRequiredElement` if the public-key parameters are
    /// absent, or the errors of [`SubjectPublicKeyInfo::gost_public_key`].
    pub fn from_spki(spki: &SubjectPublicKeyInfo) -> GostResult<Self> {
        let AlgorithmParameters::PublicKey(params) = spki.algorithm().parameters() else {
            if spki.family().is_none() {
                return Err(GostError::UnsupportedOid(
                    spki.algorithm().algorithm().to_string(),
                ));
            }
            return Err(GostError::MissingRequiredElement("publicKeyParameters"));
        };
        let public_key = spki.gost_public_key()?;
        Ok(Self::new(params.clone(), public_key))
    }

    /// Decodes recipient parameters from an encoded `SubjectPublicKeyInfo`.
    ///
    /// # Errors
    ///
    /// Returns a decode error or any error of [`Self::from_spki`].
    pub fn from_spki_der(bytes: &[u8]) -> GostResult<Self> {
        Self::from_spki(&SubjectPublicKeyInfo::from_ber(bytes)?)
    }
}
