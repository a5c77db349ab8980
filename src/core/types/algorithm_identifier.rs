//! `AlgorithmIdentifier` and the OID-to-parameter-shape resolver.
//!
//! One `AlgorithmIdentifier` structure carries every algorithm this crate
//! touches. Its `parameters` field is an open type: the resolver looks the
//! algorithm OID up in a read-only table and, when the table declares a
//! parameter shape, decodes the captured bytes as that shape.
//!
//! ```text
//! AlgorithmIdentifier ::= SEQUENCE {
//!   algorithm   OBJECT IDENTIFIER,
//!   parameters  ANY DEFINED BY algorithm OPTIONAL
//! }
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::trace;

use crate::core::ber::{BerReader, BerSequence, BerWriter, OpenExtension, Tag};
use crate::core::error::{GostError, GostResult};
use crate::core::family::AlgorithmFamily;
use crate::core::oid::{known, OidValue};
use crate::core::types::cipher_params::Gost28147Params;
use crate::core::types::public_key::PublicKeyParams;

// =============================================================================
// Parameter shapes
// =============================================================================

/// Shape the resolver expects for an algorithm's parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterShape {
    /// `PublicKeyParams` of the given family.
    PublicKey(AlgorithmFamily),
    /// `Gost28147-89-Parameters` (IV plus encryption parameter set).
    Gost28147,
    /// NULL or a digest parameter set OID.
    Digest,
}

/// Slot a parameter set OID belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSetRole {
    /// Elliptic-curve or DH group parameters.
    PublicKey,
    /// Hash function parameters.
    Digest,
    /// Block cipher S-box parameters.
    Encryption,
}

/// Decoded `parameters` of an `AlgorithmIdentifier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmParameters {
    /// The field is absent.
    Absent,
    /// An explicit NULL.
    Null,
    /// A bare parameter set OID (digest algorithms).
    ParamSet(OidValue),
    /// GOST public-key parameters.
    PublicKey(PublicKeyParams),
    /// GOST 28147-89 cipher parameters.
    Gost28147(Gost28147Params),
    /// A complete element the resolver has no shape for, kept verbatim.
    Opaque(Vec<u8>),
}

impl AlgorithmParameters {
    fn encode(&self, writer: &mut BerWriter) -> GostResult<()> {
        match self {
            Self::Absent => {}
            Self::Null => {
                writer.write_null();
            }
            Self::ParamSet(oid) => {
                writer.write_oid(oid);
            }
            Self::PublicKey(params) => {
                params.encode_ber(writer)?;
            }
            Self::Gost28147(params) => {
                params.encode_ber(writer)?;
            }
            Self::Opaque(raw) => {
                writer.write_raw(raw);
            }
        }
        Ok(())
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Read-only table mapping algorithm OIDs to parameter shapes, and
/// parameter set OIDs to the slot they belong in.
///
/// The table is built once by [`AlgorithmRegistry::standard`] and shared
/// through [`AlgorithmRegistry::global`]; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct AlgorithmRegistry {
    shapes: HashMap<OidValue, Option<ParameterShape>>,
    roles: HashMap<OidValue, ParamSetRole>,
}

static GLOBAL_REGISTRY: LazyLock<AlgorithmRegistry> = LazyLock::new(AlgorithmRegistry::standard);

impl AlgorithmRegistry {
    /// Builds the table of every algorithm and parameter set in [`known`].
    #[must_use]
    pub fn standard() -> Self {
        let mut shapes = HashMap::new();
        for family in AlgorithmFamily::ALL {
            let shape = Some(ParameterShape::PublicKey(family));
            shapes.insert(OidValue::from(family.key_algorithm()), shape);
            shapes.insert(OidValue::from(family.dh_algorithm()), shape);
            shapes.insert(OidValue::from(family.signature_algorithm()), None);
            shapes.insert(
                OidValue::from(family.digest_algorithm()),
                Some(ParameterShape::Digest),
            );
        }
        shapes.insert(
            OidValue::from(known::GOST_28147_89),
            Some(ParameterShape::Gost28147),
        );
        for cipher in [
            known::MAGMA,
            known::KUZNYECHIK,
            known::MAGMA_KEY_WRAP,
            known::KUZNYECHIK_KEY_WRAP,
        ] {
            shapes.insert(OidValue::from(cipher), None);
        }

        let mut roles = HashMap::new();
        let tables = [
            (known::PUBLIC_KEY_PARAM_SETS, ParamSetRole::PublicKey),
            (known::DIGEST_PARAM_SETS, ParamSetRole::Digest),
            (known::ENCRYPTION_PARAM_SETS, ParamSetRole::Encryption),
        ];
        for (oids, role) in tables {
            for &oid in oids {
                roles.insert(OidValue::from(oid), role);
            }
        }

        Self { shapes, roles }
    }

    /// Returns the process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_REGISTRY
    }

    /// Returns `true` if `oid` is a known algorithm, with or without a shape.
    #[must_use]
    pub fn is_known(&self, oid: &OidValue) -> bool {
        self.shapes.contains_key(oid)
    }

    /// Returns the parameter shape registered for `oid`, if any.
    #[must_use]
    pub fn shape(&self, oid: &OidValue) -> Option<ParameterShape> {
        self.shapes.get(oid).copied().flatten()
    }

    /// Returns the slot a parameter set OID belongs in, if it is known.
    #[must_use]
    pub fn param_set_role(&self, oid: &OidValue) -> Option<ParamSetRole> {
        self.roles.get(oid).copied()
    }

    /// Decodes `raw` (one complete element) as the shape registered for `algorithm`.
    ///
    /// Unknown algorithms and known algorithms without a shape keep the
    /// element as [`AlgorithmParameters::Opaque`].
    ///
    /// # Errors
    ///
    /// Returns `GostError::ParameterShapeMismatch` if the element does not
    /// decode as the registered shape.
    pub fn resolve(&self, algorithm: &OidValue, raw: &[u8]) -> GostResult<AlgorithmParameters> {
        let Some(shape) = self.shape(algorithm) else {
            trace!(
                algorithm = %algorithm,
                known = self.is_known(algorithm),
                "keeping algorithm parameters opaque"
            );
            return Ok(AlgorithmParameters::Opaque(raw.to_vec()));
        };

        let decoded = match shape {
            ParameterShape::PublicKey(_) => {
                PublicKeyParams::from_ber_with(raw, self).map(AlgorithmParameters::PublicKey)
            }
            ParameterShape::Gost28147 => {
                Gost28147Params::from_ber(raw).map(AlgorithmParameters::Gost28147)
            }
            ParameterShape::Digest => self.resolve_digest(raw),
        };
        decoded.map_err(|source| GostError::ParameterShapeMismatch {
            oid: algorithm.to_string(),
            source: Box::new(source),
        })
    }

    fn resolve_digest(&self, raw: &[u8]) -> GostResult<AlgorithmParameters> {
        let mut reader = BerReader::new(raw);
        let parameters = if reader.peek_tag()? == Some(Tag::NULL) {
            reader.read_null("parameters")?;
            AlgorithmParameters::Null
        } else {
            let oid = reader.read_oid("digestParamSet")?;
            if self.param_set_role(&oid) != Some(ParamSetRole::Digest) {
                return Err(GostError::UnsupportedOid(oid.to_string()));
            }
            AlgorithmParameters::ParamSet(oid)
        };
        reader.finish()?;
        Ok(parameters)
    }
}

// =============================================================================
// AlgorithmIdentifier
// =============================================================================

/// An algorithm OID with its resolved parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    algorithm: OidValue,
    parameters: AlgorithmParameters,
    extension: OpenExtension,
}

impl AlgorithmIdentifier {
    /// Creates an identifier with the given parameters.
    #[must_use]
    pub fn new(algorithm: OidValue, parameters: AlgorithmParameters) -> Self {
        Self {
            algorithm,
            parameters,
            extension: OpenExtension::new(),
        }
    }

    /// Creates an identifier whose parameters are absent.
    #[must_use]
    pub fn without_parameters(algorithm: OidValue) -> Self {
        Self::new(algorithm, AlgorithmParameters::Absent)
    }

    /// Returns the algorithm OID.
    #[must_use]
    pub fn algorithm(&self) -> &OidValue {
        &self.algorithm
    }

    /// Returns the resolved parameters.
    #[must_use]
    pub fn parameters(&self) -> &AlgorithmParameters {
        &self.parameters
    }

    /// Returns unknown trailing elements captured on decode.
    #[must_use]
    pub fn extension(&self) -> &OpenExtension {
        &self.extension
    }

    /// Decodes the SEQUENCE contents, resolving parameters against `registry`.
    ///
    /// # Errors
    ///
    /// Returns a decode error or `GostError::ParameterShapeMismatch`.
    pub fn decode_fields_with(
        reader: &mut BerReader<'_>,
        registry: &AlgorithmRegistry,
    ) -> GostResult<Self> {
        let algorithm = reader.read_oid("algorithm")?;
        let parameters = if reader.is_empty() {
            AlgorithmParameters::Absent
        } else {
            registry.resolve(&algorithm, reader.read_raw()?)?
        };
        let extension = reader.read_extension()?;
        Ok(Self {
            algorithm,
            parameters,
            extension,
        })
    }
}

impl BerSequence for AlgorithmIdentifier {
    fn encode_fields(&self, writer: &mut BerWriter) -> GostResult<()> {
        self.extension.encode(writer);
        self.parameters.encode(writer)?;
        writer.write_oid(&self.algorithm);
        Ok(())
    }

    fn decode_fields(reader: &mut BerReader<'_>) -> GostResult<Self> {
        Self::decode_fields_with(reader, AlgorithmRegistry::global())
    }
}
