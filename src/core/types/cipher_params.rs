//! GOST 28147-89 cipher parameters.
//!
//! ```text
//! Gost28147-89-Parameters ::= SEQUENCE {
//!   iv                  OCTET STRING (SIZE (8)),
//!   encryptionParamSet  OBJECT IDENTIFIER
//! }
//! ```

use crate::core::ber::{BerReader, BerSequence, BerWriter, OpenExtension, Presence, Tag};
use crate::core::error::{GostError, GostResult};
use crate::core::family::CipherFamily;
use crate::core::oid::OidValue;

/// Parameters of the GOST 28147-89 cipher algorithm identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gost28147Params {
    iv: [u8; 8],
    encryption_param_set: OidValue,
    extension: OpenExtension,
}

impl Gost28147Params {
    /// Creates cipher parameters.
    #[must_use]
    pub fn new(iv: [u8; 8], encryption_param_set: OidValue) -> Self {
        Self {
            iv,
            encryption_param_set,
            extension: OpenExtension::new(),
        }
    }

    /// Returns the initialization vector.
    #[must_use]
    pub const fn iv(&self) -> &[u8; 8] {
        &self.iv
    }

    /// Returns the encryption parameter set.
    #[must_use]
    pub fn encryption_param_set(&self) -> &OidValue {
        &self.encryption_param_set
    }

    /// Returns the cipher the parameter set selects.
    #[must_use]
    pub fn cipher(&self) -> CipherFamily {
        CipherFamily::from_param_set(&self.encryption_param_set)
    }

    /// Returns unknown trailing elements captured on decode.
    #[must_use]
    pub fn extension(&self) -> &OpenExtension {
        &self.extension
    }
}

impl BerSequence for Gost28147Params {
    fn encode_fields(&self, writer: &mut BerWriter) -> GostResult<()> {
        self.extension.encode(writer);
        writer.write_oid(&self.encryption_param_set);
        writer.write_octet_string(&self.iv);
        Ok(())
    }

    fn decode_fields(reader: &mut BerReader<'_>) -> GostResult<Self> {
        let iv = reader
            .read_fixed::<8>(Tag::OCTET_STRING, Presence::Required("iv"), "iv", "8")?
            .ok_or(GostError::MissingRequiredElement("iv"))?;
        let encryption_param_set = reader.read_oid("encryptionParamSet")?;
        let extension = reader.read_extension()?;
        Ok(Self {
            iv,
            encryption_param_set,
            extension,
        })
    }
}
