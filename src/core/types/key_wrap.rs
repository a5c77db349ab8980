//! Key wrap under an already agreed key.
//!
//! ```text
//! KeyWrapParams ::= SEQUENCE {
//!   encryptionParamSet  OBJECT IDENTIFIER,
//!   ukm                 OCTET STRING (SIZE (8)) OPTIONAL
//! }
//!
//! KeyWrap ::= SEQUENCE {
//!   encryptedKey  EncryptedKey,
//!   wrapParams    KeyWrapParams
//! }
//! ```

use crate::core::ber::{BerReader, BerSequence, BerWriter, OpenExtension, Presence, Tag};
use crate::core::error::GostResult;
use crate::core::family::CipherFamily;
use crate::core::oid::OidValue;
use crate::core::types::encrypted_key::EncryptedKey;

/// Length of user keying material.
pub const UKM_LEN: usize = 8;

// =============================================================================
// KeyWrapParams
// =============================================================================

/// Parameters of a key wrap: the cipher parameter set and optional UKM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyWrapParams {
    encryption_param_set: OidValue,
    ukm: Option<[u8; UKM_LEN]>,
    extension: OpenExtension,
}

impl KeyWrapParams {
    /// Creates wrap parameters.
    #[must_use]
    pub fn new(encryption_param_set: OidValue, ukm: Option<[u8; UKM_LEN]>) -> Self {
        Self {
            encryption_param_set,
            ukm,
            extension: OpenExtension::new(),
        }
    }

    /// Returns the encryption parameter set.
    #[must_use]
    pub fn encryption_param_set(&self) -> &OidValue {
        &self.encryption_param_set
    }

    /// Returns the UKM, if present.
    #[must_use]
    pub const fn ukm(&self) -> Option<&[u8; UKM_LEN]> {
        self.ukm.as_ref()
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

impl BerSequence for KeyWrapParams {
    fn encode_fields(&self, writer: &mut BerWriter) -> GostResult<()> {
        self.extension.encode(writer);
        if let Some(ukm) = &self.ukm {
            writer.write_octet_string(ukm);
        }
        writer.write_oid(&self.encryption_param_set);
        Ok(())
    }

    fn decode_fields(reader: &mut BerReader<'_>) -> GostResult<Self> {
        let encryption_param_set = reader.read_oid("encryptionParamSet")?;
        let ukm = reader.read_fixed::<UKM_LEN>(Tag::OCTET_STRING, Presence::Optional, "ukm", "8")?;
        let extension = reader.read_extension()?;
        Ok(Self {
            encryption_param_set,
            ukm,
            extension,
        })
    }
}

// =============================================================================
// KeyWrap
// =============================================================================

/// A session key wrapped under a shared key-encryption key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyWrap {
    encrypted_key: EncryptedKey,
    wrap_params: KeyWrapParams,
    extension: OpenExtension,
}

impl KeyWrap {
    /// Creates a key wrap.
    #[must_use]
    pub fn new(encrypted_key: EncryptedKey, wrap_params: KeyWrapParams) -> Self {
        Self {
            encrypted_key,
            wrap_params,
            extension: OpenExtension::new(),
        }
    }

    /// Returns the wrapped key.
    #[must_use]
    pub fn encrypted_key(&self) -> &EncryptedKey {
        &self.encrypted_key
    }

    /// Returns the wrap parameters.
    #[must_use]
    pub fn wrap_params(&self) -> &KeyWrapParams {
        &self.wrap_params
    }

    /// Returns unknown trailing elements captured on decode.
    #[must_use]
    pub fn extension(&self) -> &OpenExtension {
        &self.extension
    }
}

impl BerSequence for KeyWrap {
    fn encode_fields(&self, writer: &mut BerWriter) -> GostResult<()> {
        self.extension.encode(writer);
        self.wrap_params.encode_ber(writer)?;
        self.encrypted_key.encode_ber(writer)?;
        Ok(())
    }

    fn decode_fields(reader: &mut BerReader<'_>) -> GostResult<Self> {
        let encrypted_key = EncryptedKey::decode_ber(reader, "encryptedKey")?;
        let wrap_params = KeyWrapParams::decode_ber(reader, "wrapParams")?;
        let extension = reader.read_extension()?;
        Ok(Self {
            encrypted_key,
            wrap_params,
            extension,
        })
    }
}
