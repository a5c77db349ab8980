//! Wrapped session key.
//!
//! ```text
//! EncryptedKey ::= SEQUENCE {
//!   encryptedKey       OCTET STRING (SIZE (32)),
//!   maskKey       [0]  IMPLICIT OCTET STRING (SIZE (32)) OPTIONAL,
//!   macKey             OCTET STRING (SIZE (1..4))
//! }
//! ```
//!
//! The writer emits `macKey` first, then `maskKey`, then `encryptedKey`.
//! Since every field is prepended, the octets on the wire follow the
//! declaration order above.

use crate::core::ber::{BerReader, BerSequence, BerWriter, OpenExtension, Presence, Tag};
use crate::core::error::{GostError, GostResult};

/// Size of a wrapped GOST 28147-89 key.
pub const ENCRYPTED_KEY_LEN: usize = 32;

/// Maximum MAC length.
pub const MAX_MAC_LEN: usize = 4;

const MASK_KEY_TAG: Tag = Tag::context(0, false);

/// A session key encrypted under a key-encryption key, with its MAC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedKey {
    encrypted_key: [u8; ENCRYPTED_KEY_LEN],
    mask_key: Option<[u8; ENCRYPTED_KEY_LEN]>,
    mac: Vec<u8>,
    extension: OpenExtension,
}

fn check_mac(mac: &[u8]) -> GostResult<()> {
    if mac.is_empty() || mac.len() > MAX_MAC_LEN {
        return Err(GostError::length("macKey", "1..=4", mac.len()));
    }
    Ok(())
}

impl EncryptedKey {
    /// Creates a wrapped key.
    ///
    /// # Errors
    ///
    /// Returns `GostError::FixedLengthViolation` if `mac` is empty or
    /// longer than four bytes.
    pub fn new(encrypted_key: [u8; ENCRYPTED_KEY_LEN], mac: &[u8]) -> GostResult<Self> {
        check_mac(mac)?;
        Ok(Self {
            encrypted_key,
            mask_key: None,
            mac: mac.to_vec(),
            extension: OpenExtension::new(),
        })
    }

    /// Creates a wrapped key from slices, checking both lengths.
    ///
    /// # Errors
    ///
    /// Returns `GostError::FixedLengthViolation` if the key is not 32 bytes
    /// or the MAC is not 1 to 4 bytes.
    pub fn from_slices(encrypted_key: &[u8], mac: &[u8]) -> GostResult<Self> {
        let key: [u8; ENCRYPTED_KEY_LEN] = encrypted_key
            .try_into()
            .map_err(|_| GostError::length("encryptedKey", "32", encrypted_key.len()))?;
        Self::new(key, mac)
    }

    /// Adds a mask key.
    #[must_use]
    pub fn with_mask_key(mut self, mask_key: [u8; ENCRYPTED_KEY_LEN]) -> Self {
        self.mask_key = Some(mask_key);
        self
    }

    /// Returns the encrypted key.
    #[must_use]
    pub const fn encrypted_key(&self) -> &[u8; ENCRYPTED_KEY_LEN] {
        &self.encrypted_key
    }

    /// Returns the mask key, if present.
    #[must_use]
    pub const fn mask_key(&self) -> Option<&[u8; ENCRYPTED_KEY_LEN]> {
        self.mask_key.as_ref()
    }

    /// Returns the MAC.
    #[must_use]
    pub fn mac(&self) -> &[u8] {
        &self.mac
    }

    /// Returns unknown trailing elements captured on decode.
    #[must_use]
    pub fn extension(&self) -> &OpenExtension {
        &self.extension
    }
}

impl BerSequence for EncryptedKey {
    fn encode_fields(&self, writer: &mut BerWriter) -> GostResult<()> {
        check_mac(&self.mac)?;
        self.extension.encode(writer);
        writer.write_octet_string(&self.mac);
        if let Some(mask) = &self.mask_key {
            writer.write_primitive(MASK_KEY_TAG, mask);
        }
        writer.write_octet_string(&self.encrypted_key);
        Ok(())
    }

    fn decode_fields(reader: &mut BerReader<'_>) -> GostResult<Self> {
        let encrypted_key = reader
            .read_fixed::<ENCRYPTED_KEY_LEN>(
                Tag::OCTET_STRING,
                Presence::Required("encryptedKey"),
                "encryptedKey",
                "32",
            )?
            .ok_or(GostError::MissingRequiredElement("encryptedKey"))?;
        let mask_key = reader.read_fixed::<ENCRYPTED_KEY_LEN>(
            MASK_KEY_TAG,
            Presence::Optional,
            "maskKey",
            "32",
        )?;
        let mac = reader.read_octet_string("macKey")?;
        check_mac(mac)?;
        let extension = reader.read_extension()?;
        Ok(Self {
            encrypted_key,
            mask_key,
            mac: mac.to_vec(),
            extension,
        })
    }
}
