//! Key-transport message.
//!
//! ```text
//! KeyTransportMessage ::= SEQUENCE {
//!   sessionEncryptedKey      EncryptedKey,
//!   transportParameters [0]  IMPLICIT TransportParameters OPTIONAL
//! }
//!
//! TransportParameters ::= SEQUENCE {
//!   encryptionParamSet       OBJECT IDENTIFIER,
//!   ephemeralPublicKey [0]   IMPLICIT SubjectPublicKeyInfo OPTIONAL,
//!   ukm                      OCTET STRING (SIZE (8))
//! }
//! ```
//!
//! A message without `transportParameters` is only meaningful when the
//! key-encryption key was agreed out of band.

use base64::prelude::*;

use crate::core::ber::{BerReader, BerSequence, BerWriter, OpenExtension, Presence, Tag};
use crate::core::error::{GostError, GostResult};
use crate::core::family::{AlgorithmFamily, CipherFamily};
use crate::core::oid::OidValue;
use crate::core::types::encrypted_key::EncryptedKey;
use crate::core::types::key_wrap::UKM_LEN;
use crate::core::types::public_key::{PublicKeyValue, SubjectPublicKeyInfo};

const EPHEMERAL_PUBLIC_KEY_TAG: Tag = Tag::context(0, true);
const TRANSPORT_PARAMETERS_TAG: Tag = Tag::context(0, true);

// =============================================================================
// TransportParameters
// =============================================================================

/// Sender-side inputs the recipient needs to repeat the key agreement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportParameters {
    encryption_param_set: OidValue,
    ephemeral_public_key: Option<SubjectPublicKeyInfo>,
    ukm: [u8; UKM_LEN],
    extension: OpenExtension,
}

impl TransportParameters {
    /// Creates transport parameters.
    #[must_use]
    pub fn new(
        encryption_param_set: OidValue,
        ephemeral_public_key: Option<SubjectPublicKeyInfo>,
        ukm: [u8; UKM_LEN],
    ) -> Self {
        Self {
            encryption_param_set,
            ephemeral_public_key,
            ukm,
            extension: OpenExtension::new(),
        }
    }

    /// Returns the encryption parameter set.
    #[must_use]
    pub fn encryption_param_set(&self) -> &OidValue {
        &self.encryption_param_set
    }

    /// Returns the sender's ephemeral public key, if present.
    #[must_use]
    pub fn ephemeral_public_key(&self) -> Option<&SubjectPublicKeyInfo> {
        self.ephemeral_public_key.as_ref()
    }

    /// Returns the UKM.
    #[must_use]
    pub const fn ukm(&self) -> &[u8; UKM_LEN] {
        &self.ukm
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

impl BerSequence for TransportParameters {
    fn encode_fields(&self, writer: &mut BerWriter) -> GostResult<()> {
        self.extension.encode(writer);
        writer.write_octet_string(&self.ukm);
        if let Some(spki) = &self.ephemeral_public_key {
            spki.encode_tagged(writer, EPHEMERAL_PUBLIC_KEY_TAG)?;
        }
        writer.write_oid(&self.encryption_param_set);
        Ok(())
    }

    fn decode_fields(reader: &mut BerReader<'_>) -> GostResult<Self> {
        let encryption_param_set = reader.read_oid("encryptionParamSet")?;
        let ephemeral_public_key = SubjectPublicKeyInfo::decode_tagged(
            reader,
            EPHEMERAL_PUBLIC_KEY_TAG,
            Presence::Optional,
        )?;
        let ukm = reader
            .read_fixed::<UKM_LEN>(Tag::OCTET_STRING, Presence::Required("ukm"), "ukm", "8")?
            .ok_or(GostError::MissingRequiredElement("ukm"))?;
        let extension = reader.read_extension()?;
        Ok(Self {
            encryption_param_set,
            ephemeral_public_key,
            ukm,
            extension,
        })
    }
}

// =============================================================================
// KeyTransportMessage
// =============================================================================

/// A wrapped session key with the parameters needed to unwrap it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTransportMessage {
    session_encrypted_key: EncryptedKey,
    transport_parameters: Option<TransportParameters>,
    extension: OpenExtension,
}

impl KeyTransportMessage {
    /// Creates a message for a key agreed with an ephemeral key pair.
    #[must_use]
    pub fn new(session_encrypted_key: EncryptedKey, transport_parameters: TransportParameters) -> Self {
        Self {
            session_encrypted_key,
            transport_parameters: Some(transport_parameters),
            extension: OpenExtension::new(),
        }
    }

    /// Creates a message for a key-encryption key agreed out of band.
    #[must_use]
    pub fn shared(session_encrypted_key: EncryptedKey) -> Self {
        Self {
            session_encrypted_key,
            transport_parameters: None,
            extension: OpenExtension::new(),
        }
    }

    /// Returns the wrapped session key.
    #[must_use]
    pub fn session_encrypted_key(&self) -> &EncryptedKey {
        &self.session_encrypted_key
    }

    /// Returns the transport parameters, if present.
    #[must_use]
    pub fn transport_parameters(&self) -> Option<&TransportParameters> {
        self.transport_parameters.as_ref()
    }

    /// Returns unknown trailing elements captured on decode.
    #[must_use]
    pub fn extension(&self) -> &OpenExtension {
        &self.extension
    }

    /// Returns the family of the embedded ephemeral key, if there is one
    /// and its algorithm is a GOST key algorithm.
    #[must_use]
    pub fn family(&self) -> Option<AlgorithmFamily> {
        self.transport_parameters
            .as_ref()?
            .ephemeral_public_key
            .as_ref()?
            .family()
    }

    /// Returns the embedded ephemeral public key after checking it belongs
    /// to `family` and has the family's length.
    ///
    /// # Errors
    ///
    /// Returns `GostError::MissingRequiredElement` if there is no ephemeral
    /// key, `GostError::WrongAlgorithmFamily` if its algorithm belongs to
    /// another family, or `GostError::FixedLengthViolation` for a wrong
    /// key length.
    pub fn ephemeral_key_for(&self, family: AlgorithmFamily) -> GostResult<PublicKeyValue> {
        let spki = self
            .transport_parameters
            .as_ref()
            .ok_or(GostError::MissingRequiredElement("transportParameters"))?
            .ephemeral_public_key
            .as_ref()
            .ok_or(GostError::MissingRequiredElement("ephemeralPublicKey"))?;
        if spki.family() != Some(family) {
            return Err(GostError::WrongAlgorithmFamily {
                expected: family,
                found: spki.algorithm().algorithm().to_string(),
            });
        }
        spki.gost_public_key()
    }

    /// Decodes a message and checks that an embedded ephemeral key belongs
    /// to `family`.
    ///
    /// A message without an ephemeral key passes the family check.
    ///
    /// # Errors
    ///
    /// Returns a decode error, `GostError::WrongAlgorithmFamily`, or
    /// `GostError::FixedLengthViolation` for a wrong public-key length.
    pub fn decode_for_family(bytes: &[u8], family: AlgorithmFamily) -> GostResult<Self> {
        let message = Self::from_ber(bytes)?;
        let has_ephemeral_key = message
            .transport_parameters
            .as_ref()
            .is_some_and(|params| params.ephemeral_public_key.is_some());
        if has_ephemeral_key {
            message.ephemeral_key_for(family)?;
        }
        Ok(message)
    }

    /// Encodes the message as standard base64, the form XML and CMS
    /// containers carry.
    ///
    /// # Errors
    ///
    /// Propagates encode errors.
    pub fn to_base64(&self) -> GostResult<String> {
        Ok(BASE64_STANDARD.encode(self.to_ber()?))
    }

    /// Decodes a base64 message and checks its family.
    ///
    /// # Errors
    ///
    /// Returns `GostError::InvalidBase64` or any error of
    /// [`Self::decode_for_family`].
    pub fn from_base64(encoded: &str, family: AlgorithmFamily) -> GostResult<Self> {
        let bytes = BASE64_STANDARD.decode(encoded.trim())?;
        Self::decode_for_family(&bytes, family)
    }
}

impl BerSequence for KeyTransportMessage {
    fn encode_fields(&self, writer: &mut BerWriter) -> GostResult<()> {
        self.extension.encode(writer);
        if let Some(params) = &self.transport_parameters {
            params.encode_tagged(writer, TRANSPORT_PARAMETERS_TAG)?;
        }
        self.session_encrypted_key.encode_ber(writer)?;
        Ok(())
    }

    fn decode_fields(reader: &mut BerReader<'_>) -> GostResult<Self> {
        let session_encrypted_key = EncryptedKey::decode_ber(reader, "sessionEncryptedKey")?;
        let transport_parameters = TransportParameters::decode_tagged(
            reader,
            TRANSPORT_PARAMETERS_TAG,
            Presence::Optional,
        )?;
        let extension = reader.read_extension()?;
        Ok(Self {
            session_encrypted_key,
            transport_parameters,
            extension,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::oid::known;
    use crate::core::types::algorithm_identifier::{AlgorithmIdentifier, AlgorithmParameters};
    use crate::core::types::public_key::{KeyExchangeParameters, PublicKeyParams};

    fn key_params() -> PublicKeyParams {
        PublicKeyParams::new(
            OidValue::from(known::GOST_R3410_2012_256_TC26_A_PARAMSET),
            OidValue::from(known::GOST_R3411_2012_256),
        )
    }

    fn ephemeral(family: AlgorithmFamily) -> GostResult<SubjectPublicKeyInfo> {
        let key = PublicKeyValue::new(family, &vec![0x42; family.public_key_len()])?;
        Ok(KeyExchangeParameters::new(key_params(), key).to_spki())
    }

    fn message(family: AlgorithmFamily) -> GostResult<KeyTransportMessage> {
        let params = TransportParameters::new(
            OidValue::from(known::GOST_28147_89_TC26_Z_PARAMSET),
            Some(ephemeral(family)?),
            [0x07; 8],
        );
        Ok(KeyTransportMessage::new(
            EncryptedKey::new([0x11; 32], &[0xaa, 0xbb, 0xcc, 0xdd])?,
            params,
        ))
    }

    #[test]
    fn test_round_trip_all_families() -> GostResult<()> {
        for family in AlgorithmFamily::ALL {
            let original = message(family)?;
            let bytes = original.to_ber()?;
            let decoded = KeyTransportMessage::decode_for_family(&bytes, family)?;
            assert_eq!(decoded, original);
            assert_eq!(decoded.family(), Some(family));
            assert_eq!(decoded.to_ber()?, bytes);
        }
        Ok(())
    }

    #[test]
    fn test_wire_order() -> GostResult<()> {
        let bytes = message(AlgorithmFamily::Gost2012_256)?.to_ber()?;
        // Long-form outer length, then the EncryptedKey SEQUENCE.
        assert_eq!(&bytes[..5], &[0x30, 0x81, 0xab, 0x30, 0x28]);
        // Transport parameters follow under [0] IMPLICIT.
        assert_eq!(bytes[45], 0xa0);
        Ok(())
    }

    #[test]
    fn test_wrong_family_rejected() -> GostResult<()> {
        let bytes = message(AlgorithmFamily::Gost2001)?.to_ber()?;
        let result = KeyTransportMessage::decode_for_family(&bytes, AlgorithmFamily::Gost2012_256);
        assert!(matches!(
            result,
            Err(GostError::WrongAlgorithmFamily {
                expected: AlgorithmFamily::Gost2012_256,
                ref found,
            }) if found == "1.2.643.2.2.19"
        ));
        Ok(())
    }

    #[test]
    fn test_short_ephemeral_key_rejected() -> GostResult<()> {
        let mut key_bits = BerWriter::new();
        key_bits.write_octet_string(&[0x42; 32]);
        let key_bits = key_bits.into_bytes();
        let algorithm = AlgorithmIdentifier::new(
            OidValue::from(known::GOST_R3410_2012_256),
            AlgorithmParameters::PublicKey(key_params()),
        );

        let message = KeyTransportMessage::new(
            EncryptedKey::new([0x11; 32], &[0xaa])?,
            TransportParameters::new(
                OidValue::from(known::GOST_28147_89_TC26_Z_PARAMSET),
                Some(SubjectPublicKeyInfo::new(algorithm.clone(), key_bits.clone())),
                [0x07; 8],
            ),
        );
        assert!(matches!(
            message.to_ber(),
            Err(GostError::FixedLengthViolation { actual: 32, .. })
        ));

        // The same message written field by field still fails to decode.
        let mut writer = BerWriter::new();
        writer.write_sequence(|w| {
            w.write_constructed(TRANSPORT_PARAMETERS_TAG, |w| {
                w.write_octet_string(&[0x07; 8]);
                w.write_constructed(EPHEMERAL_PUBLIC_KEY_TAG, |w| {
                    w.write_bit_string(0, &key_bits);
                    algorithm.encode_ber(w)?;
                    Ok(())
                })?;
                w.write_oid(&OidValue::from(known::GOST_28147_89_TC26_Z_PARAMSET));
                Ok(())
            })?;
            EncryptedKey::new([0x11; 32], &[0xaa])?.encode_ber(w)?;
            Ok(())
        })?;
        assert!(matches!(
            KeyTransportMessage::from_ber(&writer.into_bytes()),
            Err(GostError::FixedLengthViolation { actual: 32, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_shared_message() -> GostResult<()> {
        let shared = KeyTransportMessage::shared(EncryptedKey::new([0x22; 32], &[0x01])?);
        let bytes = shared.to_ber()?;
        let decoded = KeyTransportMessage::decode_for_family(&bytes, AlgorithmFamily::Gost94)?;
        assert!(decoded.transport_parameters().is_none());
        assert_eq!(decoded.family(), None);
        assert!(matches!(
            decoded.ephemeral_key_for(AlgorithmFamily::Gost94),
            Err(GostError::MissingRequiredElement("transportParameters"))
        ));
        Ok(())
    }

    #[test]
    fn test_missing_ukm() -> GostResult<()> {
        let mut writer = BerWriter::new();
        writer.write_sequence(|w| {
            w.write_oid(&OidValue::from(known::GOST_28147_89_CRYPTOPRO_A_PARAMSET));
            Ok(())
        })?;
        assert!(matches!(
            TransportParameters::from_ber(&writer.into_bytes()),
            Err(GostError::MissingRequiredElement("ukm"))
        ));
        Ok(())
    }

    #[test]
    fn test_base64_round_trip() -> GostResult<()> {
        let original = message(AlgorithmFamily::Gost2012_512)?;
        let encoded = original.to_base64()?;
        let decoded = KeyTransportMessage::from_base64(&encoded, AlgorithmFamily::Gost2012_512)?;
        assert_eq!(decoded, original);
        assert!(matches!(
            KeyTransportMessage::from_base64("not base64!", AlgorithmFamily::Gost2012_512),
            Err(GostError::InvalidBase64(_))
        ));
        Ok(())
    }

    #[test]
    fn test_trailing_data_rejected() -> GostResult<()> {
        let mut bytes = message(AlgorithmFamily::Gost2001)?.to_ber()?;
        bytes.push(0x00);
        assert!(matches!(
            KeyTransportMessage::from_ber(&bytes),
            Err(GostError::TrailingData)
        ));
        Ok(())
    }
}
