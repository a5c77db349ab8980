//! BER primitive codec.
//!
//! This module provides tag/length/value primitives for the key-transport
//! structures:
//!
//! - [`Tag`] - identifier octets (class, constructed flag, number)
//! - [`BerReader`] - cursor-based decoding with tag matching
//! - [`BerWriter`] - back-to-front encoding, definite lengths only
//! - [`OpenExtension`] - opaque capture of unknown trailing elements
//!
//! Indefinite lengths are rejected. Any malformed header, length overrun
//! or missing mandatory element is a decode error; the codec never repairs
//! its input.

mod extension;
mod reader;
mod tag;
mod writer;

pub use extension::OpenExtension;
pub use reader::{BerReader, Presence};
pub use tag::{decode_length, encode_length, Tag, TagClass};
pub use writer::BerWriter;

use crate::core::error::GostResult;

/// A structure encoded as a BER SEQUENCE.
///
/// Implementors describe only the contents of the SEQUENCE; the provided
/// methods add the outer header, implicit retagging, and the top-level
/// trailing-data check.
pub trait BerSequence: Sized {
    /// Writes the fields last-to-first.
    ///
    /// # Errors
    ///
    /// Returns an error if a field violates its size constraint.
    fn encode_fields(&self, writer: &mut BerWriter) -> GostResult<()>;

    /// Reads the fields from a reader bounded to the SEQUENCE contents.
    ///
    /// Unknown trailing elements must be captured, not left unread.
    ///
    /// # Errors
    ///
    /// Returns a decode error for any structural or size violation.
    fn decode_fields(reader: &mut BerReader<'_>) -> GostResult<Self>;

    /// Prepends this structure under `tag` (the SEQUENCE tag or an implicit one).
    ///
    /// # Errors
    ///
    /// Propagates errors from [`BerSequence::encode_fields`].
    fn encode_tagged(&self, writer: &mut BerWriter, tag: Tag) -> GostResult<usize> {
        writer.write_constructed(tag, |w| self.encode_fields(w))
    }

    /// Prepends this structure as a SEQUENCE.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`BerSequence::encode_fields`].
    fn encode_ber(&self, writer: &mut BerWriter) -> GostResult<usize> {
        self.encode_tagged(writer, Tag::SEQUENCE)
    }

    /// Reads this structure under `tag`.
    ///
    /// # Errors
    ///
    /// Returns a decode error, or `GostError::TrailingData` if the contents
    /// were not fully consumed.
    fn decode_tagged(
        reader: &mut BerReader<'_>,
        tag: Tag,
        presence: Presence,
    ) -> GostResult<Option<Self>> {
        let Some(mut inner) = reader.read_constructed(tag, presence)? else {
            return Ok(None);
        };
        let value = Self::decode_fields(&mut inner)?;
        inner.finish()?;
        Ok(Some(value))
    }

    /// Reads this structure as a required SEQUENCE.
    ///
    /// # Errors
    ///
    /// Returns a decode error.
    fn decode_ber(reader: &mut BerReader<'_>, name: &'static str) -> GostResult<Self> {
        let mut inner = reader.read_sequence(name)?;
        let value = Self::decode_fields(&mut inner)?;
        inner.finish()?;
        Ok(value)
    }

    /// Encodes this structure to a standalone byte vector.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`BerSequence::encode_fields`].
    fn to_ber(&self) -> GostResult<Vec<u8>> {
        let mut writer = BerWriter::new();
        self.encode_ber(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Decodes this structure from `bytes`, which must hold exactly one SEQUENCE.
    ///
    /// # Errors
    ///
    /// Returns a decode error, or `GostError::TrailingData` if bytes remain.
    fn from_ber(bytes: &[u8]) -> GostResult<Self> {
        let mut reader = BerReader::new(bytes);
        let value = Self::decode_ber(&mut reader, "SEQUENCE")?;
        reader.finish()?;
        Ok(value)
    }
}
