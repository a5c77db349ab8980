//! Cursor-based BER decoding.

use crate::core::ber::extension::OpenExtension;
use crate::core::ber::tag::{decode_length, Tag};
use crate::core::error::{GostError, GostResult};
use crate::core::oid::OidValue;

/// Whether an element may be absent at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The element must be present; the name is used in error reports.
    Required(&'static str),
    /// The element is OPTIONAL or DEFAULT.
    Optional,
}

/// A read cursor over BER-encoded data.
///
/// A reader never looks past the end of the slice it was created for, so a
/// nested reader returned for a constructed element is bounded by that
/// element's declared length.
#[derive(Debug, Clone)]
pub struct BerReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BerReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the cursor offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` when every byte has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the tag of the next element without consuming it.
    ///
    /// # Errors
    ///
    /// Returns `GostError::MalformedTag` if the identifier octets are malformed.
    pub fn peek_tag(&self) -> GostResult<Option<Tag>> {
        if self.is_empty() {
            return Ok(None);
        }
        Tag::decode(self.rest()).map(|(tag, _)| Some(tag))
    }

    fn peek_header(&self) -> GostResult<(Tag, usize, usize)> {
        let rest = self.rest();
        let (tag, tag_len) = Tag::decode(rest)?;
        let (length, length_len) = decode_length(&rest[tag_len..])?;
        let header_len = tag_len + length_len;
        if length > rest.len() - header_len {
            return Err(GostError::MalformedLength);
        }
        Ok((tag, header_len, length))
    }

    /// Reads the identifier and length octets of the next element.
    ///
    /// The cursor is left at the first content octet.
    ///
    /// # Errors
    ///
    /// Returns `GostError::MalformedTag` or `GostError::MalformedLength` when
    /// the header is truncated or the length overruns the remaining data.
    pub fn decode_tag_and_length(&mut self) -> GostResult<(Tag, usize)> {
        let (tag, header_len, length) = self.peek_header()?;
        self.pos += header_len;
        Ok((tag, length))
    }

    /// Consumes the next header if its tag equals `expected`.
    ///
    /// Returns the content length, or `None` if the tag does not match and
    /// the element is optional. Nothing is consumed in the `None` case.
    ///
    /// # Errors
    ///
    /// Returns `GostError::MissingRequiredElement` if a required element is
    /// absent or carries another tag.
    pub fn match_element_tag(
        &mut self,
        expected: Tag,
        presence: Presence,
    ) -> GostResult<Option<usize>> {
        match self.peek_tag()? {
            Some(tag) if tag == expected => {
                let (_, length) = self.decode_tag_and_length()?;
                Ok(Some(length))
            }
            _ => match presence {
                Presence::Optional => Ok(None),
                Presence::Required(name) => Err(GostError::MissingRequiredElement(name)),
            },
        }
    }

    /// Consumes `length` content bytes.
    ///
    /// # Errors
    ///
    /// Returns `GostError::MalformedLength` if fewer bytes remain.
    pub fn take(&mut self, length: usize) -> GostResult<&'a [u8]> {
        if length > self.remaining() {
            return Err(GostError::MalformedLength);
        }
        let bytes = &self.data[self.pos..self.pos + length];
        self.pos += length;
        Ok(bytes)
    }

    /// Reads the contents of an element tagged `expected`.
    ///
    /// # Errors
    ///
    /// Propagates header errors and `GostError::MissingRequiredElement`.
    pub fn read_element(
        &mut self,
        expected: Tag,
        presence: Presence,
    ) -> GostResult<Option<&'a [u8]>> {
        match self.match_element_tag(expected, presence)? {
            Some(length) => self.take(length).map(Some),
            None => Ok(None),
        }
    }

    /// Reads the contents of a required element tagged `expected`.
    ///
    /// # Errors
    ///
    /// Propagates header errors and `GostError::MissingRequiredElement`.
    pub fn read_required(&mut self, expected: Tag, name: &'static str) -> GostResult<&'a [u8]> {
        self.read_element(expected, Presence::Required(name))?
            .ok_or(GostError::MissingRequiredElement(name))
    }

    /// Returns a reader bounded to the contents of a constructed element.
    ///
    /// # Errors
    ///
    /// Propagates header errors and `GostError::MissingRequiredElement`.
    pub fn read_constructed(
        &mut self,
        expected: Tag,
        presence: Presence,
    ) -> GostResult<Option<BerReader<'a>>> {
        Ok(self
            .read_element(expected, presence)?
            .map(BerReader::new))
    }

    /// Returns a reader over the contents of a required SEQUENCE.
    ///
    /// # Errors
    ///
    /// Propagates header errors and `GostError::MissingRequiredElement`.
    pub fn read_sequence(&mut self, name: &'static str) -> GostResult<BerReader<'a>> {
        self.read_required(Tag::SEQUENCE, name).map(BerReader::new)
    }

    /// Returns a reader over the single element wrapped in `[number] EXPLICIT`.
    ///
    /// # Errors
    ///
    /// Propagates header errors and `GostError::MissingRequiredElement`.
    pub fn read_explicit(
        &mut self,
        number: u32,
        presence: Presence,
    ) -> GostResult<Option<BerReader<'a>>> {
        self.read_constructed(Tag::context(number, true), presence)
    }

    /// Reads the contents of a required OCTET STRING.
    ///
    /// # Errors
    ///
    /// Propagates header errors and `GostError::MissingRequiredElement`.
    pub fn read_octet_string(&mut self, name: &'static str) -> GostResult<&'a [u8]> {
        self.read_required(Tag::OCTET_STRING, name)
    }

    /// Reads an element tagged `tag` whose contents must be exactly `N` bytes.
    ///
    /// # Errors
    ///
    /// Returns `GostError::FixedLengthViolation` when the length differs.
    pub fn read_fixed<const N: usize>(
        &mut self,
        tag: Tag,
        presence: Presence,
        name: &'static str,
        expected: &'static str,
    ) -> GostResult<Option<[u8; N]>> {
        let Some(content) = self.read_element(tag, presence)? else {
            return Ok(None);
        };
        let fixed: [u8; N] = content
            .try_into()
            .map_err(|_| GostError::length(name, expected, content.len()))?;
        Ok(Some(fixed))
    }

    /// Reads a required OBJECT IDENTIFIER.
    ///
    /// # Errors
    ///
    /// Returns `GostError::MalformedOid` for invalid content octets.
    pub fn read_oid(&mut self, name: &'static str) -> GostResult<OidValue> {
        let content = self.read_required(Tag::OBJECT_IDENTIFIER, name)?;
        OidValue::from_ber_content(content)
    }

    /// Reads a required NULL.
    ///
    /// # Errors
    ///
    /// Returns `GostError::MalformedLength` if the NULL has content.
    pub fn read_null(&mut self, name: &'static str) -> GostResult<()> {
        let content = self.read_required(Tag::NULL, name)?;
        if !content.is_empty() {
            return Err(GostError::MalformedLength);
        }
        Ok(())
    }

    /// Reads a required BIT STRING, returning the unused-bit count and the bits.
    ///
    /// # Errors
    ///
    /// Returns `GostError::MalformedLength` if the unused-bit octet is
    /// missing or out of range.
    pub fn read_bit_string(&mut self, name: &'static str) -> GostResult<(u8, &'a [u8])> {
        let content = self.read_required(Tag::BIT_STRING, name)?;
        let (&unused, bits) = content.split_first().ok_or(GostError::MalformedLength)?;
        if unused > 7 || (bits.is_empty() && unused != 0) {
            return Err(GostError::MalformedLength);
        }
        Ok((unused, bits))
    }

    /// Reads the next complete element (identifier, length and contents).
    ///
    /// # Errors
    ///
    /// Propagates header errors.
    pub fn read_raw(&mut self) -> GostResult<&'a [u8]> {
        let start = self.pos;
        let (_, length) = self.decode_tag_and_length()?;
        self.take(length)?;
        Ok(&self.data[start..self.pos])
    }

    /// Captures every remaining element as opaque extension data.
    ///
    /// # Errors
    ///
    /// Propagates header errors of the captured elements.
    pub fn read_extension(&mut self) -> GostResult<OpenExtension> {
        let mut extension = OpenExtension::new();
        while !self.is_empty() {
            extension.push_validated(self.read_raw()?.to_vec());
        }
        Ok(extension)
    }

    /// Confirms that no bytes remain.
    ///
    /// # Errors
    ///
    /// Returns `GostError::TrailingData` if unread bytes remain.
    pub fn finish(&self) -> GostResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(GostError::TrailingData)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_tag_and_length_advances_cursor() -> GostResult<()> {
        let data = [0x04, 0x02, 0xaa, 0xbb];
        let mut reader = BerReader::new(&data);
        let (tag, length) = reader.decode_tag_and_length()?;
        assert_eq!(tag, Tag::OCTET_STRING);
        assert_eq!(length, 2);
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.take(2)?, &[0xaa, 0xbb]);
        reader.finish()
    }

    #[test]
    fn test_length_overrun_is_malformed() {
        let data = [0x04, 0x05, 0xaa];
        let mut reader = BerReader::new(&data);
        assert!(matches!(
            reader.decode_tag_and_length(),
            Err(GostError::MalformedLength)
        ));
    }

    #[test]
    fn test_nested_reader_is_bounded_by_parent() {
        // SEQUENCE of length 3 whose inner OCTET STRING claims 4 bytes.
        let data = [0x30, 0x03, 0x04, 0x04, 0xaa, 0xbb, 0xcc, 0xdd];
        let mut reader = BerReader::new(&data);
        let mut inner = reader.read_sequence("outer").expect("outer sequence");
        assert!(matches!(
            inner.read_octet_string("inner"),
            Err(GostError::MalformedLength)
        ));
    }

    #[test]
    fn test_match_optional_absent_does_not_consume() -> GostResult<()> {
        let data = [0x04, 0x01, 0xaa];
        let mut reader = BerReader::new(&data);
        let matched = reader.match_element_tag(Tag::context(0, false), Presence::Optional)?;
        assert_eq!(matched, None);
        assert_eq!(reader.position(), 0);
        Ok(())
    }

    #[test]
    fn test_match_required_absent_fails() {
        let data = [0x04, 0x01, 0xaa];
        let mut reader = BerReader::new(&data);
        let result = reader.match_element_tag(Tag::OBJECT_IDENTIFIER, Presence::Required("oid"));
        assert!(matches!(result, Err(GostError::MissingRequiredElement("oid"))));
    }

    #[test]
    fn test_match_required_at_end_fails() {
        let mut reader = BerReader::new(&[]);
        let result = reader.read_octet_string("ukm");
        assert!(matches!(result, Err(GostError::MissingRequiredElement("ukm"))));
    }

    #[test]
    fn test_read_fixed_length_violation() {
        let data = [0x04, 0x02, 0x01, 0x02];
        let mut reader = BerReader::new(&data);
        let result = reader.read_fixed::<8>(Tag::OCTET_STRING, Presence::Required("ukm"), "ukm", "8");
        assert!(matches!(
            result,
            Err(GostError::FixedLengthViolation { field: "ukm", actual: 2, .. })
        ));
    }

    #[test]
    fn test_read_explicit() -> GostResult<()> {
        let data = [0xa1, 0x03, 0x02, 0x01, 0x07];
        let mut reader = BerReader::new(&data);
        let mut inner = reader
            .read_explicit(1, Presence::Required("version"))?
            .ok_or(GostError::MissingRequiredElement("version"))?;
        assert_eq!(inner.read_required(Tag::INTEGER, "version")?, &[0x07]);
        inner.finish()?;
        reader.finish()
    }

    #[test]
    fn test_read_bit_string() -> GostResult<()> {
        let data = [0x03, 0x03, 0x00, 0xde, 0xad];
        let mut reader = BerReader::new(&data);
        let (unused, bits) = reader.read_bit_string("key")?;
        assert_eq!(unused, 0);
        assert_eq!(bits, &[0xde, 0xad]);

        let bad = [0x03, 0x00];
        let mut reader = BerReader::new(&bad);
        assert!(matches!(
            reader.read_bit_string("key"),
            Err(GostError::MalformedLength)
        ));
        Ok(())
    }

    #[test]
    fn test_read_null() -> GostResult<()> {
        let mut reader = BerReader::new(&[0x05, 0x00]);
        reader.read_null("params")?;
        let mut reader = BerReader::new(&[0x05, 0x01, 0x00]);
        assert!(matches!(reader.read_null("params"), Err(GostError::MalformedLength)));
        Ok(())
    }

    #[test]
    fn test_read_raw_and_extension() -> GostResult<()> {
        let data = [0x02, 0x01, 0x05, 0x05, 0x00];
        let mut reader = BerReader::new(&data);
        let extension = reader.read_extension()?;
        assert_eq!(extension.len(), 2);
        assert_eq!(extension.elements()[0], vec![0x02, 0x01, 0x05]);
        assert_eq!(extension.elements()[1], vec![0x05, 0x00]);
        reader.finish()
    }

    #[test]
    fn test_finish_reports_trailing_data() {
        let reader = BerReader::new(&[0x00]);
        assert!(matches!(reader.finish(), Err(GostError::TrailingData)));
    }
}
