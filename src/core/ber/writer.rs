//! Back-to-front BER encoding.
//!
//! Every write prepends to the output. A constructed element is produced
//! by writing its fields last-to-first and then prepending its header,
//! which is the only point where the content length is known without a
//! second pass.

use crate::core::ber::tag::{encode_length, Tag};
use crate::core::error::GostResult;
use crate::core::oid::OidValue;

/// An encode buffer that grows towards the front.
#[derive(Debug, Default, Clone)]
pub struct BerWriter {
    // Output bytes in reverse order.
    reversed: Vec<u8>,
}

impl BerWriter {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reversed: Vec::new(),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reversed.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reversed.is_empty()
    }

    /// Prepends raw bytes to the output.
    pub fn prepend(&mut self, bytes: &[u8]) {
        self.reversed.extend(bytes.iter().rev());
    }

    /// Prepends identifier and length octets, so that the output reads tag,
    /// then length, then whatever was written before. Returns the header size.
    pub fn encode_tag_and_length(&mut self, tag: Tag, length: usize) -> usize {
        let length_octets = encode_length(length);
        let tag_octets = tag.to_bytes();
        self.prepend(&length_octets);
        self.prepend(&tag_octets);
        tag_octets.len() + length_octets.len()
    }

    /// Prepends a primitive element. Returns the encoded size.
    pub fn write_primitive(&mut self, tag: Tag, content: &[u8]) -> usize {
        self.prepend(content);
        self.encode_tag_and_length(tag, content.len()) + content.len()
    }

    /// Prepends a constructed element whose contents are written by `body`.
    ///
    /// `body` must write the fields last-to-first. Returns the encoded size.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `body`.
    pub fn write_constructed<F>(&mut self, tag: Tag, body: F) -> GostResult<usize>
    where
        F: FnOnce(&mut Self) -> GostResult<()>,
    {
        let mark = self.len();
        body(self)?;
        let content_len = self.len() - mark;
        Ok(self.encode_tag_and_length(tag, content_len) + content_len)
    }

    /// Prepends a SEQUENCE whose contents are written by `body`.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `body`.
    pub fn write_sequence<F>(&mut self, body: F) -> GostResult<usize>
    where
        F: FnOnce(&mut Self) -> GostResult<()>,
    {
        self.write_constructed(Tag::SEQUENCE, body)
    }

    /// Prepends `[number] EXPLICIT` around the element written by `body`.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `body`.
    pub fn write_explicit<F>(&mut self, number: u32, body: F) -> GostResult<usize>
    where
        F: FnOnce(&mut Self) -> GostResult<()>,
    {
        self.write_constructed(Tag::context(number, true), body)
    }

    /// Prepends an OCTET STRING.
    pub fn write_octet_string(&mut self, content: &[u8]) -> usize {
        self.write_primitive(Tag::OCTET_STRING, content)
    }

    /// Prepends an OBJECT IDENTIFIER.
    pub fn write_oid(&mut self, oid: &OidValue) -> usize {
        self.write_primitive(Tag::OBJECT_IDENTIFIER, oid.as_ber_content())
    }

    /// Prepends a NULL.
    pub fn write_null(&mut self) -> usize {
        self.write_primitive(Tag::NULL, &[])
    }

    /// Prepends a BIT STRING with the given number of unused trailing bits.
    pub fn write_bit_string(&mut self, unused_bits: u8, bits: &[u8]) -> usize {
        self.prepend(bits);
        self.prepend(&[unused_bits]);
        self.encode_tag_and_length(Tag::BIT_STRING, bits.len() + 1) + bits.len() + 1
    }

    /// Prepends an already-encoded element verbatim.
    pub fn write_raw(&mut self, element: &[u8]) -> usize {
        self.prepend(element);
        element.len()
    }

    /// Returns the encoded bytes in wire order.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        let mut bytes = self.reversed;
        bytes.reverse();
        bytes
    }
}
