//! Preservation of unknown trailing elements.

use crate::core::ber::reader::BerReader;
use crate::core::ber::writer::BerWriter;
use crate::core::error::{GostError, GostResult};

/// Elements found after the last known field of a SEQUENCE.
///
/// Each element has been checked for a well-formed header and length, but
/// its contents are kept opaque and written back unchanged, so a decoder
/// that predates a schema extension still round-trips it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct OpenExtension {
    elements: Vec<Vec<u8>>,
}

impl OpenExtension {
    /// Creates an empty extension.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Returns `true` if no elements were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of captured elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns the captured elements, each a complete TLV.
    #[must_use]
    pub fn elements(&self) -> &[Vec<u8>] {
        &self.elements
    }

    /// Appends one complete, well-formed TLV element.
    ///
    /// # Errors
    ///
    /// Returns a header error if `element` is malformed, or
    /// `GostError::TrailingData` if it holds more than one element.
    pub fn push(&mut self, element: Vec<u8>) -> GostResult<()> {
        let mut reader = BerReader::new(&element);
        reader.read_raw()?;
        if !reader.is_empty() {
            return Err(GostError::TrailingData);
        }
        self.elements.push(element);
        Ok(())
    }

    pub(crate) fn push_validated(&mut self, element: Vec<u8>) {
        self.elements.push(element);
    }

    /// Prepends the captured elements, preserving their order.
    pub fn encode(&self, writer: &mut BerWriter) -> usize {
        self.elements
            .iter()
            .rev()
            .map(|element| writer.write_raw(element))
            .sum()
    }
}
