//! BER identifier and length octets.

use core::fmt::{self, Display};

use crate::core::error::{GostError, GostResult};

/// Class bits of a BER identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
    /// Universal (ASN.1 built-in types).
    Universal,
    /// Application-wide.
    Application,
    /// Context-specific (`[n]` in a SEQUENCE).
    ContextSpecific,
    /// Private use.
    Private,
}

impl TagClass {
    const fn bits(self) -> u8 {
        match self {
            Self::Universal => 0x00,
            Self::Application => 0x40,
            Self::ContextSpecific => 0x80,
            Self::Private => 0xc0,
        }
    }

    const fn from_bits(byte: u8) -> Self {
        match byte & 0xc0 {
            0x00 => Self::Universal,
            0x40 => Self::Application,
            0x80 => Self::ContextSpecific,
            _ => Self::Private,
        }
    }
}

/// A BER tag: class, constructed flag and tag number.
///
/// Two tags are equal only if all three parts are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    class: TagClass,
    constructed: bool,
    number: u32,
}

impl Tag {
    /// UNIVERSAL 1.
    pub const BOOLEAN: Self = Self::universal(1, false);
    /// UNIVERSAL 2.
    pub const INTEGER: Self = Self::universal(2, false);
    /// UNIVERSAL 3.
    pub const BIT_STRING: Self = Self::universal(3, false);
    /// UNIVERSAL 4.
    pub const OCTET_STRING: Self = Self::universal(4, false);
    /// UNIVERSAL 5.
    pub const NULL: Self = Self::universal(5, false);
    /// UNIVERSAL 6.
    pub const OBJECT_IDENTIFIER: Self = Self::universal(6, false);
    /// UNIVERSAL 16, constructed.
    pub const SEQUENCE: Self = Self::universal(16, true);
    /// UNIVERSAL 17, constructed.
    pub const SET: Self = Self::universal(17, true);

    /// Creates a tag from its parts.
    #[must_use]
    pub const fn new(class: TagClass, constructed: bool, number: u32) -> Self {
        Self {
            class,
            constructed,
            number,
        }
    }

    /// Creates a universal tag.
    #[must_use]
    pub const fn universal(number: u32, constructed: bool) -> Self {
        Self::new(TagClass::Universal, constructed, number)
    }

    /// Creates a context-specific tag (`[number]`).
    #[must_use]
    pub const fn context(number: u32, constructed: bool) -> Self {
        Self::new(TagClass::ContextSpecific, constructed, number)
    }

    /// Returns the tag class.
    #[must_use]
    pub const fn class(&self) -> TagClass {
        self.class
    }

    /// Returns `true` for constructed encodings.
    #[must_use]
    pub const fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Returns the tag number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Encodes the identifier octets.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut first = self.class.bits();
        if self.constructed {
            first |= 0x20;
        }
        if self.number < 0x1f {
            // Tag numbers below 31 always fit in the low five bits.
            #[allow(clippy::cast_possible_truncation)]
            return vec![first | self.number as u8];
        }

        let mut out = vec![first | 0x1f];
        let mut groups = [0u8; 5];
        let mut count = 0;
        let mut number = self.number;
        loop {
            groups[count] = (number & 0x7f) as u8;
            count += 1;
            number >>= 7;
            if number == 0 {
                break;
            }
        }
        for i in (0..count).rev() {
            let continuation = if i == 0 { 0 } else { 0x80 };
            out.push(groups[i] | continuation);
        }
        out
    }

    /// Decodes identifier octets from the start of `data`.
    ///
    /// Returns the tag and the number of octets consumed.
    ///
    /// # Errors
    ///
    /// Returns `GostError::MalformedTag` if the octets are truncated, use a
    /// non-minimal high tag number, or overflow 32 bits.
    pub fn decode(data: &[u8]) -> GostResult<(Self, usize)> {
        let first = *data.first().ok_or(GostError::MalformedTag)?;
        let class = TagClass::from_bits(first);
        let constructed = first & 0x20 != 0;
        let low = first & 0x1f;
        if low != 0x1f {
            return Ok((Self::new(class, constructed, u32::from(low)), 1));
        }

        let mut number: u32 = 0;
        let mut consumed = 1;
        loop {
            let byte = *data.get(consumed).ok_or(GostError::MalformedTag)?;
            if consumed == 1 && byte == 0x80 {
                return Err(GostError::MalformedTag);
            }
            if number > (u32::MAX >> 7) {
                return Err(GostError::MalformedTag);
            }
            number = (number << 7) | u32::from(byte & 0x7f);
            consumed += 1;
            if byte & 0x80 == 0 {
                break;
            }
        }
        if number < 0x1f {
            return Err(GostError::MalformedTag);
        }
        Ok((Self::new(class, constructed, number), consumed))
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = match self.class {
            TagClass::Universal => "UNIVERSAL",
            TagClass::Application => "APPLICATION",
            TagClass::ContextSpecific => "CONTEXT",
            TagClass::Private => "PRIVATE",
        };
        let form = if self.constructed { "constructed" } else { "primitive" };
        write!(f, "[{class} {}] {form}", self.number)
    }
}

/// Encodes definite-length octets for `length`.
#[must_use]
pub fn encode_length(length: usize) -> Vec<u8> {
    if length < 0x80 {
        #[allow(clippy::cast_possible_truncation)]
        return vec![length as u8];
    }
    let be = length.to_be_bytes();
    let skip = be.iter().take_while(|&&b| b == 0).count();
    let significant = &be[skip..];
    let mut out = Vec::with_capacity(significant.len() + 1);
    #[allow(clippy::cast_possible_truncation)]
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
    out
}

/// Decodes definite-length octets from the start of `data`.
///
/// Returns the length and the number of octets consumed. The caller
/// checks the length against the data that actually remains.
///
/// # Errors
///
/// Returns `GostError::MalformedLength` for truncated octets, the
/// indefinite form, the reserved `0xFF` form, or lengths beyond `usize`.
pub fn decode_length(data: &[u8]) -> GostResult<(usize, usize)> {
    let first = *data.first().ok_or(GostError::MalformedLength)?;
    if first < 0x80 {
        return Ok((usize::from(first), 1));
    }
    // 0x80 is the indefinite form, 0xFF is reserved.
    if first == 0x80 || first == 0xff {
        return Err(GostError::MalformedLength);
    }
    let count = usize::from(first & 0x7f);
    if count > core::mem::size_of::<usize>() {
        return Err(GostError::MalformedLength);
    }
    let octets = data.get(1..=count).ok_or(GostError::MalformedLength)?;
    let length = octets
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));
    Ok((length, count + 1))
}
