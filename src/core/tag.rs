//! # Tags and Wire Types
//!
//! A tag is one varint packing the field number and the wire type:
//!
//! ```text
//! tag = (field_number << 3) | wire_type
//! ```
//!
//! Only `Varint` (0) and `LengthDelimited` (2) are implemented. The fixed
//! width and group wire types (1, 3, 4, 5) are reserved here, and a tag
//! carrying one of them fails the decode instead of being skipped.

use crate::error::{constants, CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest legal field number
pub const MIN_FIELD_NUMBER: u32 = 1;

/// Largest legal field number (29 bits, same bound as protobuf)
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

const WIRE_TYPE_BITS: u32 = 3;
const WIRE_TYPE_MASK: u64 = 0x7;

/// How the bytes after a tag are structured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WireType {
    /// Unsigned varint value follows
    Varint = 0,
    /// Varint byte count followed by that many raw bytes
    LengthDelimited = 2,
}

impl WireType {
    /// Numeric value as written into the low 3 bits of a tag
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            WireType::Varint => "varint",
            WireType::LengthDelimited => "length-delimited",
        }
    }

    fn from_raw(raw: u8, offset: usize) -> Result<Self> {
        match raw {
            0 => Ok(WireType::Varint),
            2 => Ok(WireType::LengthDelimited),
            other => Err(CodecError::UnsupportedWireType {
                wire_type: other,
                offset,
            }),
        }
    }
}

impl TryFrom<u8> for WireType {
    type Error = CodecError;

    fn try_from(raw: u8) -> Result<Self> {
        WireType::from_raw(raw, 0)
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field number plus wire type, as carried at the front of every field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub field_number: u32,
    pub wire_type: WireType,
}

impl Tag {
    /// Build a tag, rejecting field numbers outside `1..=MAX_FIELD_NUMBER`.
    pub fn new(field_number: u32, wire_type: WireType) -> Result<Self> {
        check_field_number(field_number)?;
        Ok(Self {
            field_number,
            wire_type,
        })
    }

    /// Packed tag value ready for varint encoding
    #[inline]
    pub fn to_raw(self) -> u64 {
        (u64::from(self.field_number) << WIRE_TYPE_BITS) | u64::from(self.wire_type.as_u8())
    }

    /// Unpack a raw tag read at `offset`.
    ///
    /// The wire type is checked first so a reserved wire type is reported as
    /// such even when the field number is also bad.
    pub fn from_raw(raw: u64, offset: usize) -> Result<Self> {
        let wire_type = WireType::from_raw((raw & WIRE_TYPE_MASK) as u8, offset)?;
        let field_number = raw >> WIRE_TYPE_BITS;

        if field_number < u64::from(MIN_FIELD_NUMBER) || field_number > u64::from(MAX_FIELD_NUMBER)
        {
            return Err(CodecError::InvalidFieldNumber {
                field_number,
                offset,
            });
        }

        Ok(Self {
            field_number: field_number as u32,
            wire_type,
        })
    }
}

/// Validate a caller-supplied field number.
pub(crate) fn check_field_number(field_number: u32) -> Result<()> {
    if field_number < MIN_FIELD_NUMBER {
        return Err(CodecError::InvalidArgument(
            constants::ERR_FIELD_NUMBER_ZERO.to_string(),
        ));
    }
    if field_number > MAX_FIELD_NUMBER {
        return Err(CodecError::InvalidArgument(format!(
            "{}: {field_number}",
            constants::ERR_FIELD_NUMBER_TOO_LARGE
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_packing() {
        assert_eq!(Tag::new(1, WireType::Varint).unwrap().to_raw(), 0x08);
        assert_eq!(Tag::new(2, WireType::LengthDelimited).unwrap().to_raw(), 0x12);
        assert_eq!(Tag::new(5, WireType::Varint).unwrap().to_raw(), 0x28);
    }

    #[test]
    fn test_tag_unpacking() {
        let tag = Tag::from_raw(0x12, 0).unwrap();
        assert_eq!(tag.field_number, 2);
        assert_eq!(tag.wire_type, WireType::LengthDelimited);
    }

    #[test]
    fn test_reserved_wire_types_rejected() {
        for raw in [1u8, 3, 4, 5, 6, 7] {
            let err = WireType::try_from(raw).unwrap_err();
            assert!(matches!(
                err,
                CodecError::UnsupportedWireType { wire_type, .. } if wire_type == raw
            ));
        }
    }

    #[test]
    fn test_field_number_zero_rejected() {
        assert!(matches!(
            Tag::new(0, WireType::Varint),
            Err(CodecError::InvalidArgument(_))
        ));
        assert!(matches!(
            Tag::from_raw(0x00, 4),
            Err(CodecError::InvalidFieldNumber {
                field_number: 0,
                offset: 4
            })
        ));
    }

    #[test]
    fn test_field_number_upper_bound() {
        assert!(Tag::new(MAX_FIELD_NUMBER, WireType::Varint).is_ok());
        assert!(Tag::new(MAX_FIELD_NUMBER + 1, WireType::Varint).is_err());

        let raw = (u64::from(MAX_FIELD_NUMBER) + 1) << 3;
        assert!(matches!(
            Tag::from_raw(raw, 0),
            Err(CodecError::InvalidFieldNumber { .. })
        ));
    }

    #[test]
    fn test_wire_type_before_field_number() {
        // field 0 with wire type 5: the wire type wins
        assert!(matches!(
            Tag::from_raw(0x05, 0),
            Err(CodecError::UnsupportedWireType { wire_type: 5, .. })
        ));
    }
}
