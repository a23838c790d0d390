//! # Fields and Messages
//!
//! A [`Field`] is one (field number, wire type, value) triple. Its value is a
//! [`FieldValue`], which is either an unsigned integer or a byte sequence and
//! always agrees with the wire type, so callers match on the variant rather
//! than guessing which accessor is valid.
//!
//! A [`Message`] is the field-number-keyed result of one decode pass. Keys are
//! unique: inserting a field whose number is already present replaces the old
//! one, which is exactly how duplicate fields on the wire resolve.

use crate::core::encoder::Encoder;
use crate::core::tag::{check_field_number, Tag, WireType};
use crate::core::varint::encoded_len;
use crate::error::Result;
use bytes::Bytes;
use std::collections::hash_map::{self, HashMap};

/// Typed payload of a single field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// Wire type 0
    Varint(u64),
    /// Wire type 2
    Bytes(Bytes),
}

impl FieldValue {
    /// Wire type this value is written with
    #[inline]
    pub fn wire_type(&self) -> WireType {
        match self {
            FieldValue::Varint(_) => WireType::Varint,
            FieldValue::Bytes(_) => WireType::LengthDelimited,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Varint(v) => Some(*v),
            FieldValue::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            FieldValue::Varint(_) => None,
            FieldValue::Bytes(b) => Some(b),
        }
    }

    /// Bytes taken by the varint part of the encoding: the value itself for
    /// varints, the length prefix for byte sequences.
    pub fn varint_len(&self) -> usize {
        match self {
            FieldValue::Varint(v) => encoded_len(*v),
            FieldValue::Bytes(b) => encoded_len(b.len() as u64),
        }
    }

    /// Encoded size of the payload (everything after the tag)
    pub fn payload_len(&self) -> usize {
        match self {
            FieldValue::Varint(_) => self.varint_len(),
            FieldValue::Bytes(b) => self.varint_len() + b.len(),
        }
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::Varint(v)
    }
}

impl From<Bytes> for FieldValue {
    fn from(b: Bytes) -> Self {
        FieldValue::Bytes(b)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(v: Vec<u8>) -> Self {
        FieldValue::Bytes(Bytes::from(v))
    }
}

impl From<&[u8]> for FieldValue {
    fn from(v: &[u8]) -> Self {
        FieldValue::Bytes(Bytes::copy_from_slice(v))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }
}

/// One decoded or pending-to-encode field
///
/// The wire type is always the one implied by `value`. Equality ignores
/// `byte_length`, so a padded varint equals its minimal re-encoding.
#[derive(Debug, Clone)]
pub struct Field {
    pub field_number: u32,
    /// Size of the varint value or length prefix. Informational only.
    pub byte_length: usize,
    pub value: FieldValue,
}

impl Field {
    /// Build a field, deriving the wire type and byte length from the value.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `field_number` is 0 or above 2^29 - 1.
    pub fn new(field_number: u32, value: impl Into<FieldValue>) -> Result<Self> {
        check_field_number(field_number)?;
        let value = value.into();
        Ok(Self {
            field_number,
            byte_length: value.varint_len(),
            value,
        })
    }

    pub(crate) fn decoded(field_number: u32, byte_length: usize, value: FieldValue) -> Self {
        Self {
            field_number,
            byte_length,
            value,
        }
    }

    #[inline]
    pub fn wire_type(&self) -> WireType {
        self.value.wire_type()
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.field_number == other.field_number && self.value == other.value
    }
}

impl Eq for Field {}

/// Field-number-keyed set of fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    fields: HashMap<u32, Field>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the one it displaced (last write wins).
    pub fn insert(&mut self, field: Field) -> Option<Field> {
        self.fields.insert(field.field_number, field)
    }

    pub fn get(&self, field_number: u32) -> Option<&Field> {
        self.fields.get(&field_number)
    }

    /// Integer value of a field, if present and of varint type
    pub fn get_u64(&self, field_number: u32) -> Option<u64> {
        self.get(field_number).and_then(|f| f.value.as_u64())
    }

    /// Raw bytes of a field, if present and length-delimited
    pub fn get_bytes(&self, field_number: u32) -> Option<&Bytes> {
        self.get(field_number).and_then(|f| f.value.as_bytes())
    }

    pub fn contains(&self, field_number: u32) -> bool {
        self.fields.contains_key(&field_number)
    }

    pub fn remove(&mut self, field_number: u32) -> Option<Field> {
        self.fields.remove(&field_number)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in unspecified order
    pub fn iter(&self) -> hash_map::Values<'_, u32, Field> {
        self.fields.values()
    }

    /// Field numbers present, ascending
    pub fn field_numbers(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self.fields.keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }

    /// Exact size of [`Message::encode`] output
    pub fn encoded_len(&self) -> usize {
        self.iter()
            .map(|f| {
                let tag = Tag {
                    field_number: f.field_number,
                    wire_type: f.wire_type(),
                };
                encoded_len(tag.to_raw()) + f.value.payload_len()
            })
            .sum()
    }

    /// Serialize all fields in ascending field-number order.
    ///
    /// The output is deterministic for equal messages.
    pub fn encode(&self) -> Result<Bytes> {
        let mut encoder = Encoder::with_capacity(self.encoded_len());
        encoder.encode_message(self)?;
        Ok(encoder.finish())
    }
}

impl FromIterator<Field> for Message {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut message = Message::new();
        for field in iter {
            message.insert(field);
        }
        message
    }
}

impl IntoIterator for Message {
    type Item = Field;
    type IntoIter = hash_map::IntoValues<u32, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_values()
    }
}

impl<'a> IntoIterator for &'a Message {
    type Item = &'a Field;
    type IntoIter = hash_map::Values<'a, u32, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_field_derives_wire_type_and_length() {
        let f = Field::new(3, 301u64).unwrap();
        assert_eq!(f.wire_type(), WireType::Varint);
        assert_eq!(f.byte_length, 2);

        let f = Field::new(2, "pb by hand").unwrap();
        assert_eq!(f.wire_type(), WireType::LengthDelimited);
        assert_eq!(f.byte_length, 1);
        assert_eq!(f.value.payload_len(), 11);
    }

    #[test]
    fn test_field_number_zero_rejected() {
        assert!(matches!(
            Field::new(0, 1u64),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_accessors_respect_variant() {
        let v = FieldValue::Varint(9);
        assert_eq!(v.as_u64(), Some(9));
        assert!(v.as_bytes().is_none());

        let b = FieldValue::from(vec![1u8, 2]);
        assert!(b.as_u64().is_none());
        assert_eq!(b.as_bytes().unwrap().as_ref(), &[1, 2]);
    }

    #[test]
    fn test_insert_last_write_wins() {
        let mut msg = Message::new();
        assert!(msg.insert(Field::new(7, 1u64).unwrap()).is_none());
        let displaced = msg.insert(Field::new(7, 2u64).unwrap()).unwrap();
        assert_eq!(displaced.value, FieldValue::Varint(1));
        assert_eq!(msg.get_u64(7), Some(2));
        assert_eq!(msg.len(), 1);
    }

    #[test]
    fn test_field_numbers_sorted() {
        let msg: Message = [5u32, 2, 9, 1]
            .into_iter()
            .map(|n| Field::new(n, u64::from(n)).unwrap())
            .collect();
        assert_eq!(msg.field_numbers(), vec![1, 2, 5, 9]);
    }

    #[test]
    fn test_equality_ignores_byte_length() {
        let minimal = Field::new(1, 5u64).unwrap();
        let padded = Field::decoded(1, 4, FieldValue::Varint(5));
        assert_eq!(minimal, padded);
        assert_ne!(minimal, Field::new(2, 5u64).unwrap());
        assert_ne!(minimal, Field::new(1, 6u64).unwrap());
    }

    #[test]
    fn test_encoded_len_matches_encode() {
        let msg: Message = vec![
            Field::new(1, 0u64).unwrap(),
            Field::new(16, u64::MAX).unwrap(),
            Field::new(2, vec![0xABu8; 200]).unwrap(),
        ]
        .into_iter()
        .collect();
        assert_eq!(msg.encode().unwrap().len(), msg.encoded_len());
    }
}
