//! # Message Encoder
//!
//! Appends tag + payload pairs to a growable buffer in the order the caller
//! writes them. The output is self-describing: no schema is needed to decode.
//!
//! ```text
//! Varint field:           [tag(n, 0)] [varint value]
//! Length-delimited field: [tag(n, 2)] [varint len] [len raw bytes]
//! ```
//!
//! Arguments are validated before anything is written, so a rejected call
//! leaves the buffer untouched. There is no rollback beyond that: if a
//! caller abandons a message halfway, the buffer should be reset or dropped.

use crate::core::field::{Field, FieldValue, Message};
use crate::core::tag::{Tag, WireType};
use crate::core::varint::{encode_varint, encoded_len};
use crate::error::{constants, CodecError, Result};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::trace;

/// Default buffer capacity for a fresh encoder
const DEFAULT_CAPACITY: usize = 128;

/// Builds one encoded message
#[derive(Debug, Clone)]
pub struct Encoder {
    buf: BytesMut,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Write a varint field (wire type 0).
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `field_number` is 0 or above 2^29 - 1.
    pub fn encode_varint_field(&mut self, field_number: u32, value: u64) -> Result<()> {
        let tag = Tag::new(field_number, WireType::Varint)?;

        self.buf.reserve(encoded_len(tag.to_raw()) + encoded_len(value));
        encode_varint(tag.to_raw(), &mut self.buf);
        encode_varint(value, &mut self.buf);

        trace!(field_number, value, "encoded varint field");
        Ok(())
    }

    /// Write a field carrying raw bytes.
    ///
    /// Only `LengthDelimited` is accepted; the bytes are written verbatim
    /// after a varint length prefix.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a bad field number or any other wire type.
    pub fn encode_field(
        &mut self,
        field_number: u32,
        wire_type: WireType,
        raw: &[u8],
    ) -> Result<()> {
        if wire_type != WireType::LengthDelimited {
            return Err(CodecError::InvalidArgument(format!(
                "{} (got {wire_type})",
                constants::ERR_NOT_LENGTH_DELIMITED
            )));
        }
        let tag = Tag::new(field_number, wire_type)?;
        let len = raw.len() as u64;

        self.buf.reserve(encoded_len(tag.to_raw()) + encoded_len(len) + raw.len());
        encode_varint(tag.to_raw(), &mut self.buf);
        encode_varint(len, &mut self.buf);
        self.buf.put_slice(raw);

        trace!(field_number, len = raw.len(), "encoded length-delimited field");
        Ok(())
    }

    /// Shorthand for a length-delimited field
    pub fn encode_bytes_field(&mut self, field_number: u32, raw: &[u8]) -> Result<()> {
        self.encode_field(field_number, WireType::LengthDelimited, raw)
    }

    /// Write a UTF-8 string as a length-delimited field
    pub fn encode_string_field(&mut self, field_number: u32, s: &str) -> Result<()> {
        self.encode_field(field_number, WireType::LengthDelimited, s.as_bytes())
    }

    /// Write a typed value using the wire type its variant implies
    pub fn encode_value(&mut self, field_number: u32, value: &FieldValue) -> Result<()> {
        match value {
            FieldValue::Varint(v) => self.encode_varint_field(field_number, *v),
            FieldValue::Bytes(b) => self.encode_bytes_field(field_number, b),
        }
    }

    /// Write a prepared field
    pub fn encode_field_entry(&mut self, field: &Field) -> Result<()> {
        self.encode_value(field.field_number, &field.value)
    }

    /// Write every field of `message` in ascending field-number order
    pub fn encode_message(&mut self, message: &Message) -> Result<()> {
        for field_number in message.field_numbers() {
            if let Some(field) = message.get(field_number) {
                self.encode_field_entry(field)?;
            }
        }
        Ok(())
    }

    /// Bytes written so far. Does not consume the encoder.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Debug rendering of the buffer as bracketed hex pairs, e.g. `[08 96 01]`.
    ///
    /// Diagnostic only; not an interchange format.
    pub fn string(&self) -> String {
        self.to_string()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard everything written, keeping the allocation for reuse
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Consume the encoder and hand back the encoded message
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

impl fmt::Display for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, byte) in self.buf.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        f.write_str("]")
    }
}

/// Encode `fields` in iteration order.
///
/// Order is preserved on the wire, including repeated field numbers, so a
/// later duplicate wins when the bytes are decoded.
pub fn encode<I>(fields: I) -> Result<Bytes>
where
    I: IntoIterator<Item = Field>,
{
    let mut encoder = Encoder::new();
    for field in fields {
        encoder.encode_field_entry(&field)?;
    }
    Ok(encoder.finish())
}
