//! # Message Decoder
//!
//! Walks an immutable buffer field by field and rebuilds the
//! field-number-keyed [`Message`].
//!
//! ## Algorithm
//! 1. Read a tag varint. Running out of input exactly here ends the pass
//!    successfully.
//! 2. Split it into field number (`tag >> 3`) and wire type (`tag & 7`).
//! 3. Varint: read one varint value. Length-delimited: read a varint length,
//!    then exactly that many bytes. Anything else fails immediately.
//! 4. Repeat.
//!
//! Every failure after the first byte of a tag (truncated varint, short
//! payload, reserved wire type) aborts the whole decode; no partial message
//! is returned. Unknown wire types are not skipped, unlike a full protobuf
//! reader, so newer writers using fixed-width fields cannot be read here.
//!
//! Length-delimited values are zero-copy slices of the input buffer.
//!
//! A decoder makes a single pass over one buffer. After an error it must be
//! dropped.

use crate::config::LimitsConfig;
use crate::core::field::{Field, FieldValue, Message};
use crate::core::tag::{Tag, WireType};
use crate::core::varint::decode_varint;
use crate::error::{CodecError, Result};
use bytes::Bytes;
use tracing::{debug, trace};

/// Cursor over one encoded message
#[derive(Debug)]
pub struct Decoder {
    buf: Bytes,
    pos: usize,
    fields_read: usize,
    limits: LimitsConfig,
    failed: bool,
}

impl Decoder {
    /// Decoder with default limits
    pub fn new(input: impl Into<Bytes>) -> Self {
        Self::with_config(input, &LimitsConfig::default())
    }

    pub fn with_config(input: impl Into<Bytes>, limits: &LimitsConfig) -> Self {
        Self {
            buf: input.into(),
            pos: 0,
            fields_read: 0,
            limits: limits.clone(),
            failed: false,
        }
    }

    /// Offset of the next unread byte
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Read the next field.
    ///
    /// Returns `Ok(None)` when the input ends cleanly at a tag boundary.
    pub fn next_field(&mut self) -> Result<Option<Field>> {
        if self.buf.len() > self.limits.max_message_size {
            return Err(CodecError::OversizedMessage {
                size: self.buf.len(),
                limit: self.limits.max_message_size,
            });
        }
        if self.remaining() == 0 {
            return Ok(None);
        }

        let tag_offset = self.pos;
        let raw_tag = self.read_varint()?;
        let tag = Tag::from_raw(raw_tag, tag_offset)?;

        if self.fields_read >= self.limits.max_field_count {
            return Err(CodecError::TooManyFields {
                limit: self.limits.max_field_count,
            });
        }
        self.fields_read += 1;

        let field = match tag.wire_type {
            WireType::Varint => {
                let start = self.pos;
                let value = self.read_varint()?;
                Field::decoded(tag.field_number, self.pos - start, FieldValue::Varint(value))
            }
            WireType::LengthDelimited => {
                let start = self.pos;
                let declared = self.read_varint()?;
                let prefix_len = self.pos - start;
                let payload = self.read_exact(declared)?;
                Field::decoded(tag.field_number, prefix_len, FieldValue::Bytes(payload))
            }
        };

        trace!(
            field_number = field.field_number,
            wire_type = %field.wire_type(),
            offset = tag_offset,
            "decoded field"
        );
        Ok(Some(field))
    }

    /// Decode the rest of the buffer into a message.
    ///
    /// A repeated field number keeps the last value read.
    pub fn decode(mut self) -> Result<Message> {
        let mut message = Message::new();
        loop {
            match self.next_field() {
                Ok(Some(field)) => {
                    message.insert(field);
                }
                Ok(None) => break,
                Err(e) => {
                    debug!(error = %e, offset = ?e.offset(), "decode failed");
                    return Err(e);
                }
            }
        }
        trace!(fields = message.len(), bytes = self.buf.len(), "decoded message");
        Ok(message)
    }

    fn read_varint(&mut self) -> Result<u64> {
        let (value, used) = decode_varint(&self.buf[self.pos..], self.pos)?;
        self.pos += used;
        Ok(value)
    }

    fn read_exact(&mut self, declared: u64) -> Result<Bytes> {
        let remaining = self.remaining();
        let len = match usize::try_from(declared) {
            Ok(len) if len <= remaining => len,
            _ => {
                return Err(CodecError::TruncatedPayload {
                    offset: self.pos,
                    declared,
                    remaining,
                })
            }
        };
        let payload = self.buf.slice(self.pos..self.pos + len);
        self.pos += len;
        Ok(payload)
    }
}

/// Yields fields in wire order, duplicates included. Stops after the first
/// error.
impl Iterator for Decoder {
    type Item = Result<Field>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_field() {
            Ok(field) => field.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode one message with default limits.
pub fn decode(input: impl Into<Bytes>) -> Result<Message> {
    Decoder::new(input).decode()
}

/// Decode one message with explicit limits.
pub fn decode_with_config(input: impl Into<Bytes>, limits: &LimitsConfig) -> Result<Message> {
    Decoder::with_config(input, limits).decode()
}
