//! # Varint Primitives
//!
//! Unsigned LEB128 encoding shared by the encoder and decoder.
//!
//! Each byte carries 7 data bits, least significant group first. Bit 7 is the
//! continuation flag. Encoders always emit the minimal form. Decoders accept
//! non-minimal (zero-padded) forms as long as the value fits in 64 bits.

use crate::error::{CodecError, Result};
use bytes::BufMut;

/// Maximum number of bytes a 64-bit varint can occupy
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION_BIT: u8 = 0x80;
const DATA_MASK: u8 = 0x7F;

/// Append the minimal varint encoding of `value` to `buf`.
#[inline]
pub fn encode_varint<B: BufMut>(mut value: u64, buf: &mut B) {
    loop {
        let byte = (value as u8) & DATA_MASK;
        value >>= 7;
        if value == 0 {
            buf.put_u8(byte);
            return;
        }
        buf.put_u8(byte | CONTINUATION_BIT);
    }
}

/// Encode `value` into a freshly allocated vector.
pub fn encode_varint_to_vec(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(value));
    encode_varint(value, &mut out);
    out
}

/// Number of bytes the minimal encoding of `value` occupies (1..=10).
#[inline]
pub fn encoded_len(value: u64) -> usize {
    // bits needed, rounded up to whole 7-bit groups; zero still takes a byte
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Decode one varint from the front of `input`.
///
/// Returns the value and the number of bytes consumed. `offset` is the
/// position of `input[0]` in the enclosing buffer and is only used for error
/// reporting.
///
/// # Errors
/// - `TruncatedVarint` if `input` ends before a terminating byte
/// - `VarintOverflow` if the encoding runs past 10 bytes or sets bits above 63
pub fn decode_varint(input: &[u8], offset: usize) -> Result<(u64, usize)> {
    let mut value: u64 = 0;

    for (i, &byte) in input.iter().enumerate().take(MAX_VARINT_LEN) {
        let group = u64::from(byte & DATA_MASK);

        if i == MAX_VARINT_LEN - 1 && (byte & CONTINUATION_BIT != 0 || group > 1) {
            return Err(CodecError::VarintOverflow { offset });
        }

        value |= group << (7 * i);

        if byte & CONTINUATION_BIT == 0 {
            return Ok((value, i + 1));
        }
    }

    Err(CodecError::TruncatedVarint { offset })
}
