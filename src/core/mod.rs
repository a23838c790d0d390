//! # Core Codec Components
//!
//! Varint primitives, tags, the field model, the encoder/decoder pair and
//! stream framing.
//!
//! ## Components
//! - **Varint**: LEB128 primitives shared by both directions
//! - **Tag**: field number + wire type packing
//! - **Field**: `Field`, `FieldValue`, `Message`
//! - **Encoder / Decoder**: one message to and from bytes
//! - **Codec**: Tokio codec framing messages over byte streams
//!
//! ## Wire Format
//! ```text
//! field   = tag payload
//! tag     = varint((field_number << 3) | wire_type)
//! payload = varint                      (wire type 0)
//!         | varint(len) byte{len}       (wire type 2)
//! ```
//!
//! ## Security
//! - Varints longer than 10 bytes or wider than 64 bits are rejected
//! - Declared lengths are checked against the remaining input before slicing
//! - Message size and field count limits bound work per message

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod field;
pub mod tag;
pub mod varint;
