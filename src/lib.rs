//! # tagwire
//!
//! Encoder and decoder for a tag-prefixed binary message format, a
//! simplified subset of the Protocol Buffers wire encoding.
//!
//! Every field on the wire is a varint tag packing the field number and wire
//! type, followed by either a varint value or a varint length and that many
//! raw bytes. No schema is needed to decode: the decoder rebuilds a
//! field-number-keyed [`Message`] straight from the bytes.
//!
//! ## Scope
//! - Wire types 0 (varint) and 2 (length-delimited) only
//! - No nested messages, no fixed-width types, no schema language
//! - Reserved wire types fail the decode rather than being skipped
//!
//! ## Example
//! ```rust
//! use tagwire::{decode, Encoder};
//!
//! # fn main() -> tagwire::Result<()> {
//! let mut enc = Encoder::new();
//! enc.encode_varint_field(5, 103)?;
//! enc.encode_string_field(2, "pb by hand")?;
//! enc.encode_varint_field(3, 301)?;
//!
//! let message = decode(enc.finish())?;
//! assert_eq!(message.get_u64(5), Some(103));
//! assert_eq!(message.get_bytes(2).map(|b| b.as_ref()), Some(&b"pb by hand"[..]));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::config::{CodecConfig, LimitsConfig};
pub use crate::core::codec::MessageCodec;
pub use crate::core::decoder::{decode, decode_with_config, Decoder};
pub use crate::core::encoder::{encode, Encoder};
pub use crate::core::field::{Field, FieldValue, Message};
pub use crate::core::tag::{Tag, WireType, MAX_FIELD_NUMBER, MIN_FIELD_NUMBER};
pub use crate::core::varint::{decode_varint, encode_varint, encode_varint_to_vec};
pub use crate::error::{CodecError, Result};
