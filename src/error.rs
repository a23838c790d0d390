//! # Error Types
//!
//! Error handling for the wire codec.
//!
//! Every failure the encoder, decoder or framing codec can hit is a
//! [`CodecError`] value built at the point of failure. Decoding is
//! all-or-nothing: any error aborts the pass and no partial message escapes.
//!
//! ## Error Categories
//! - **Malformed input**: truncated varints, truncated payloads, varint
//!   overflow, out-of-range field numbers
//! - **Unsupported features**: reserved wire types (1, 3, 4, 5, 6, 7)
//! - **Caller errors**: invalid field numbers or wire types handed to the encoder
//! - **Limits**: oversized messages, too many fields
//! - **I/O and configuration**: framing-layer I/O and config loading
//!
//! Running out of input exactly at a tag boundary is *not* an error; it is
//! how a decode pass finishes.
//!
//! ## Example Usage
//! ```rust
//! use tagwire::error::CodecError;
//! use tracing::{error, info};
//!
//! // tag for field 1 with wire type 5
//! match tagwire::decode(vec![0x0D]) {
//!     Ok(message) => info!(fields = message.len(), "decoded"),
//!     Err(e @ CodecError::UnsupportedWireType { .. }) => error!(error = %e, "rejected"),
//!     Err(e) => error!(error = %e, "decode failed"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Encoder argument errors
    pub const ERR_FIELD_NUMBER_ZERO: &str = "field number must be at least 1";
    pub const ERR_FIELD_NUMBER_TOO_LARGE: &str = "field number exceeds 2^29 - 1";
    pub const ERR_NOT_LENGTH_DELIMITED: &str =
        "encode_field only accepts length-delimited payloads";

    /// Config errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
}

// CodecError is the single error type for every codec operation
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum CodecError {
    #[error("truncated varint at offset {offset}")]
    TruncatedVarint { offset: usize },

    #[error("varint at offset {offset} does not fit in 64 bits")]
    VarintOverflow { offset: usize },

    #[error(
        "truncated payload at offset {offset}: declared {declared} bytes, {remaining} remaining"
    )]
    TruncatedPayload {
        offset: usize,
        declared: u64,
        remaining: usize,
    },

    #[error("unsupported wire type {wire_type} at offset {offset}")]
    UnsupportedWireType { wire_type: u8, offset: usize },

    #[error("invalid field number {field_number} at offset {offset}")]
    InvalidFieldNumber { field_number: u64, offset: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Message too large: {size} bytes (limit {limit})")]
    OversizedMessage { size: usize, limit: usize },

    #[error("Too many fields: limit is {limit}")]
    TooManyFields { limit: usize },

    #[error("I/O error: {0}")]
    #[serde(skip_serializing, skip_deserializing)]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CodecError {
    /// True when the error means the input bytes themselves are malformed,
    /// as opposed to a caller, limit, I/O or configuration problem.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            CodecError::TruncatedVarint { .. }
                | CodecError::VarintOverflow { .. }
                | CodecError::TruncatedPayload { .. }
                | CodecError::UnsupportedWireType { .. }
                | CodecError::InvalidFieldNumber { .. }
        )
    }

    /// Byte offset into the input at which decoding failed, if known.
    pub fn offset(&self) -> Option<usize> {
        match *self {
            CodecError::TruncatedVarint { offset }
            | CodecError::VarintOverflow { offset }
            | CodecError::TruncatedPayload { offset, .. }
            | CodecError::UnsupportedWireType { offset, .. }
            | CodecError::InvalidFieldNumber { offset, .. } => Some(offset),
            _ => None,
        }
    }
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
