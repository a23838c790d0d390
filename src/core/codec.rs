//! # Message Framing Codec
//!
//! Puts whole messages on a byte stream. Each frame is the message's byte
//! length as a varint followed by the encoded message:
//!
//! ```text
//! [varint len] [len bytes of tag/value pairs]
//! ```
//!
//! Plugs into `tokio_util::codec::{FramedRead, FramedWrite, Framed}`.
//! Incomplete frames leave the read buffer untouched; complete frames are
//! split off without copying and decoded in place.

use crate::config::LimitsConfig;
use crate::core::decoder::decode_with_config;
use crate::core::field::Message;
use crate::core::varint::{decode_varint, encode_varint, encoded_len};
use crate::error::{CodecError, Result};
use crate::utils::metrics::Metrics;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::sync::Arc;
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

/// Length-prefixed message framing
#[derive(Debug, Clone, Default)]
pub struct MessageCodec {
    limits: LimitsConfig,
    metrics: Option<Arc<Metrics>>,
}

impl MessageCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec enforcing `limits`.
    ///
    /// # Errors
    /// Returns `ConfigError` if the limits fail [`LimitsConfig::validate`].
    pub fn with_limits(limits: LimitsConfig) -> Result<Self> {
        let errors = limits.validate();
        if !errors.is_empty() {
            return Err(CodecError::ConfigError(errors.join("; ")));
        }
        Ok(Self {
            limits,
            metrics: None,
        })
    }

    /// Count frames and bytes into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    fn check_size(&self, size: usize) -> Result<()> {
        if size > self.limits.max_message_size {
            if let Some(m) = &self.metrics {
                m.oversized_frame();
            }
            warn!(
                size,
                limit = self.limits.max_message_size,
                "rejecting oversized frame"
            );
            return Err(CodecError::OversizedMessage {
                size,
                limit: self.limits.max_message_size,
            });
        }
        Ok(())
    }

    fn write_frame(&self, body: &[u8], dst: &mut BytesMut) -> Result<()> {
        self.check_size(body.len())?;
        dst.reserve(encoded_len(body.len() as u64) + body.len());
        encode_varint(body.len() as u64, dst);
        dst.put_slice(body);

        if let Some(m) = &self.metrics {
            m.message_encoded(body.len() as u64);
        }
        Ok(())
    }
}

impl Decoder for MessageCodec {
    type Item = Message;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Message>> {
        if src.is_empty() {
            return Ok(None);
        }

        let (declared, prefix_len) = match decode_varint(&src[..], 0) {
            Ok(prefix) => prefix,
            // prefix not fully arrived yet
            Err(CodecError::TruncatedVarint { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        let body_len = usize::try_from(declared).unwrap_or(usize::MAX);
        self.check_size(body_len)?;

        let frame_len = prefix_len
            .checked_add(body_len)
            .ok_or(CodecError::OversizedMessage {
                size: body_len,
                limit: self.limits.max_message_size,
            })?;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        src.advance(prefix_len);
        let body = src.split_to(body_len).freeze();

        match decode_with_config(body, &self.limits) {
            Ok(message) => {
                if let Some(m) = &self.metrics {
                    m.message_decoded(body_len as u64);
                }
                Ok(Some(message))
            }
            Err(e) => {
                if let Some(m) = &self.metrics {
                    m.decode_error();
                }
                Err(e)
            }
        }
    }
}

impl Encoder<Message> for MessageCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<()> {
        let body = item.encode()?;
        self.write_frame(&body, dst)
    }
}

/// Frames an already-encoded message body
impl Encoder<Bytes> for MessageCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<()> {
        self.write_frame(&item, dst)
    }
}
