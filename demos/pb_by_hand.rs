//! Encodes a small message by hand, prints its bytes, frames it and decodes it
//! again.
//!
//! Run with: `cargo run --example pb_by_hand`
//! Set `TAGWIRE_LOG_LEVEL=trace` to see every field the codec touches.

use bytes::BytesMut;
use std::sync::Arc;
use tagwire::config::CodecConfig;
use tagwire::utils::logging::init_logging;
use tagwire::utils::metrics::Metrics;
use tagwire::{CodecError, Encoder, FieldValue, MessageCodec};
use tokio_util::codec::{Decoder, Encoder as _};
use tracing::{error, info};

fn main() -> tagwire::Result<()> {
    let config = CodecConfig::from_env()?;
    config.validate_strict()?;
    init_logging(&config.logging)?;

    let mut enc = Encoder::new();
    enc.encode_varint_field(5, 103)?;
    enc.encode_string_field(2, "pb by hand")?;
    enc.encode_varint_field(3, 301)?;
    enc.encode_varint_field(4, 1)?;

    info!(bytes = enc.len(), dump = %enc, "encoded message");

    let metrics = Arc::new(Metrics::new());
    let mut codec =
        MessageCodec::with_limits(config.limits.clone())?.with_metrics(metrics.clone());

    let mut wire = BytesMut::new();
    codec.encode(enc.finish(), &mut wire)?;
    info!(frame_bytes = wire.len(), "framed message");

    let message = match codec.decode(&mut wire) {
        Ok(Some(message)) => message,
        Ok(None) => {
            let e = CodecError::InvalidArgument("frame incomplete".to_string());
            error!(error = %e, "decode failed");
            return Err(e);
        }
        Err(e) => {
            error!(error = %e, "decode failed");
            return Err(e);
        }
    };

    for field_number in message.field_numbers() {
        if let Some(field) = message.get(field_number) {
            match &field.value {
                FieldValue::Varint(v) => info!(field_number, value = v, "varint"),
                FieldValue::Bytes(b) => {
                    info!(field_number, value = %String::from_utf8_lossy(b), "bytes")
                }
            }
        }
    }

    metrics.log_metrics();
    Ok(())
}
