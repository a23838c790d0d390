#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use tagwire::MessageCodec;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    // Drain frames until the codec needs more input or rejects the stream
    let mut codec = MessageCodec::new();
    let mut buf = BytesMut::from(data);
    while let Ok(Some(_)) = codec.decode(&mut buf) {}
});
