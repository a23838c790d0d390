#![no_main]

use libfuzzer_sys::fuzz_target;
use tagwire::decode;

fuzz_target!(|data: &[u8]| {
    // Fuzz message decoding - test for panics, crashes, infinite loops
    if let Ok(msg) = decode(data.to_vec()) {
        // Anything that decodes must re-encode and decode to the same message
        if let Ok(bytes) = msg.encode() {
            assert_eq!(decode(bytes).ok(), Some(msg));
        }
    }
});
