#![no_main]

use libfuzzer_sys::fuzz_target;
use testament_codec::decode;

fuzz_target!(|data: &[u8]| {
    // Try decoding arbitrary bytes as a ciphertext string.
    // decode must never panic — it should always return Ok or Err.
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = decode(s);

        // Also try with the "FHE-" tag prepended to exercise the tagged
        // parsing path on arbitrary payloads.
        let tagged = format!("FHE-{}", s);
        let _ = decode(&tagged);
    }
});
