//! Fuzz target for header parsing and deserialization.
//!
//! ## Running
//!
//! ```bash
//! cd crates/prt-decoder
//! cargo +nightly fuzz run fuzz_parse_header
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use prt_decoder::{deserialize, parse_header, serialize, PrtError};

fuzz_target!(|data: &[u8]| {
    // Raw bytes: never panic, and only well-sized input can succeed
    match deserialize(data) {
        Ok(token) => {
            assert_eq!(data.len(), 79);
            assert_eq!(serialize(&token)[..], data[..]);
        }
        Err(PrtError::InvalidSize { actual, .. }) => assert_eq!(actual, data.len()),
        Err(_) => assert_eq!(data.len(), 79),
    }

    // Header text path
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(token) = parse_header(text) {
            assert_eq!(token.epoch_id_encoding.len(), 11);
            // Reparsing the stripped text yields the same token
            let again = parse_header(&token.header_text).expect("stripped header reparses");
            assert_eq!(again, token);
        }
    }
});
