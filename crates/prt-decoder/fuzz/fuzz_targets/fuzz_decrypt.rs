//! Fuzz target for curve decryption and plaintext parsing.
//!
//! ## Running
//!
//! ```bash
//! cd crates/prt-decoder
//! cargo +nightly fuzz run fuzz_decrypt
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use prt_decoder::{CurveDecryptor, PayloadParser, P256};

/// Fuzz input structure for decryption.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    u: [u8; 33],
    e: [u8; 33],
    private_scalar: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let decryptor = CurveDecryptor::new(P256);

    // Decrypt - this should NEVER panic, regardless of input
    let result = decryptor.decrypt(&input.u, &input.e, &input.private_scalar);

    // 1. Deterministic
    let again = decryptor.decrypt(&input.u, &input.e, &input.private_scalar);
    assert_eq!(result, again);

    // 2. Minimal encoding: at most 29 bytes, no leading zero unless the value is zero
    if let Ok(plaintext) = result {
        assert!(!plaintext.is_empty() && plaintext.len() <= 29);
        assert!(plaintext[0] != 0 || plaintext.len() == 1);

        let _ = PayloadParser::default().parse(&plaintext);
    }
});
