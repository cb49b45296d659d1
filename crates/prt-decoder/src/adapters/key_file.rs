//! Published key file format.
//!
//! ```json
//! {
//!   "eg":   { "kty": "EC", "crv": "P-256", "d": "<base64>", ... },
//!   "hmac": { "kty": "oct", "k": "<base64>", ... }
//! }
//! ```
//!
//! Only `eg.d` and `hmac.k` are read. Both accept the URL-safe or standard
//! alphabet, with or without padding. Whitespace and non-zero trailing bits
//! are tolerated, as they are for headers.

use std::fmt;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::entities::EpochKeys;
use crate::ports::outbound::KeyLookupError;

const KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Parsed key file.
#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyFile {
    eg: ElGamalKey,
    hmac: HmacKey,
}

#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
struct ElGamalKey {
    d: String,
}

#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
struct HmacKey {
    k: String,
}

impl fmt::Debug for KeyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyFile { <redacted> }")
    }
}

impl KeyFile {
    /// Parse a key file from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyLookupError> {
        serde_json::from_slice(bytes).map_err(|e| KeyLookupError::Malformed(e.to_string()))
    }

    /// Decode the private scalar and HMAC secret.
    pub fn to_epoch_keys(&self) -> Result<EpochKeys, KeyLookupError> {
        let private_scalar = decode_key_field("eg.d", &self.eg.d)?;
        let hmac_secret = decode_key_field("hmac.k", &self.hmac.k)?;
        Ok(EpochKeys::new(private_scalar, hmac_secret))
    }
}

fn decode_key_field(name: &str, value: &str) -> Result<Vec<u8>, KeyLookupError> {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    KEY_ENGINE
        .decode(normalized.as_bytes())
        .map_err(|e| KeyLookupError::Malformed(format!("{name}: {e}")))
}
