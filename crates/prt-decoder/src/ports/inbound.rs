//! # Inbound Ports (Driving Ports / API)
//!
//! The synchronous decode pipeline. Key lookup is not part of this trait;
//! callers either pass key material in or use the service's async
//! `decode_header`.

use std::collections::HashMap;

use crate::domain::entities::{
    BatchDecodeResult, DecodedToken, DecryptionResult, EpochKeys, PlaintextFields,
    PlaintextToken, Token,
};
use crate::domain::errors::PrtError;

/// Primary token decoding API.
///
/// Every stage is pure and independent per token; implementations must be
/// thread-safe (`Send + Sync`).
pub trait TokenDecoderApi: Send + Sync {
    /// Strip delimiters, base64-decode and deserialize a header value.
    fn parse_header(&self, header: &str) -> Result<Token, PrtError>;

    /// Recover the plaintext bytes of a token.
    fn decrypt(&self, token: &Token, keys: &EpochKeys) -> Result<DecryptionResult, PrtError>;

    /// Split plaintext into its fixed fields.
    fn parse_plaintext(&self, plaintext: &[u8]) -> Result<PlaintextFields, PrtError>;

    /// Recompute and compare the truncated MAC.
    fn verify(&self, fields: &PlaintextFields, hmac_secret: &[u8]) -> PlaintextToken;

    /// Run every stage with caller-supplied key material.
    fn decode_with_keys(&self, header: &str, keys: &EpochKeys) -> Result<DecodedToken, PrtError>;

    /// Decode independent headers in parallel.
    ///
    /// `keyring` maps epoch id encodings to key material; a header whose
    /// epoch is absent fails with `KeyNotFound` without affecting the others.
    fn decode_batch(
        &self,
        headers: &[String],
        keyring: &HashMap<String, EpochKeys>,
    ) -> BatchDecodeResult;
}
