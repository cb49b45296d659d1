//! # PRT Decoder Service
//!
//! Application service layer that implements the `TokenDecoderApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`TokenDecoderApi`)
//! - Uses the outbound port (`EpochKeyProvider`) to fetch key material
//! - Delegates parsing, decryption and verification to the domain layer
//!
//! Key lookup finishes (or fails) before any curve work starts; no stage
//! retries and a failing stage stops the pipeline for that token only.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::domain::codec;
use crate::domain::config::ProtocolConfig;
use crate::domain::curve::{CurveBackend, P256};
use crate::domain::decrypt::CurveDecryptor;
use crate::domain::entities::{
    BatchDecodeResult, DecodedToken, DecryptionResult, EpochKeys, PlaintextFields,
    PlaintextToken, Token,
};
use crate::domain::errors::PrtError;
use crate::domain::mac;
use crate::domain::payload::PayloadParser;
use crate::ports::inbound::TokenDecoderApi;
use crate::ports::outbound::EpochKeyProvider;

/// PRT Decoder Service.
///
/// Generic over the key source and the curve backend (P-256 by default).
pub struct PrtDecoderService<K: EpochKeyProvider, C: CurveBackend = P256> {
    keys: K,
    decryptor: CurveDecryptor<C>,
    parser: PayloadParser,
}

impl<K: EpochKeyProvider> PrtDecoderService<K, P256> {
    /// Create a P-256 service with default protocol parameters.
    ///
    /// # Arguments
    /// * `keys` - The key provider consulted by `decode_header`
    pub fn new(keys: K) -> Self {
        Self::with_curve(keys, P256, &ProtocolConfig::default())
    }
}

impl<K: EpochKeyProvider, C: CurveBackend> PrtDecoderService<K, C> {
    /// Create a service over an explicit curve backend and protocol config.
    pub fn with_curve(keys: K, curve: C, config: &ProtocolConfig) -> Self {
        Self {
            keys,
            decryptor: CurveDecryptor::with_config(curve, config),
            parser: PayloadParser::with_config(config),
        }
    }

    /// The key provider.
    pub fn key_provider(&self) -> &K {
        &self.keys
    }

    /// Decode a header, fetching key material through the key provider.
    pub async fn decode_header(&self, header: &str) -> Result<DecodedToken, PrtError> {
        let token = self.parse_header(header)?;
        let epoch = token.epoch_id_encoding.clone();

        debug!(epoch = %epoch, version = token.version, "Looking up epoch keys");
        let keys = self.keys.lookup(&epoch).await.map_err(|e| {
            warn!(epoch = %epoch, error = %e, "Key lookup failed");
            PrtError::KeyNotFound {
                epoch: epoch.clone(),
                reason: e.to_string(),
            }
        })?;

        self.decode_token(token, &keys)
    }

    fn decode_token(&self, token: Token, keys: &EpochKeys) -> Result<DecodedToken, PrtError> {
        let decrypted = self.decrypt(&token, keys)?;
        let fields = self.parse_plaintext(&decrypted.plaintext)?;
        let plaintext_token = self.verify(&fields, &decrypted.hmac_secret);

        if plaintext_token.hmac_valid {
            debug!(
                epoch = %token.epoch_id_encoding,
                ordinal = plaintext_token.ordinal,
                "Token verified"
            );
        } else {
            warn!(
                epoch = %token.epoch_id_encoding,
                ordinal = plaintext_token.ordinal,
                "HMAC mismatch"
            );
        }

        Ok(DecodedToken {
            token,
            plaintext: decrypted.plaintext.clone(),
            plaintext_token,
        })
    }
}

impl<K: EpochKeyProvider, C: CurveBackend> TokenDecoderApi for PrtDecoderService<K, C> {
    fn parse_header(&self, header: &str) -> Result<Token, PrtError> {
        codec::parse_header(header).inspect_err(|e| {
            warn!(error = %e, "Failed to parse token header");
        })
    }

    fn decrypt(&self, token: &Token, keys: &EpochKeys) -> Result<DecryptionResult, PrtError> {
        self.decryptor.decrypt_token(token, keys).inspect_err(|e| {
            warn!(
                epoch = %token.epoch_id_encoding,
                curve = self.decryptor.curve().name(),
                error = %e,
                "Decryption failed"
            );
        })
    }

    fn parse_plaintext(&self, plaintext: &[u8]) -> Result<PlaintextFields, PrtError> {
        self.parser.parse(plaintext).inspect_err(|e| {
            warn!(error = %e, "Cannot parse plaintext");
        })
    }

    fn verify(&self, fields: &PlaintextFields, hmac_secret: &[u8]) -> PlaintextToken {
        mac::verify_fields(fields, hmac_secret)
    }

    fn decode_with_keys(&self, header: &str, keys: &EpochKeys) -> Result<DecodedToken, PrtError> {
        let token = self.parse_header(header)?;
        self.decode_token(token, keys)
    }

    fn decode_batch(
        &self,
        headers: &[String],
        keyring: &HashMap<String, EpochKeys>,
    ) -> BatchDecodeResult {
        let results: Vec<Result<DecodedToken, PrtError>> = headers
            .par_iter()
            .map(|header| {
                let token = self.parse_header(header)?;
                let keys = keyring.get(&token.epoch_id_encoding).ok_or_else(|| {
                    PrtError::KeyNotFound {
                        epoch: token.epoch_id_encoding.clone(),
                        reason: "not in keyring".to_string(),
                    }
                })?;
                self.decode_token(token, keys)
            })
            .collect();

        let batch = BatchDecodeResult::from_results(results);
        info!(
            total = batch.results.len(),
            verified = batch.verified_count,
            unverified = batch.unverified_count,
            failed = batch.failed_count,
            "Batch decode finished"
        );
        batch
    }
}
