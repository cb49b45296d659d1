//! # Outbound Ports (Driven Ports / SPI)
//!
//! Key material lookup. The only part of decoding that may perform I/O.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::EpochKeys;

/// Error from a key provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyLookupError {
    /// No key material is published for the epoch
    #[error("No key material for epoch {0}")]
    NotFound(String),

    /// Local storage could not be read
    #[error("I/O error: {0}")]
    Io(String),

    /// Remote fetch failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Key material was found but could not be decoded
    #[error("Malformed key material: {0}")]
    Malformed(String),
}

/// Source of per-epoch key material.
///
/// Implementations must be thread-safe (`Send + Sync`). Retries and timeouts
/// are the implementation's or the caller's concern; the decoder calls once.
#[async_trait]
pub trait EpochKeyProvider: Send + Sync {
    /// Look up key material by URL-safe unpadded base64 of the epoch id.
    ///
    /// # Errors
    /// * `KeyLookupError::NotFound` - Nothing is published for this epoch
    /// * `KeyLookupError::Malformed` - The published material is unusable
    async fn lookup(&self, epoch_id_encoding: &str) -> Result<EpochKeys, KeyLookupError>;
}
