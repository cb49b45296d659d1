//! # Domain Entities
//!
//! Immutable value records produced once per decode attempt.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::PrtError;
use super::signal::{format_signal, SignalDisplay};

// =============================================================================
// Wire Layout Constants
// =============================================================================

/// Total serialized token size in bytes.
pub const PRT_SIZE: usize = 79;

/// SEC1 compressed point size for 256-bit curves.
pub const PRT_POINT_SIZE: usize = 33;

/// Epoch identifier size in bytes.
pub const EPOCH_ID_SIZE: usize = 8;

/// Revealed signal size in bytes.
pub const SIGNAL_SIZE: usize = 16;

/// Truncated HMAC-SHA256 tag size in bytes.
pub const MAC_SIZE: usize = 8;

/// Bytes covered by the plaintext layout: version, ordinal, signal, MAC.
pub const PLAINTEXT_LAYOUT_LEN: usize = 1 + 1 + SIGNAL_SIZE + MAC_SIZE;

// =============================================================================
// Token Types
// =============================================================================

/// A deserialized Probabilistic Reveal Token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Format discriminator
    pub version: u8,
    /// `U = r·G`, SEC1 compressed
    pub u: [u8; PRT_POINT_SIZE],
    /// `E = M + r·PK`, SEC1 compressed
    pub e: [u8; PRT_POINT_SIZE],
    /// Selects the key material
    pub epoch_id: [u8; EPOCH_ID_SIZE],
    /// URL-safe unpadded base64 of `epoch_id`, the key lookup index
    pub epoch_id_encoding: String,
    /// Delimiter-stripped header text this token was parsed from
    pub header_text: String,
}

/// Output of the curve decryption step.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DecryptionResult {
    /// Minimal big-endian encoding of the recovered integer
    pub plaintext: Vec<u8>,
    /// HMAC secret supplied by the key lookup
    pub hmac_secret: Vec<u8>,
}

impl fmt::Debug for DecryptionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptionResult")
            .field("plaintext_len", &self.plaintext.len())
            .field("hmac_secret", &"<redacted>")
            .finish()
    }
}

/// Fields split out of a decrypted plaintext, before MAC verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaintextFields {
    pub version: u8,
    /// Rotating counter (`t_ord`)
    pub ordinal: u8,
    pub signal: [u8; SIGNAL_SIZE],
    pub received_mac: [u8; MAC_SIZE],
}

/// Verified view of a plaintext. The received MAC is consumed by verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaintextToken {
    pub version: u8,
    pub ordinal: u8,
    pub signal: [u8; SIGNAL_SIZE],
    pub hmac_valid: bool,
}

impl PlaintextToken {
    /// Classify the signal for display.
    pub fn signal_display(&self) -> SignalDisplay {
        format_signal(&self.signal)
    }
}

// =============================================================================
// Key Material
// =============================================================================

/// Per-epoch key material returned by the key lookup collaborator.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EpochKeys {
    /// ElGamal private scalar, big-endian
    pub private_scalar: Vec<u8>,
    /// HMAC-SHA256 key
    pub hmac_secret: Vec<u8>,
}

impl EpochKeys {
    /// Create key material from raw byte sequences.
    pub fn new(private_scalar: impl Into<Vec<u8>>, hmac_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            private_scalar: private_scalar.into(),
            hmac_secret: hmac_secret.into(),
        }
    }
}

impl fmt::Debug for EpochKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EpochKeys")
            .field("private_scalar", &"<redacted>")
            .field("hmac_secret", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Pipeline Results
// =============================================================================

/// Everything recovered from one header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedToken {
    pub token: Token,
    /// Raw decrypted bytes, including the received MAC and any trailing slack
    pub plaintext: Vec<u8>,
    pub plaintext_token: PlaintextToken,
}

impl DecodedToken {
    /// Whether the recomputed MAC matched.
    pub fn is_verified(&self) -> bool {
        self.plaintext_token.hmac_valid
    }
}

/// Outcome of decoding several independent headers.
#[derive(Debug)]
pub struct BatchDecodeResult {
    /// One entry per input header, in input order
    pub results: Vec<Result<DecodedToken, PrtError>>,
    /// Decoded with a matching MAC
    pub verified_count: usize,
    /// Decoded but the MAC did not match
    pub unverified_count: usize,
    /// Failed at some pipeline stage
    pub failed_count: usize,
}

impl BatchDecodeResult {
    /// Create a batch result from individual results.
    pub fn from_results(results: Vec<Result<DecodedToken, PrtError>>) -> Self {
        let verified_count = results
            .iter()
            .filter(|r| matches!(r, Ok(d) if d.is_verified()))
            .count();
        let failed_count = results.iter().filter(|r| r.is_err()).count();
        let unverified_count = results.len() - verified_count - failed_count;

        Self {
            results,
            verified_count,
            unverified_count,
            failed_count,
        }
    }

    /// Whether every header decoded and verified.
    pub fn all_verified(&self) -> bool {
        self.verified_count == self.results.len()
    }
}
