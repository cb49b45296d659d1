//! # PRT Decoder
//!
//! Decodes and verifies Probabilistic Reveal Tokens (PRT): a 79-byte token,
//! carried as a base64 header value, that hides a 16-byte signal inside an
//! EC-ElGamal ciphertext and authenticates it with a truncated HMAC-SHA256.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure codec, curve and MAC logic, no I/O
//! - **Ports Layer** (`ports/`): Inbound pipeline API, outbound key lookup
//! - **Adapters Layer** (`adapters/`): Key providers (memory, files, HTTP)
//! - **Service Layer** (`service.rs`): Wires key lookup to the domain pipeline
//!
//! ## Pipeline
//!
//! ```text
//! header ──parse_header──→ Token ──(epoch encoding)──→ EpochKeyProvider
//!                            │                              │
//!                            ↓                              ↓
//!                       CurveDecryptor ←──── private scalar, hmac secret
//!                            │
//!                            ↓
//!                  PayloadParser ──→ HmacVerifier ──→ PlaintextToken
//!                                                          │
//!                                                          ↓
//!                                                   SignalFormatter
//! ```
//!
//! ## Security Notes
//!
//! - MAC comparison runs in constant time over all 8 bytes (`subtle`)
//! - Key material is zeroized on drop and redacted from `Debug`
//! - A MAC mismatch is reported as `hmac_valid == false`, never as an error

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{FileKeyProvider, KeyFile, StaticKeyProvider};
#[cfg(feature = "http")]
pub use adapters::HttpKeyProvider;
pub use domain::codec::{deserialize, encode_epoch_id, parse_header, serialize};
pub use domain::config::{ConfigError, ProtocolConfig};
pub use domain::curve::{CurveBackend, CurveKind, P256, Secp256k1};
pub use domain::decrypt::CurveDecryptor;
pub use domain::entities::{
    BatchDecodeResult, DecodedToken, DecryptionResult, EpochKeys, PlaintextFields,
    PlaintextToken, Token,
};
pub use domain::errors::{PrtError, TokenField};
pub use domain::mac::{compute_truncated_mac, verify_mac};
pub use domain::payload::PayloadParser;
pub use domain::signal::{format_signal, SignalDisplay};
pub use ports::inbound::TokenDecoderApi;
pub use ports::outbound::{EpochKeyProvider, KeyLookupError};
pub use service::PrtDecoderService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
