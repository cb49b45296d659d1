//! # Decoder Errors
//!
//! Failure taxonomy for the decode pipeline. Every stage fails fast with one
//! of these; a MAC mismatch is not an error and surfaces as
//! `PlaintextToken::hmac_valid == false`.

use std::fmt;
use thiserror::Error;

/// Length-prefixed fields of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenField {
    /// `U = r·G`
    U,
    /// `E = M + r·PK`
    E,
}

impl fmt::Display for TokenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenField::U => f.write_str("u"),
            TokenField::E => f.write_str("e"),
        }
    }
}

/// Errors that can occur while decoding a token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrtError {
    /// Header text is not valid base64 after delimiter stripping
    #[error("Invalid header encoding: {reason}")]
    InvalidHeaderEncoding { reason: String },

    /// Serialized token has the wrong total length
    #[error("Invalid PRT size: {actual}, expected: {expected}")]
    InvalidSize { expected: usize, actual: usize },

    /// A length prefix does not match the compressed point size
    #[error("Invalid {field}_size: {actual}, expected: {expected}")]
    InvalidFieldSize {
        field: TokenField,
        expected: usize,
        actual: usize,
    },

    /// Malformed point or scalar, or a degenerate curve result
    #[error("Curve decode error: {reason}")]
    CurveDecode { reason: String },

    /// Decrypted plaintext cannot hold the fixed payload layout
    #[error("Plaintext too short: {actual} bytes, need at least {minimum}")]
    PlaintextTooShort { minimum: usize, actual: usize },

    /// Key material for the epoch could not be obtained
    #[error("Key not found for epoch {epoch}: {reason}")]
    KeyNotFound { epoch: String, reason: String },
}

impl PrtError {
    pub(crate) fn curve(reason: impl Into<String>) -> Self {
        PrtError::CurveDecode {
            reason: reason.into(),
        }
    }
}
