//! # Protocol Configuration
//!
//! Scheme constants that a protocol revision may change. Defaults match the
//! deployed token format.

use serde::Deserialize;
use thiserror::Error;

use super::entities::PLAINTEXT_LAYOUT_LEN;

/// Default padding shifted into the embedded x-coordinate (3 bytes).
pub const DEFAULT_PADDING_BITS: u32 = 24;

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },

    /// Config file is not valid TOML or has the wrong shape
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Values are out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Token protocol parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtocolConfig {
    /// Bits removed from the decrypted x-coordinate by right shift
    pub padding_bits: u32,
    /// Shortest plaintext the payload parser accepts
    pub min_plaintext_len: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            padding_bits: DEFAULT_PADDING_BITS,
            min_plaintext_len: PLAINTEXT_LAYOUT_LEN,
        }
    }
}

impl ProtocolConfig {
    /// Check that the values fit a 256-bit curve and the fixed field offsets.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.padding_bits >= 256 {
            return Err(ConfigError::Invalid(format!(
                "padding_bits must be below 256, got {}",
                self.padding_bits
            )));
        }
        if self.min_plaintext_len < PLAINTEXT_LAYOUT_LEN {
            return Err(ConfigError::Invalid(format!(
                "min_plaintext_len must be at least {}, got {}",
                PLAINTEXT_LAYOUT_LEN, self.min_plaintext_len
            )));
        }
        Ok(())
    }
}
