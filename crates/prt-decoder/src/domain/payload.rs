//! # Payload Parser
//!
//! Splits decrypted plaintext into its fixed fields:
//! byte 0 version, byte 1 ordinal, bytes 2..18 signal, bytes 18..26 MAC.
//! Bytes past the layout are ignored.

use super::config::ProtocolConfig;
use super::entities::{PlaintextFields, MAC_SIZE, PLAINTEXT_LAYOUT_LEN, SIGNAL_SIZE};
use super::errors::PrtError;

const SIGNAL_OFFSET: usize = 2;
const MAC_OFFSET: usize = SIGNAL_OFFSET + SIGNAL_SIZE;

/// Parser for decrypted PRT payloads.
#[derive(Debug, Clone, Copy)]
pub struct PayloadParser {
    min_len: usize,
}

impl Default for PayloadParser {
    fn default() -> Self {
        Self {
            min_len: PLAINTEXT_LAYOUT_LEN,
        }
    }
}

impl PayloadParser {
    /// Create a parser using the minimum length from `config`.
    ///
    /// The minimum never drops below the fixed layout length.
    pub fn with_config(config: &ProtocolConfig) -> Self {
        Self {
            min_len: config.min_plaintext_len.max(PLAINTEXT_LAYOUT_LEN),
        }
    }

    /// Split plaintext into version, ordinal, signal and received MAC.
    pub fn parse(&self, plaintext: &[u8]) -> Result<PlaintextFields, PrtError> {
        if plaintext.len() < self.min_len {
            return Err(PrtError::PlaintextTooShort {
                minimum: self.min_len,
                actual: plaintext.len(),
            });
        }

        let mut signal = [0u8; SIGNAL_SIZE];
        signal.copy_from_slice(&plaintext[SIGNAL_OFFSET..MAC_OFFSET]);

        let mut received_mac = [0u8; MAC_SIZE];
        received_mac.copy_from_slice(&plaintext[MAC_OFFSET..MAC_OFFSET + MAC_SIZE]);

        Ok(PlaintextFields {
            version: plaintext[0],
            ordinal: plaintext[1],
            signal,
            received_mac,
        })
    }
}
