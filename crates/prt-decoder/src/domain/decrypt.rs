//! # Curve Decryptor
//!
//! EC-ElGamal decryption of the `(U, E)` pair.
//!
//! The encrypter embeds the payload `x` as the x-coordinate of a point `M`,
//! shifted left by the padding width so the low bits can be searched for a
//! valid curve point, and publishes `(U, E) = (r·G, M + r·PK)`. Decryption
//! computes `M = E - d·U` and shifts the padding back out of `M.x`.

use super::config::{ProtocolConfig, DEFAULT_PADDING_BITS};
use super::curve::{CurveBackend, P256};
use super::entities::{DecryptionResult, EpochKeys, Token};
use super::errors::PrtError;

/// Decrypts PRT ciphertexts over a curve backend.
#[derive(Debug, Clone)]
pub struct CurveDecryptor<C: CurveBackend = P256> {
    curve: C,
    padding_bits: u32,
}

impl Default for CurveDecryptor<P256> {
    fn default() -> Self {
        Self::new(P256)
    }
}

impl<C: CurveBackend> CurveDecryptor<C> {
    /// Create a decryptor with the default 24-bit padding.
    pub fn new(curve: C) -> Self {
        Self {
            curve,
            padding_bits: DEFAULT_PADDING_BITS,
        }
    }

    /// Create a decryptor using the padding width from `config`.
    pub fn with_config(curve: C, config: &ProtocolConfig) -> Self {
        Self {
            curve,
            padding_bits: config.padding_bits,
        }
    }

    /// The curve backend in use.
    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// Recover the plaintext bytes from compressed `u`, `e` and a private scalar.
    ///
    /// The result is the minimal big-endian encoding of `M.x >> padding_bits`;
    /// leading zero bytes are not preserved.
    pub fn decrypt(&self, u: &[u8], e: &[u8], private_scalar: &[u8]) -> Result<Vec<u8>, PrtError> {
        let point_u = self.curve.decode_point(u)?;
        let point_e = self.curve.decode_point(e)?;
        let d = self.curve.decode_scalar(private_scalar)?;

        let xu = self.curve.scalar_multiply(&point_u, &d);
        let decrypted = self.curve.point_add(&point_e, &self.curve.point_negate(&xu));
        let x = self.curve.x_coordinate(&decrypted)?;

        Ok(shift_right_minimal(&x, self.padding_bits))
    }

    /// Decrypt a token with its epoch's key material.
    pub fn decrypt_token(
        &self,
        token: &Token,
        keys: &EpochKeys,
    ) -> Result<DecryptionResult, PrtError> {
        let plaintext = self.decrypt(&token.u, &token.e, &keys.private_scalar)?;
        Ok(DecryptionResult {
            plaintext,
            hmac_secret: keys.hmac_secret.clone(),
        })
    }
}

/// Right-shift a big-endian unsigned integer and return its minimal
/// big-endian encoding. Zero encodes as a single `0x00` byte.
pub fn shift_right_minimal(value: &[u8], bits: u32) -> Vec<u8> {
    let byte_shift = (bits / 8) as usize;
    let bit_shift = bits % 8;
    let kept = value.len().saturating_sub(byte_shift);

    let mut out: Vec<u8> = (0..kept)
        .map(|i| {
            let high = value[i] >> bit_shift;
            let carry = if bit_shift == 0 || i == 0 {
                0
            } else {
                value[i - 1] << (8 - bit_shift)
            };
            high | carry
        })
        .collect();

    let first = out.iter().position(|&b| b != 0).unwrap_or(out.len());
    out.drain(..first);
    if out.is_empty() {
        out.push(0);
    }
    out
}
