//! # Truncated HMAC Verification
//!
//! `mac = HMAC-SHA256(hmac_secret, version || ordinal || signal)[..8]`
//!
//! ## Security: Constant-Time Comparison
//!
//! The received tag is compared with `subtle`, so all 8 bytes are examined
//! whether or not an early byte differs.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::entities::{PlaintextFields, PlaintextToken, MAC_SIZE};

type HmacSha256 = Hmac<Sha256>;

/// Compute the truncated MAC over the authenticated fields.
///
/// Returns `None` only if the MAC implementation rejects the key length,
/// which HMAC does not do for any length.
pub fn compute_truncated_mac(
    version: u8,
    ordinal: u8,
    signal: &[u8],
    hmac_secret: &[u8],
) -> Option<[u8; MAC_SIZE]> {
    let mut mac = HmacSha256::new_from_slice(hmac_secret).ok()?;
    mac.update(&[version, ordinal]);
    mac.update(signal);
    let digest = mac.finalize().into_bytes();

    let mut truncated = [0u8; MAC_SIZE];
    truncated.copy_from_slice(&digest[..MAC_SIZE]);
    Some(truncated)
}

/// Whether `received_mac` equals the recomputed truncated MAC.
pub fn verify_mac(
    version: u8,
    ordinal: u8,
    signal: &[u8],
    received_mac: &[u8],
    hmac_secret: &[u8],
) -> bool {
    let expected = match compute_truncated_mac(version, ordinal, signal, hmac_secret) {
        Some(m) => m,
        None => return false,
    };

    if received_mac.len() != expected.len() {
        return false;
    }

    received_mac.ct_eq(&expected[..]).into()
}

/// Verify parsed fields and drop the received MAC.
pub fn verify_fields(fields: &PlaintextFields, hmac_secret: &[u8]) -> PlaintextToken {
    let hmac_valid = verify_mac(
        fields.version,
        fields.ordinal,
        &fields.signal,
        &fields.received_mac,
        hmac_secret,
    );

    PlaintextToken {
        version: fields.version,
        ordinal: fields.ordinal,
        signal: fields.signal,
        hmac_valid,
    }
}
