//! Rendering of a decoded token for the terminal or as JSON.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use prt_decoder::{CurveKind, DecodedToken, SignalDisplay};
use serde::Serialize;

/// Inspection result for one header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub epoch: String,
    pub curve: String,
    /// Base64 of the full decrypted plaintext
    pub decrypted_token: String,
    pub decrypted_length: usize,
    pub version: u8,
    pub ordinal: u8,
    /// Hex of the raw 16-byte signal
    pub signal_hex: String,
    /// `all_zero`, `ipv4`, `ipv6` or `raw`
    pub signal_kind: &'static str,
    /// Rendered signal line
    pub signal: String,
    pub hmac_valid: bool,
}

impl InspectReport {
    /// Build a report from a pipeline result.
    pub fn new(decoded: &DecodedToken, curve: CurveKind) -> Self {
        let pt = &decoded.plaintext_token;
        let display = pt.signal_display();
        let signal_kind = match display {
            SignalDisplay::AllZero(_) => "all_zero",
            SignalDisplay::Ipv4(_) => "ipv4",
            SignalDisplay::Ipv6(_) => "ipv6",
            SignalDisplay::Raw(_) => "raw",
        };

        Self {
            epoch: decoded.token.epoch_id_encoding.clone(),
            curve: curve.to_string(),
            decrypted_token: STANDARD.encode(&decoded.plaintext),
            decrypted_length: decoded.plaintext.len(),
            version: pt.version,
            ordinal: pt.ordinal,
            signal_hex: hex::encode(pt.signal),
            signal_kind,
            signal: display.to_string(),
            hmac_valid: pt.hmac_valid,
        }
    }

    /// Human-readable lines.
    pub fn text_lines(&self) -> Vec<String> {
        vec![
            format!("Decrypted Token Bytes: {}", self.decrypted_token),
            format!("Decrypted Token Length: {} bytes", self.decrypted_length),
            format!("Version: {}", self.version),
            format!("t_ord: {}", self.ordinal),
            self.signal.clone(),
            format!("HMAC Verification successful: {}", self.hmac_valid),
        ]
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prt_decoder::{PlaintextToken, Token};

    fn decoded(signal: [u8; 16], hmac_valid: bool) -> DecodedToken {
        let mut plaintext = vec![1u8, 5];
        plaintext.extend_from_slice(&signal);
        plaintext.extend_from_slice(&[0xAB; 8]);

        DecodedToken {
            token: Token {
                version: 1,
                u: [2u8; 33],
                e: [3u8; 33],
                epoch_id: [0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0xFF],
                epoch_id_encoding: "ABEiM0RVZv8".to_string(),
                header_text: String::new(),
            },
            plaintext,
            plaintext_token: PlaintextToken {
                version: 1,
                ordinal: 5,
                signal,
                hmac_valid,
            },
        }
    }

    #[test]
    fn test_text_lines_for_ipv4_signal() {
        let signal = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0xFF, 10, 0, 0, 1];
        let report = InspectReport::new(&decoded(signal, true), CurveKind::P256);

        assert_eq!(
            report.text_lines(),
            vec![
                "Decrypted Token Bytes: AQUAAAAAAAAAAAAA//8KAAABq6urq6urq6s=".to_string(),
                "Decrypted Token Length: 26 bytes".to_string(),
                "Version: 1".to_string(),
                "t_ord: 5".to_string(),
                "Signal (IP Address): 10.0.0.1".to_string(),
                "HMAC Verification successful: true".to_string(),
            ]
        );
        assert_eq!(report.signal_kind, "ipv4");
    }

    #[test]
    fn test_unverified_all_zero_signal() {
        let report = InspectReport::new(&decoded([0u8; 16], false), CurveKind::Secp256k1);

        assert_eq!(report.signal_kind, "all_zero");
        assert_eq!(report.curve, "secp256k1");
        assert!(report
            .text_lines()
            .contains(&"HMAC Verification successful: false".to_string()));
    }

    #[test]
    fn test_json_report_fields() {
        let report = InspectReport::new(&decoded([0x20; 16], true), CurveKind::P256);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["epoch"], "ABEiM0RVZv8");
        assert_eq!(value["curve"], "p256");
        assert_eq!(value["decrypted_length"], 26);
        assert_eq!(value["ordinal"], 5);
        assert_eq!(value["signal_kind"], "ipv6");
        assert_eq!(value["signal_hex"], "20".repeat(16));
        assert_eq!(value["hmac_valid"], true);
    }
}
