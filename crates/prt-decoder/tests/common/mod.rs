//! Shared fixtures: an EC-ElGamal encrypter over P-256 that produces headers
//! the decoder accepts.

#![allow(dead_code)]

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::{AffinePoint, EncodedPoint, NonZeroScalar, ProjectivePoint};
use prt_decoder::{compute_truncated_mac, EpochKeys};
use rand::rngs::OsRng;

pub const EPOCH_ID: [u8; 8] = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0xFF];
pub const EPOCH_ENCODING: &str = "ABEiM0RVZv8";

/// Generated key pair plus HMAC secret.
pub struct Issuer {
    pub secret: NonZeroScalar,
    pub public: ProjectivePoint,
    pub hmac_secret: Vec<u8>,
}

impl Issuer {
    pub fn random() -> Self {
        let secret = NonZeroScalar::random(&mut OsRng);
        let public = ProjectivePoint::GENERATOR * *secret;
        Self {
            secret,
            public,
            hmac_secret: (0u8..32).map(|i| i.wrapping_mul(7)).collect(),
        }
    }

    pub fn keys(&self) -> EpochKeys {
        EpochKeys::new(self.secret.to_bytes().to_vec(), self.hmac_secret.clone())
    }

    /// Key file JSON as published for this issuer.
    pub fn key_file_json(&self) -> String {
        format!(
            r#"{{"eg": {{"kty": "EC", "crv": "P-256", "d": "{}"}}, "hmac": {{"kty": "oct", "k": "{}"}}}}"#,
            URL_SAFE_NO_PAD.encode(self.secret.to_bytes()),
            URL_SAFE_NO_PAD.encode(&self.hmac_secret),
        )
    }

    /// Plaintext layout with a correct MAC and optional trailing slack.
    pub fn plaintext(&self, version: u8, ordinal: u8, signal: [u8; 16], slack: &[u8]) -> Vec<u8> {
        let mac = compute_truncated_mac(version, ordinal, &signal, &self.hmac_secret).unwrap();
        let mut out = vec![version, ordinal];
        out.extend_from_slice(&signal);
        out.extend_from_slice(&mac);
        out.extend_from_slice(slack);
        out
    }

    /// Encrypt raw plaintext bytes (at most 29) into a header string.
    pub fn encrypt(&self, plaintext: &[u8]) -> String {
        assert!(plaintext.len() <= 29);
        let m = embed(plaintext);
        let r = NonZeroScalar::random(&mut OsRng);

        let u = ProjectivePoint::GENERATOR * *r;
        let e = m + self.public * *r;

        let mut wire = vec![1u8];
        for point in [u, e] {
            let encoded = AffinePoint::from(point).to_encoded_point(true);
            wire.extend_from_slice(&33u16.to_be_bytes());
            wire.extend_from_slice(encoded.as_bytes());
        }
        wire.extend_from_slice(&EPOCH_ID);
        assert_eq!(wire.len(), 79);

        format!("{}:", STANDARD.encode(wire))
    }
}

/// Find a point whose x-coordinate is `plaintext << 24` plus a 24-bit counter.
fn embed(plaintext: &[u8]) -> ProjectivePoint {
    let mut compressed = [0u8; 33];
    compressed[0] = 0x02;
    let start = 33 - 3 - plaintext.len();
    compressed[start..30].copy_from_slice(plaintext);

    for counter in 0u32..(1 << 24) {
        compressed[30..].copy_from_slice(&counter.to_be_bytes()[1..]);
        let encoded = EncodedPoint::from_bytes(compressed).unwrap();
        let point: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
        if let Some(point) = point {
            return ProjectivePoint::from(point);
        }
    }
    panic!("no curve point for plaintext");
}
