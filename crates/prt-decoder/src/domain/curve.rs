//! # Curve Capability
//!
//! The small set of group operations the decryptor needs, behind a trait so
//! any conformant short-Weierstrass backend can be swapped in.
//!
//! Two backends ship: [`P256`] (NIST P-256, the deployed curve) and
//! [`Secp256k1`]. Both use 33-byte SEC1 compressed points and 32-byte scalars.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use zeroize::Zeroize;

use super::errors::PrtError;

/// Scalar width for 256-bit curves.
pub const SCALAR_SIZE: usize = 32;

/// Group operations over a named curve.
pub trait CurveBackend: Send + Sync {
    /// Group element
    type Point: Clone + Send + Sync;
    /// Element of the scalar field
    type Scalar: Send + Sync;

    /// Curve name for diagnostics.
    fn name(&self) -> &'static str;

    /// Decode a SEC1 point encoding, rejecting points off the curve.
    fn decode_point(&self, bytes: &[u8]) -> Result<Self::Point, PrtError>;

    /// Decode a big-endian scalar. Zero and values ≥ the group order are rejected.
    fn decode_scalar(&self, bytes: &[u8]) -> Result<Self::Scalar, PrtError>;

    fn scalar_multiply(&self, point: &Self::Point, scalar: &Self::Scalar) -> Self::Point;

    fn point_add(&self, a: &Self::Point, b: &Self::Point) -> Self::Point;

    fn point_negate(&self, point: &Self::Point) -> Self::Point;

    /// Big-endian affine x-coordinate. Fails for the identity point.
    fn x_coordinate(&self, point: &Self::Point) -> Result<[u8; SCALAR_SIZE], PrtError>;
}

/// NIST P-256 backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct P256;

/// secp256k1 backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1;

/// Runtime curve selector for callers that pick a backend from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    #[default]
    P256,
    Secp256k1,
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveKind::P256 => f.write_str("p256"),
            CurveKind::Secp256k1 => f.write_str("secp256k1"),
        }
    }
}

impl FromStr for CurveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p256" | "p-256" | "prime256v1" | "secp256r1" => Ok(CurveKind::P256),
            "secp256k1" | "k256" => Ok(CurveKind::Secp256k1),
            other => Err(format!("unknown curve: {other}")),
        }
    }
}

/// Left-pad a big-endian scalar to 32 bytes, dropping leading zeros first.
fn scalar_repr(bytes: &[u8]) -> Result<[u8; SCALAR_SIZE], PrtError> {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[first..];
    if significant.is_empty() {
        return Err(PrtError::curve("private scalar is zero"));
    }
    if significant.len() > SCALAR_SIZE {
        return Err(PrtError::curve(format!(
            "private scalar has {} significant bytes, expected at most {}",
            significant.len(),
            SCALAR_SIZE
        )));
    }

    let mut repr = [0u8; SCALAR_SIZE];
    repr[SCALAR_SIZE - significant.len()..].copy_from_slice(significant);
    Ok(repr)
}

macro_rules! sec1_backend {
    ($backend:ident, $krate:ident, $label:expr) => {
        impl CurveBackend for $backend {
            type Point = $krate::ProjectivePoint;
            type Scalar = $krate::Scalar;

            fn name(&self) -> &'static str {
                $label
            }

            fn decode_point(&self, bytes: &[u8]) -> Result<Self::Point, PrtError> {
                use $krate::elliptic_curve::sec1::FromEncodedPoint;

                let encoded = $krate::EncodedPoint::from_bytes(bytes)
                    .map_err(|e| PrtError::curve(format!("invalid SEC1 encoding: {e}")))?;
                let affine: Option<$krate::AffinePoint> =
                    $krate::AffinePoint::from_encoded_point(&encoded).into();

                affine
                    .map($krate::ProjectivePoint::from)
                    .ok_or_else(|| PrtError::curve(format!("point is not on {}", $label)))
            }

            fn decode_scalar(&self, bytes: &[u8]) -> Result<Self::Scalar, PrtError> {
                use $krate::elliptic_curve::PrimeField;

                let mut repr = scalar_repr(bytes)?;
                let scalar: Option<$krate::Scalar> =
                    $krate::Scalar::from_repr($krate::FieldBytes::from(repr)).into();
                repr.zeroize();

                scalar.ok_or_else(|| {
                    PrtError::curve(format!("private scalar exceeds the {} group order", $label))
                })
            }

            fn scalar_multiply(&self, point: &Self::Point, scalar: &Self::Scalar) -> Self::Point {
                *point * *scalar
            }

            fn point_add(&self, a: &Self::Point, b: &Self::Point) -> Self::Point {
                *a + *b
            }

            fn point_negate(&self, point: &Self::Point) -> Self::Point {
                -*point
            }

            fn x_coordinate(&self, point: &Self::Point) -> Result<[u8; SCALAR_SIZE], PrtError> {
                use $krate::elliptic_curve::sec1::ToEncodedPoint;

                let encoded = $krate::AffinePoint::from(*point).to_encoded_point(false);
                let x = encoded
                    .x()
                    .ok_or_else(|| PrtError::curve("decrypted point is the identity"))?;

                let mut out = [0u8; SCALAR_SIZE];
                out.copy_from_slice(x);
                Ok(out)
            }
        }
    };
}

sec1_backend!(P256, p256, "P-256");
sec1_backend!(Secp256k1, k256, "secp256k1");
