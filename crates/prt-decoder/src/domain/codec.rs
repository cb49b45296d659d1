//! # Token Codec
//!
//! Header text and fixed binary layout of a PRT.
//!
//! ```text
//! offset  size  field
//!      0     1  version
//!      1     2  u length (must be 33, big-endian)
//!      3    33  u (compressed point)
//!     36     2  e length (must be 33, big-endian)
//!     38    33  e (compressed point)
//!     71     8  epoch id
//! ```

use std::borrow::Cow;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use super::entities::{Token, EPOCH_ID_SIZE, PRT_POINT_SIZE, PRT_SIZE};
use super::errors::{PrtError, TokenField};

/// Header delimiter wrapped around the base64 body.
pub const HEADER_DELIMITER: char = ':';

/// Standard alphabet, padding optional, trailing bits tolerated.
const HEADER_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Parse a header value into a token.
///
/// Drops ASCII whitespace (wrapped or indented values), strips one leading
/// and one trailing `:` if present, base64-decodes the rest and deserializes
/// the 79-byte layout.
pub fn parse_header(text: &str) -> Result<Token, PrtError> {
    let compact = remove_whitespace(text);
    let stripped = strip_delimiters(&compact);

    let bytes = HEADER_ENGINE
        .decode(stripped)
        .map_err(|e| PrtError::InvalidHeaderEncoding {
            reason: e.to_string(),
        })?;

    let mut token = deserialize(&bytes)?;
    token.header_text = stripped.to_string();
    Ok(token)
}

/// Deserialize the fixed 79-byte layout.
///
/// The returned token has an empty `header_text`; `parse_header` fills it.
pub fn deserialize(bytes: &[u8]) -> Result<Token, PrtError> {
    if bytes.len() != PRT_SIZE {
        return Err(PrtError::InvalidSize {
            expected: PRT_SIZE,
            actual: bytes.len(),
        });
    }

    let version = bytes[0];
    let (u, offset) = read_point(bytes, 1, TokenField::U)?;
    let (e, offset) = read_point(bytes, offset, TokenField::E)?;

    let mut epoch_id = [0u8; EPOCH_ID_SIZE];
    epoch_id.copy_from_slice(&bytes[offset..offset + EPOCH_ID_SIZE]);

    Ok(Token {
        version,
        u,
        e,
        epoch_id,
        epoch_id_encoding: encode_epoch_id(&epoch_id),
        header_text: String::new(),
    })
}

/// Serialize a token back to its 79-byte layout.
pub fn serialize(token: &Token) -> [u8; PRT_SIZE] {
    let point_len = (PRT_POINT_SIZE as u16).to_be_bytes();

    let mut out = [0u8; PRT_SIZE];
    out[0] = token.version;
    out[1..3].copy_from_slice(&point_len);
    out[3..36].copy_from_slice(&token.u);
    out[36..38].copy_from_slice(&point_len);
    out[38..71].copy_from_slice(&token.e);
    out[71..].copy_from_slice(&token.epoch_id);
    out
}

/// URL-safe base64 of the epoch id without `=` padding.
///
/// This string names the epoch's key material; it must match the publisher's
/// encoding exactly.
pub fn encode_epoch_id(epoch_id: &[u8; EPOCH_ID_SIZE]) -> String {
    URL_SAFE_NO_PAD.encode(epoch_id)
}

fn remove_whitespace(text: &str) -> Cow<'_, str> {
    if text.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(text.chars().filter(|c| !c.is_ascii_whitespace()).collect())
    } else {
        Cow::Borrowed(text)
    }
}

fn strip_delimiters(text: &str) -> &str {
    let text = text.strip_prefix(HEADER_DELIMITER).unwrap_or(text);
    text.strip_suffix(HEADER_DELIMITER).unwrap_or(text)
}

/// Read a length-prefixed point starting at `offset`. Returns the point and
/// the offset just past it. Caller guarantees `bytes.len() == PRT_SIZE`.
fn read_point(
    bytes: &[u8],
    offset: usize,
    field: TokenField,
) -> Result<([u8; PRT_POINT_SIZE], usize), PrtError> {
    let size = u16::from_be_bytes([bytes[offset], bytes[offset + 1]]) as usize;
    if size != PRT_POINT_SIZE {
        return Err(PrtError::InvalidFieldSize {
            field,
            expected: PRT_POINT_SIZE,
            actual: size,
        });
    }

    let start = offset + 2;
    let mut point = [0u8; PRT_POINT_SIZE];
    point.copy_from_slice(&bytes[start..start + PRT_POINT_SIZE]);
    Ok((point, start + PRT_POINT_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use proptest::prelude::*;

    /// Sample header shipped with the reference tooling.
    const SAMPLE_HEADER: &str = "AQAhA3E/ogZMjnn0NOr7xElireLgsf3flagn4bmcORkye4isACED26BvIEpa4rNsHRrLMNIyJ1OE9Wx8m45iZ+81wmRF5bfljwIhYnA2YQ==:";

    fn well_formed() -> [u8; PRT_SIZE] {
        let mut bytes = [0u8; PRT_SIZE];
        bytes[0] = 1;
        bytes[1..3].copy_from_slice(&33u16.to_be_bytes());
        bytes[3] = 0x02;
        bytes[36..38].copy_from_slice(&33u16.to_be_bytes());
        bytes[38] = 0x03;
        bytes[71..].copy_from_slice(&[0xFB, 0xFF, 0xFE, 0xFD, 1, 2, 3, 4]);
        bytes
    }

    #[test]
    fn test_parse_sample_header() {
        let token = parse_header(SAMPLE_HEADER).unwrap();

        assert_eq!(token.version, 1);
        assert_eq!(token.u[0], 0x03);
        assert_eq!(token.u[1..4], [0x71, 0x3f, 0xa2]);
        assert_eq!(token.e[0], 0x03);
        assert_eq!(token.e[1..4], [0xdb, 0xa0, 0x6f]);
        assert_eq!(
            token.epoch_id,
            [0xe5, 0x8f, 0x02, 0x21, 0x62, 0x70, 0x36, 0x61]
        );
        assert_eq!(token.epoch_id_encoding, "5Y8CIWJwNmE");
        assert_eq!(token.header_text, &SAMPLE_HEADER[..SAMPLE_HEADER.len() - 1]);
    }

    #[test]
    fn test_epoch_encoding_is_url_safe_and_unpadded() {
        let token = deserialize(&well_formed()).unwrap();
        // Standard base64 would be "+//+/QECAwQ="
        assert_eq!(token.epoch_id_encoding, "-__-_QECAwQ");
        assert!(!token.epoch_id_encoding.contains('='));
    }

    #[test]
    fn test_wrong_total_size() {
        let err = deserialize(&[0u8; 78]).unwrap_err();
        assert_eq!(
            err,
            PrtError::InvalidSize {
                expected: 79,
                actual: 78
            }
        );
    }

    #[test]
    fn test_u_length_34_reports_field() {
        let mut bytes = well_formed();
        bytes[1..3].copy_from_slice(&34u16.to_be_bytes());

        let err = deserialize(&bytes).unwrap_err();
        assert_eq!(
            err,
            PrtError::InvalidFieldSize {
                field: TokenField::U,
                expected: 33,
                actual: 34
            }
        );
        assert!(err.to_string().contains("u_size"));
    }

    #[test]
    fn test_e_length_checked_after_u() {
        let mut bytes = well_formed();
        bytes[36..38].copy_from_slice(&32u16.to_be_bytes());

        assert!(matches!(
            deserialize(&bytes),
            Err(PrtError::InvalidFieldSize {
                field: TokenField::E,
                actual: 32,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            parse_header(":not base64!:"),
            Err(PrtError::InvalidHeaderEncoding { .. })
        ));
    }

    #[test]
    fn test_valid_base64_wrong_size() {
        let header = STANDARD.encode([1u8; 10]);
        assert!(matches!(
            parse_header(&header),
            Err(PrtError::InvalidSize { actual: 10, .. })
        ));
    }

    #[test]
    fn test_missing_padding_accepted() {
        let trimmed = SAMPLE_HEADER.trim_end_matches(':').trim_end_matches('=');
        let token = parse_header(trimmed).unwrap();
        assert_eq!(token.epoch_id_encoding, "5Y8CIWJwNmE");
    }

    #[test]
    fn test_wrapped_header_accepted() {
        let (head, tail) = SAMPLE_HEADER.split_at(60);
        let wrapped = format!("  {head}\r\n {tail}\n");

        let token = parse_header(&wrapped).unwrap();
        assert_eq!(token, parse_header(SAMPLE_HEADER).unwrap());
        assert_eq!(token.epoch_id_encoding, "5Y8CIWJwNmE");
    }

    #[test]
    fn test_serialize_restores_wire_bytes() {
        let bytes = well_formed();
        let token = deserialize(&bytes).unwrap();
        assert_eq!(serialize(&token), bytes);
    }

    proptest! {
        #[test]
        fn prop_wrong_size_always_invalid_size(len in 0usize..256) {
            prop_assume!(len != PRT_SIZE);
            let bytes = vec![0x21u8; len];
            let is_invalid_size = matches!(
                deserialize(&bytes),
                Err(PrtError::InvalidSize { expected: PRT_SIZE, actual }) if actual == len
            );
            prop_assert!(is_invalid_size);
        }

        #[test]
        fn prop_bad_length_prefix_is_field_error(
            u_len in any::<u16>(),
            e_len in any::<u16>(),
        ) {
            prop_assume!(u_len != 33 || e_len != 33);
            let mut bytes = well_formed();
            bytes[1..3].copy_from_slice(&u_len.to_be_bytes());
            bytes[36..38].copy_from_slice(&e_len.to_be_bytes());

            let is_field_error = matches!(
                deserialize(&bytes),
                Err(PrtError::InvalidFieldSize { .. })
            );
            prop_assert!(is_field_error);
        }

        #[test]
        fn prop_delimiters_do_not_change_bytes(
            body in proptest::collection::vec(any::<u8>(), PRT_SIZE),
            lead in any::<bool>(),
            trail in any::<bool>(),
        ) {
            let mut bytes = well_formed();
            bytes[3..36].copy_from_slice(&body[3..36]);
            bytes[38..].copy_from_slice(&body[38..]);
            let encoded = STANDARD.encode(bytes);

            let wrapped = format!(
                "{}{}{}",
                if lead { ":" } else { "" },
                encoded,
                if trail { ":" } else { "" },
            );

            let plain = parse_header(&encoded).unwrap();
            let token = parse_header(&wrapped).unwrap();
            prop_assert_eq!(serialize(&token), serialize(&plain));
            prop_assert_eq!(token.header_text, encoded);
        }
    }
}
