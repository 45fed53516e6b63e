//! Well-known text record payload codec
//!
//! Payload layout (NFC Forum RTD Text):
//!
//! | Offset | Length | Content |
//! |---|---|---|
//! | 0 | 1 | status byte: bit 7 encoding, bit 6 reserved, bits 5-0 language tag length |
//! | 1 | n | language tag |
//! | 1 + n | rest | text in the declared encoding |

use super::encoding::TextEncoding;
use super::language::LanguageTag;
use crate::error::{DecodeError, EncodeError};

/// Mask for the language tag length in the status byte
pub const LANGUAGE_LENGTH_MASK: u8 = 0x3F;

/// Reserved status bit, always written as zero
pub const RESERVED_STATUS_BIT: u8 = 0x40;

/// Decoded contents of a text record payload
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextRecord {
    pub language: String,
    pub encoding: TextEncoding,
    pub text: String,
}

impl TextRecord {
    /// Create a UTF-8 text record
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            encoding: TextEncoding::Utf8,
            text: text.into(),
        }
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Serialize into the payload layout
    pub fn to_payload(&self) -> Result<Vec<u8>, EncodeError> {
        encode_with(&self.text, &self.language, self.encoding)
    }

    /// Parse a payload
    pub fn from_payload(payload: &[u8]) -> Result<Self, DecodeError> {
        decode(payload)
    }
}

/// Encode `text` as UTF-8 with the given language tag
pub fn encode(text: &str, language: &str) -> Result<Vec<u8>, EncodeError> {
    encode_with(text, language, TextEncoding::Utf8)
}

/// Encode `text` with an explicit encoding
pub fn encode_with(
    text: &str,
    language: &str,
    encoding: TextEncoding,
) -> Result<Vec<u8>, EncodeError> {
    let language = LanguageTag::new(language)?;
    let text_bytes = encoding.encode(text);

    let mut payload = Vec::with_capacity(1 + language.len() + text_bytes.len());
    // LanguageTag guarantees the length fits in the mask
    payload.push(encoding.status_bit() | (language.len() as u8 & LANGUAGE_LENGTH_MASK));
    payload.extend_from_slice(language.as_bytes());
    payload.extend_from_slice(&text_bytes);

    Ok(payload)
}

/// Decode a payload back into its language, encoding and text
pub fn decode(payload: &[u8]) -> Result<TextRecord, DecodeError> {
    let (&status, rest) = payload.split_first().ok_or(DecodeError::EmptyPayload)?;

    let encoding = TextEncoding::from_status_byte(status);
    let language_len = (status & LANGUAGE_LENGTH_MASK) as usize;

    if status & RESERVED_STATUS_BIT != 0 {
        tracing::debug!(status, "text record status byte has reserved bit set");
    }

    if language_len > rest.len() {
        return Err(DecodeError::TruncatedLanguageTag {
            declared: language_len,
            available: rest.len(),
        });
    }

    let (language, text) = rest.split_at(language_len);
    let language = std::str::from_utf8(language)
        .map_err(|_| DecodeError::InvalidLanguageTag)?
        .to_string();
    let text = encoding.decode(text)?;

    tracing::trace!(
        language = %language,
        encoding = encoding.name(),
        text_len = text.len(),
        "decoded text record"
    );

    Ok(TextRecord {
        language,
        encoding,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty_text() {
        let payload = encode("", "en").unwrap();
        assert_eq!(payload, vec![0x02, b'e', b'n']);
    }

    #[test]
    fn test_encode_layout() {
        let payload = encode("Hello", "en").unwrap();
        assert_eq!(payload.len(), 1 + 2 + 5);
        assert_eq!(payload[0], 0x02);
        assert_eq!(&payload[1..3], b"en");
        assert_eq!(&payload[3..], b"Hello");
    }

    #[test]
    fn test_encode_utf16_sets_flag() {
        let payload = encode_with("A", "fr", TextEncoding::Utf16).unwrap();
        assert_eq!(payload, vec![0x82, b'f', b'r', 0x00, b'A']);
    }

    #[test]
    fn test_encode_rejects_long_language() {
        let language = "x".repeat(64);
        assert_eq!(
            encode("text", &language),
            Err(EncodeError::LanguageTagTooLong(64))
        );
    }

    #[test]
    fn test_decode_status_byte_only() {
        let record = decode(&[0x00]).unwrap();
        assert_eq!(record.text, "");
        assert_eq!(record.language, "");
        assert_eq!(record.encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_decode_empty_payload() {
        assert_eq!(decode(&[]), Err(DecodeError::EmptyPayload));
    }

    #[test]
    fn test_decode_truncated_language() {
        assert_eq!(
            decode(&[0x05, b'e', b'n']),
            Err(DecodeError::TruncatedLanguageTag {
                declared: 5,
                available: 2,
            })
        );
    }

    #[test]
    fn test_decode_uses_six_bit_mask() {
        // A 0x33 mask would read this 12 byte tag length (0x0C) as 0
        let language = "abcdefghijkl";
        let payload = encode("fortune", language).unwrap();
        assert_eq!(payload[0], 0x0C);
        let record = decode(&payload).unwrap();
        assert_eq!(record.language, language);
        assert_eq!(record.text, "fortune");
    }

    #[test]
    fn test_decode_ignores_reserved_bit() {
        let record = decode(&[0x42, b'e', b'n', b'o', b'k']).unwrap();
        assert_eq!(record.language, "en");
        assert_eq!(record.text, "ok");
    }

    #[test]
    fn test_decode_invalid_language_tag() {
        assert_eq!(
            decode(&[0x01, 0xFF, b'x']),
            Err(DecodeError::InvalidLanguageTag)
        );
    }

    #[test]
    fn test_decode_invalid_utf8_text() {
        let result = decode(&[0x02, b'e', b'n', 0xF0, 0x28]);
        assert!(matches!(result, Err(DecodeError::InvalidUtf8(_))));
    }

    #[test]
    fn test_decode_utf16_with_bom() {
        let payload = [0x82, b'e', b'n', 0xFF, 0xFE, b'h', 0x00, b'i', 0x00];
        let record = decode(&payload).unwrap();
        assert_eq!(record.encoding, TextEncoding::Utf16);
        assert_eq!(record.text, "hi");
    }

    #[test]
    fn test_utf16_text_starting_with_bom_characters() {
        let record = decode(&encode_with("\u{FEFF}fortune", "en", TextEncoding::Utf16).unwrap())
            .unwrap();
        assert_eq!(record.text, "\u{FEFF}fortune");

        let record =
            decode(&encode_with("\u{FFFE}ok", "en", TextEncoding::Utf16).unwrap()).unwrap();
        assert_eq!(record.text, "\u{FFFE}ok");
    }

    #[test]
    fn test_boundary_language_lengths_roundtrip() {
        for len in [0usize, 31, 63] {
            let language = "l".repeat(len);
            let payload = encode("boundary", &language).unwrap();
            assert_eq!(payload[0] as usize, len);

            let record = decode(&payload).unwrap();
            assert_eq!(record.language, language);
            assert_eq!(record.text, "boundary");
        }
    }

    #[test]
    fn test_text_record_methods() {
        let record = TextRecord::new("Ünïcødé ✓", "de").with_encoding(TextEncoding::Utf16);
        let payload = record.to_payload().unwrap();
        assert_eq!(TextRecord::from_payload(&payload).unwrap(), record);
    }
}
