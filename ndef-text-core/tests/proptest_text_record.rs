//! Property-based tests for the text record codec
//!
//! Checks the payload layout invariants and that text survives encoding
//! under both text encodings, using proptest to explore tag lengths and
//! arbitrary Unicode.

use ndef_text::text::{self, TextEncoding, MAX_LANGUAGE_TAG_LEN};
use ndef_text::{DecodeError, EncodeError, NdefMessage, NdefRecord};
use proptest::prelude::*;

fn encoding_strategy() -> impl Strategy<Value = TextEncoding> {
    prop_oneof![Just(TextEncoding::Utf8), Just(TextEncoding::Utf16)]
}

// Language tags of every length the status byte can hold
prop_compose! {
    fn language_strategy()(tag in "[a-zA-Z0-9-]{0,63}") -> String {
        tag
    }
}

// Arbitrary text, sometimes led by a character that looks like a byte order mark
prop_compose! {
    fn text_strategy()(
        lead in prop_oneof![Just(""), Just("\u{FEFF}"), Just("\u{FFFE}")],
        rest in any::<String>()
    ) -> String {
        format!("{lead}{rest}")
    }
}

proptest! {
    #[test]
    fn test_utf8_roundtrip(text in any::<String>(), language in language_strategy()) {
        let payload = text::encode(&text, &language).unwrap();
        let record = text::decode(&payload).unwrap();
        prop_assert_eq!(record.text, text);
        prop_assert_eq!(record.language, language);
        prop_assert_eq!(record.encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_roundtrip_any_encoding(
        text in text_strategy(),
        language in language_strategy(),
        encoding in encoding_strategy()
    ) {
        let payload = text::encode_with(&text, &language, encoding).unwrap();
        let record = text::decode(&payload).unwrap();
        prop_assert_eq!(record.text, text);
        prop_assert_eq!(record.encoding, encoding);
    }

    #[test]
    fn test_payload_length(text in ".{0,200}", language in language_strategy()) {
        let payload = text::encode(&text, &language).unwrap();
        prop_assert_eq!(payload.len(), 1 + language.len() + text.len());
        prop_assert_eq!(payload[0] as usize, language.len());
    }

    #[test]
    fn test_status_byte_packs_flag_and_length(
        language in language_strategy(),
        encoding in encoding_strategy()
    ) {
        let payload = text::encode_with("", &language, encoding).unwrap();
        prop_assert_eq!(payload[0] & 0x3F, language.len() as u8);
        prop_assert_eq!(payload[0] & 0x40, 0);
        prop_assert_eq!(payload[0] & 0x80 != 0, encoding == TextEncoding::Utf16);
    }

    #[test]
    fn test_oversized_language_rejected(extra in 1usize..200) {
        let language = "a".repeat(MAX_LANGUAGE_TAG_LEN + extra);
        prop_assert_eq!(
            text::encode("text", &language),
            Err(EncodeError::LanguageTagTooLong(language.len()))
        );
    }

    #[test]
    fn test_truncated_language_detected(declared in 1u8..=63, available in 0usize..63) {
        prop_assume!((declared as usize) > available);
        let mut payload = vec![declared];
        payload.extend(std::iter::repeat(b'x').take(available));
        prop_assert_eq!(
            text::decode(&payload),
            Err(DecodeError::TruncatedLanguageTag {
                declared: declared as usize,
                available,
            })
        );
    }

    #[test]
    fn test_decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = text::decode(&bytes);
        let _ = NdefRecord::parse(&bytes);
        let _ = NdefMessage::parse(&bytes);
    }

    #[test]
    fn test_message_roundtrip(
        texts in proptest::collection::vec(".{0,300}", 1..5),
        language in language_strategy()
    ) {
        let records: Vec<NdefRecord> = texts
            .iter()
            .map(|t| NdefRecord::text(t, &language).unwrap())
            .collect();
        let message = NdefMessage::new(records).unwrap();
        let bytes = message.to_bytes();

        prop_assert_eq!(bytes.len(), message.encoded_len());
        let parsed = NdefMessage::parse(&bytes).unwrap();
        for (record, expected) in parsed.records().iter().zip(&texts) {
            prop_assert_eq!(&record.as_text().unwrap().text, expected);
        }
    }
}
