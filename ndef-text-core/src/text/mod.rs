//! Well-known text records: payload codec, text encodings and language tags

pub mod encoding;
pub mod language;
pub mod record;

pub use encoding::TextEncoding;
pub use language::{LanguageTag, DEFAULT_LANGUAGE, MAX_LANGUAGE_TAG_LEN};
pub use record::{decode, encode, encode_with, TextRecord};
