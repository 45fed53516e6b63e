//! # ndef-text
//!
//! Encoder and decoder for NFC Forum NDEF well-known text records, with the
//! record and message framing needed to put them on a tag.
//!
//! ## Features
//!
//! - **Text payloads**: status byte, language tag and UTF-8 or UTF-16 text
//! - **Records**: short and long records, ids, all type name formats
//! - **Messages**: message-begin/end framing over one or more records
//! - **Locale defaults**: language tag taken from the process locale
//! - **Explicit failures**: oversized tags and malformed bytes return errors
//!   instead of producing or accepting corrupt records
//!
//! ## Quick Start
//!
//! ### Writing a tag message
//!
//! ```rust
//! use ndef_text::{LanguageTag, NdefMessage, Result};
//!
//! # fn main() -> Result<()> {
//! let language = LanguageTag::from_locale("en_US.UTF-8");
//! let message = NdefMessage::text("You will find a lost key", language.as_str())?;
//!
//! let bytes = message.to_bytes();
//! assert_eq!(&bytes[..4], &[0xD1, 0x01, 0x1B, b'T']);
//! # Ok(())
//! # }
//! ```
//!
//! ### Reading a tag message
//!
//! ```rust
//! use ndef_text::{NdefMessage, TextEncoding, Result};
//!
//! # fn main() -> Result<()> {
//! let bytes = [0xD1, 0x01, 0x05, b'T', 0x02, b'e', b'n', b'H', b'i'];
//! let record = NdefMessage::parse(&bytes)?.read_text()?;
//!
//! assert_eq!(record.text, "Hi");
//! assert_eq!(record.language, "en");
//! assert_eq!(record.encoding, TextEncoding::Utf8);
//! # Ok(())
//! # }
//! ```
//!
//! ### Payload only
//!
//! ```rust
//! use ndef_text::text;
//!
//! let payload = text::encode("", "en").unwrap();
//! assert_eq!(payload, vec![0x02, b'e', b'n']);
//! assert_eq!(text::decode(&payload).unwrap().text, "");
//! ```
//!
//! ## Modules
//!
//! - [`text`] - Text record payload codec, encodings and language tags
//! - [`record`] - Single record framing
//! - [`message`] - Message framing
//! - [`error`] - Error types

pub mod error;
pub mod message;
pub mod record;
pub mod text;

pub use error::{DecodeError, EncodeError, NdefError, Result};
pub use message::NdefMessage;
pub use record::{NdefRecord, RecordFlags, Tnf, RTD_TEXT};
pub use text::{LanguageTag, TextEncoding, TextRecord};

/// Current version of ndef-text
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
