use thiserror::Error;

/// Errors raised while turning bytes back into records or text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Empty text record payload")]
    EmptyPayload,

    #[error("Language tag declares {declared} bytes but only {available} remain")]
    TruncatedLanguageTag { declared: usize, available: usize },

    #[error("Language tag is not valid UTF-8")]
    InvalidLanguageTag,

    #[error("Invalid UTF-8 text: {0}")]
    InvalidUtf8(String),

    #[error("UTF-16 text has an odd byte count: {0}")]
    OddUtf16Length(usize),

    #[error("Invalid UTF-16 text: {0}")]
    InvalidUtf16(String),

    #[error("Empty NDEF message")]
    EmptyMessage,

    #[error("Truncated record at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedRecord {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Chunked records are not supported (offset {0})")]
    ChunkedRecord(usize),

    #[error("Reserved type name format at offset {0}")]
    ReservedTnf(usize),

    #[error("Unchanged type name format outside a chunk at offset {0}")]
    UnchangedTnf(usize),

    #[error("Empty record at offset {0} carries type, id or payload bytes")]
    InvalidEmptyRecord(usize),

    #[error("First record is missing the message-begin flag")]
    MissingMessageBegin,

    #[error("Unexpected message-begin flag on record {0}")]
    UnexpectedMessageBegin(usize),

    #[error("Message ended without a message-end record")]
    MissingMessageEnd,

    #[error("{0} trailing bytes after message-end record")]
    TrailingBytes(usize),

    #[error("Record is not a well-known text record")]
    NotATextRecord,
}

/// Errors raised while building records from caller input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Language tag is {0} bytes, at most 63 fit in the status byte")]
    LanguageTagTooLong(usize),

    #[error("Record type is {0} bytes, at most 255 allowed")]
    TypeTooLong(usize),

    #[error("Record id is {0} bytes, at most 255 allowed")]
    IdTooLong(usize),

    #[error("Record payload is {0} bytes, exceeds 32-bit length field")]
    PayloadTooLong(usize),

    #[error("Empty records cannot carry type, id or payload bytes")]
    InvalidEmptyRecord,

    #[error("Unchanged type name format is only valid inside a chunked record")]
    UnchangedTnf,

    #[error("An NDEF message needs at least one record")]
    EmptyMessage,
}

#[derive(Error, Debug)]
pub enum NdefError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),
}

pub type Result<T> = std::result::Result<T, NdefError>;
