//! NDEF messages
//!
//! A message is a non-empty run of records. The first record carries the
//! message-begin flag and the last one the message-end flag; nothing may
//! follow the message-end record.

use crate::error::{DecodeError, EncodeError};
use crate::record::{NdefRecord, RecordFlags};
use crate::text::{TextEncoding, TextRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefMessage {
    records: Vec<NdefRecord>,
}

impl NdefMessage {
    pub fn new(records: Vec<NdefRecord>) -> Result<Self, EncodeError> {
        if records.is_empty() {
            return Err(EncodeError::EmptyMessage);
        }
        Ok(Self { records })
    }

    /// Message holding a single UTF-8 text record
    pub fn text(text: &str, language: &str) -> Result<Self, EncodeError> {
        Self::text_with(text, language, TextEncoding::Utf8)
    }

    pub fn text_with(
        text: &str,
        language: &str,
        encoding: TextEncoding,
    ) -> Result<Self, EncodeError> {
        Ok(Self {
            records: vec![NdefRecord::text_with(text, language, encoding)?],
        })
    }

    pub fn records(&self) -> &[NdefRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<NdefRecord> {
        self.records
    }

    /// Decode the first record as text. Later records are not consulted.
    pub fn read_text(&self) -> Result<TextRecord, DecodeError> {
        self.records
            .first()
            .ok_or(DecodeError::EmptyMessage)?
            .as_text()
    }

    pub fn encoded_len(&self) -> usize {
        self.records.iter().map(NdefRecord::encoded_len).sum()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        let last = self.records.len() - 1;

        for (index, record) in self.records.iter().enumerate() {
            let mut position = RecordFlags::empty();
            if index == 0 {
                position |= RecordFlags::MESSAGE_BEGIN;
            }
            if index == last {
                position |= RecordFlags::MESSAGE_END;
            }
            record.write_to(&mut out, position);
        }

        out
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::EmptyMessage);
        }

        let mut records = Vec::new();
        let mut offset = 0;

        loop {
            if offset >= bytes.len() {
                return Err(DecodeError::MissingMessageEnd);
            }

            let (record, flags, consumed) = NdefRecord::read_from(bytes, offset)?;
            let begins = flags.contains(RecordFlags::MESSAGE_BEGIN);

            if records.is_empty() && !begins {
                return Err(DecodeError::MissingMessageBegin);
            }
            if !records.is_empty() && begins {
                return Err(DecodeError::UnexpectedMessageBegin(records.len()));
            }

            records.push(record);
            offset += consumed;

            if flags.contains(RecordFlags::MESSAGE_END) {
                break;
            }
        }

        if offset < bytes.len() {
            return Err(DecodeError::TrailingBytes(bytes.len() - offset));
        }

        tracing::debug!(records = records.len(), bytes = bytes.len(), "parsed NDEF message");

        Ok(Self { records })
    }
}

impl From<NdefRecord> for NdefMessage {
    fn from(record: NdefRecord) -> Self {
        Self {
            records: vec![record],
        }
    }
}

impl TryFrom<&[u8]> for NdefMessage {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::parse(bytes)
    }
}
