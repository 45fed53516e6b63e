//! NDEF record framing
//!
//! Each record starts with a header byte holding five flags and the type
//! name format (TNF), followed by the length fields and the type, id and
//! payload bytes:
//!
//! ```text
//! +----+----+----+----+----+-----------+
//! | MB | ME | CF | SR | IL |    TNF    |
//! +----+----+----+----+----+-----------+
//! | TYPE LENGTH                        |
//! | PAYLOAD LENGTH (1 byte if SR, else 4, big-endian) |
//! | ID LENGTH (only if IL)             |
//! | TYPE | ID | PAYLOAD               |
//! ```

use crate::error::{DecodeError, EncodeError};
use crate::text::{self, TextEncoding, TextRecord};
use bitflags::bitflags;

/// Record type of a well-known text record
pub const RTD_TEXT: &[u8] = b"T";

const TNF_MASK: u8 = 0x07;
const MAX_SHORT_PAYLOAD: usize = u8::MAX as usize;

bitflags! {
    /// Flags in the upper five bits of a record header
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RecordFlags: u8 {
        /// First record of a message
        const MESSAGE_BEGIN = 0x80;
        /// Last record of a message
        const MESSAGE_END = 0x40;
        /// Record is a chunk of a larger payload
        const CHUNKED = 0x20;
        /// Payload length is a single byte
        const SHORT_RECORD = 0x10;
        /// An id length byte is present
        const ID_LENGTH_PRESENT = 0x08;
    }
}

/// Type name format, the low three bits of a record header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tnf {
    Empty = 0x00,
    WellKnown = 0x01,
    MimeMedia = 0x02,
    AbsoluteUri = 0x03,
    External = 0x04,
    Unknown = 0x05,
    Unchanged = 0x06,
}

impl Tnf {
    /// Map the three TNF bits to a value. `0x07` is reserved.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & TNF_MASK {
            0x00 => Some(Tnf::Empty),
            0x01 => Some(Tnf::WellKnown),
            0x02 => Some(Tnf::MimeMedia),
            0x03 => Some(Tnf::AbsoluteUri),
            0x04 => Some(Tnf::External),
            0x05 => Some(Tnf::Unknown),
            0x06 => Some(Tnf::Unchanged),
            _ => None,
        }
    }

    pub fn bits(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tnf::Empty => "Empty",
            Tnf::WellKnown => "Well-known",
            Tnf::MimeMedia => "MIME media",
            Tnf::AbsoluteUri => "Absolute URI",
            Tnf::External => "External",
            Tnf::Unknown => "Unknown",
            Tnf::Unchanged => "Unchanged",
        }
    }
}

impl std::fmt::Display for Tnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single NDEF record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    tnf: Tnf,
    record_type: Vec<u8>,
    id: Vec<u8>,
    payload: Vec<u8>,
}

impl NdefRecord {
    /// Create a record, checking every field fits its length byte
    pub fn new(
        tnf: Tnf,
        record_type: impl Into<Vec<u8>>,
        id: impl Into<Vec<u8>>,
        payload: impl Into<Vec<u8>>,
    ) -> Result<Self, EncodeError> {
        let record_type = record_type.into();
        let id = id.into();
        let payload = payload.into();

        if record_type.len() > u8::MAX as usize {
            return Err(EncodeError::TypeTooLong(record_type.len()));
        }
        if id.len() > u8::MAX as usize {
            return Err(EncodeError::IdTooLong(id.len()));
        }
        if u32::try_from(payload.len()).is_err() {
            return Err(EncodeError::PayloadTooLong(payload.len()));
        }
        if tnf == Tnf::Empty && !(record_type.is_empty() && id.is_empty() && payload.is_empty()) {
            return Err(EncodeError::InvalidEmptyRecord);
        }
        // Chunks are never written, so Unchanged has no first chunk to refer to
        if tnf == Tnf::Unchanged {
            return Err(EncodeError::UnchangedTnf);
        }

        Ok(Self {
            tnf,
            record_type,
            id,
            payload,
        })
    }

    /// A record with no type, id or payload
    pub fn empty() -> Self {
        Self {
            tnf: Tnf::Empty,
            record_type: Vec::new(),
            id: Vec::new(),
            payload: Vec::new(),
        }
    }

    /// Well-known text record with a UTF-8 payload and no id
    pub fn text(text: &str, language: &str) -> Result<Self, EncodeError> {
        Self::text_with(text, language, TextEncoding::Utf8)
    }

    pub fn text_with(
        text: &str,
        language: &str,
        encoding: TextEncoding,
    ) -> Result<Self, EncodeError> {
        let payload = text::encode_with(text, language, encoding)?;
        Self::new(Tnf::WellKnown, RTD_TEXT, Vec::<u8>::new(), payload)
    }

    pub fn from_text_record(record: &TextRecord) -> Result<Self, EncodeError> {
        Self::text_with(&record.text, &record.language, record.encoding)
    }

    pub fn tnf(&self) -> Tnf {
        self.tnf
    }

    pub fn record_type(&self) -> &[u8] {
        &self.record_type
    }

    pub fn id(&self) -> &[u8] {
        &self.id
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn is_text(&self) -> bool {
        self.tnf == Tnf::WellKnown && self.record_type == RTD_TEXT
    }

    /// Decode the payload of a well-known text record
    pub fn as_text(&self) -> Result<TextRecord, DecodeError> {
        if !self.is_text() {
            return Err(DecodeError::NotATextRecord);
        }
        text::decode(&self.payload)
    }

    /// Serialize as a standalone record (MB and ME both set)
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(
            &mut out,
            RecordFlags::MESSAGE_BEGIN | RecordFlags::MESSAGE_END,
        );
        out
    }

    /// Parse exactly one record; the flags MB/ME are not checked
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (record, _flags, consumed) = Self::read_from(bytes, 0)?;
        if consumed < bytes.len() {
            return Err(DecodeError::TrailingBytes(bytes.len() - consumed));
        }
        Ok(record)
    }

    /// Size of the serialized record
    pub fn encoded_len(&self) -> usize {
        let payload_len_field = if self.is_short() { 1 } else { 4 };
        let id_len_field = if self.id.is_empty() { 0 } else { 1 };
        2 + payload_len_field
            + id_len_field
            + self.record_type.len()
            + self.id.len()
            + self.payload.len()
    }

    fn is_short(&self) -> bool {
        self.payload.len() <= MAX_SHORT_PAYLOAD
    }

    /// Append the record to `out`. Only MB and ME are taken from `position`;
    /// SR and IL follow from the record itself.
    pub(crate) fn write_to(&self, out: &mut Vec<u8>, position: RecordFlags) {
        let mut flags = position & (RecordFlags::MESSAGE_BEGIN | RecordFlags::MESSAGE_END);
        if self.is_short() {
            flags |= RecordFlags::SHORT_RECORD;
        }
        if !self.id.is_empty() {
            flags |= RecordFlags::ID_LENGTH_PRESENT;
        }

        // Lengths were bounded in `new`
        out.push(flags.bits() | self.tnf.bits());
        out.push(self.record_type.len() as u8);
        if self.is_short() {
            out.push(self.payload.len() as u8);
        } else {
            out.extend_from_slice(&(self.payload.len() as u32).to_be_bytes());
        }
        if !self.id.is_empty() {
            out.push(self.id.len() as u8);
        }
        out.extend_from_slice(&self.record_type);
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.payload);
    }

    /// Read one record starting at `offset`. Returns the record, its header
    /// flags and the number of bytes consumed.
    pub(crate) fn read_from(
        bytes: &[u8],
        offset: usize,
    ) -> Result<(Self, RecordFlags, usize), DecodeError> {
        let mut reader = ByteReader::new(bytes, offset);

        let header = reader.u8()?;
        let flags = RecordFlags::from_bits_truncate(header);
        let tnf = Tnf::from_bits(header).ok_or(DecodeError::ReservedTnf(offset))?;

        if flags.contains(RecordFlags::CHUNKED) {
            return Err(DecodeError::ChunkedRecord(offset));
        }
        if tnf == Tnf::Unchanged {
            return Err(DecodeError::UnchangedTnf(offset));
        }

        let type_len = reader.u8()? as usize;
        let payload_len = if flags.contains(RecordFlags::SHORT_RECORD) {
            reader.u8()? as usize
        } else {
            let raw = reader.take(4)?;
            u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize
        };
        let id_len = if flags.contains(RecordFlags::ID_LENGTH_PRESENT) {
            reader.u8()? as usize
        } else {
            0
        };

        let record_type = reader.take(type_len)?.to_vec();
        let id = reader.take(id_len)?.to_vec();
        let payload = reader.take(payload_len)?.to_vec();

        if tnf == Tnf::Empty && !(record_type.is_empty() && id.is_empty() && payload.is_empty()) {
            return Err(DecodeError::InvalidEmptyRecord(offset));
        }

        tracing::trace!(
            offset,
            tnf = tnf.name(),
            type_len,
            id_len,
            payload_len,
            "read NDEF record"
        );

        let consumed = reader.position() - offset;
        Ok((
            Self {
                tnf,
                record_type,
                id,
                payload,
            },
            flags,
            consumed,
        ))
    }
}

/// Bounds-checked cursor over record bytes
struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.bytes.len().saturating_sub(self.pos);
        if len > available {
            return Err(DecodeError::TruncatedRecord {
                offset: self.pos,
                needed: len,
                available,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }
}
