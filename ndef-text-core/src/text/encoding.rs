use crate::error::DecodeError;

/// Bit 7 of the text record status byte.
pub const UTF16_FLAG: u8 = 0x80;

const BOM_BIG_ENDIAN: [u8; 2] = [0xFE, 0xFF];
const BOM_LITTLE_ENDIAN: [u8; 2] = [0xFF, 0xFE];

/// Text encodings a well-known text record can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TextEncoding {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "UTF-8"))]
    Utf8,
    #[cfg_attr(feature = "serde", serde(rename = "UTF-16"))]
    Utf16,
}

impl TextEncoding {
    /// Read the encoding flag out of a status byte
    pub fn from_status_byte(status: u8) -> Self {
        if status & UTF16_FLAG == 0 {
            TextEncoding::Utf8
        } else {
            TextEncoding::Utf16
        }
    }

    /// The bit this encoding contributes to the status byte
    pub fn status_bit(&self) -> u8 {
        match self {
            TextEncoding::Utf8 => 0,
            TextEncoding::Utf16 => UTF16_FLAG,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16 => "UTF-16",
        }
    }

    /// Encode text. UTF-16 is written big-endian. A byte order mark is only
    /// written when the text itself starts with U+FEFF or U+FFFE, which a
    /// reader would otherwise take for a BOM.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Utf16 => {
                let mut out = Vec::with_capacity(2 + text.len() * 2);
                if text.starts_with(['\u{FEFF}', '\u{FFFE}']) {
                    out.extend_from_slice(&BOM_BIG_ENDIAN);
                }
                out.extend(text.encode_utf16().flat_map(|unit| unit.to_be_bytes()));
                out
            }
        }
    }

    pub fn decode(&self, data: &[u8]) -> Result<String, DecodeError> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(data)
                .map(str::to_owned)
                .map_err(|e| DecodeError::InvalidUtf8(e.to_string())),
            TextEncoding::Utf16 => decode_utf16(data),
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn decode_utf16(data: &[u8]) -> Result<String, DecodeError> {
    if data.len() % 2 != 0 {
        return Err(DecodeError::OddUtf16Length(data.len()));
    }

    // Without a BOM the record is big-endian
    let (body, little_endian) = match data.get(..2) {
        Some(bom) if bom == BOM_BIG_ENDIAN => (&data[2..], false),
        Some(bom) if bom == BOM_LITTLE_ENDIAN => (&data[2..], true),
        _ => (data, false),
    };

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            let bytes = [pair[0], pair[1]];
            if little_endian {
                u16::from_le_bytes(bytes)
            } else {
                u16::from_be_bytes(bytes)
            }
        })
        .collect();

    String::from_utf16(&units).map_err(|e| DecodeError::InvalidUtf16(e.to_string()))
}
