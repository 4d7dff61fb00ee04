//! Text field decoding.

use crate::config::{CodePage, StringTrimming};
use crate::error::DecodeError;

use super::ebcdic;

/// Decodes EBCDIC bytes through the code page table.
pub(crate) fn decode_ebcdic(bytes: &[u8], code_page: CodePage) -> String {
    bytes.iter().map(|&b| ebcdic::to_char(b, code_page)).collect()
}

/// Decodes ASCII bytes. Control characters become spaces, bytes above
/// 0x7F are read as Latin-1.
pub(crate) fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x00..=0x1F | 0x7F => ' ',
            _ => b as char,
        })
        .collect()
}

/// Decodes big-endian UTF-16.
pub(crate) fn decode_utf16(bytes: &[u8]) -> Result<String, DecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::LengthMismatch {
            expected: bytes.len() + 1,
            actual: bytes.len(),
        });
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|e| DecodeError::InvalidText(e.to_string()))
}

/// Applies the configured trimming policy.
pub(crate) fn trim(text: String, trimming: StringTrimming) -> String {
    match trimming {
        StringTrimming::None => text,
        StringTrimming::Left => text.trim_start().to_string(),
        StringTrimming::Right => text.trim_end().to_string(),
        StringTrimming::Both => text.trim().to_string(),
    }
}
