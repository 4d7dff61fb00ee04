//! Numeric field decoding: zoned, packed, binary and floating point.

use num_bigint::BigInt;

use crate::config::FloatingPointFormat;
use crate::error::DecodeError;
use crate::types::{Encoding, Usage};

/// Everything a numeric decoder needs to know about a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NumericFormat {
    pub encoding: Encoding,
    pub compact: Option<Usage>,
    pub signed: bool,
    pub scale: u32,
    pub explicit_decimal_point: bool,
    pub strict_sign: bool,
    pub floating_point_format: FloatingPointFormat,
}

/// A decoded number before it is shaped into a [crate::types::Value].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Number {
    /// `unscaled * 10^-scale`
    Fixed { unscaled: BigInt, scale: u32 },
    Float(f64),
}

/// Decodes a numeric field according to its representation.
pub(crate) fn decode_number(
    bytes: &[u8],
    format: &NumericFormat,
) -> Result<Option<Number>, DecodeError> {
    match format.compact {
        None => decode_display(bytes, format),
        Some(Usage::Packed) => Ok(decode_packed(bytes, true)?.map(|unscaled| Number::Fixed {
            unscaled,
            scale: format.scale,
        })),
        Some(Usage::PackedUnsigned) => {
            Ok(decode_packed(bytes, false)?.map(|unscaled| Number::Fixed {
                unscaled,
                scale: format.scale,
            }))
        }
        Some(Usage::Binary) => Ok(Some(Number::Fixed {
            unscaled: decode_binary(bytes, format.signed, false)?,
            scale: format.scale,
        })),
        Some(Usage::BinaryLittleEndian) => Ok(Some(Number::Fixed {
            unscaled: decode_binary(bytes, format.signed, true)?,
            scale: format.scale,
        })),
        Some(Usage::Float) => Ok(Some(Number::Float(decode_float(
            bytes,
            false,
            format.floating_point_format,
        )?))),
        Some(Usage::Double) => Ok(Some(Number::Float(decode_float(
            bytes,
            true,
            format.floating_point_format,
        )?))),
    }
}

enum Symbol {
    Digit(u8),
    /// Digit carrying the sign in its zone
    Overpunch(u8, bool),
    Plus,
    Minus,
    Point,
    Blank,
    Other,
}

fn classify_ebcdic(byte: u8) -> Symbol {
    match byte {
        0xF0..=0xF9 => Symbol::Digit(byte - 0xF0),
        0xC0..=0xC9 => Symbol::Overpunch(byte - 0xC0, false),
        0xD0..=0xD9 => Symbol::Overpunch(byte - 0xD0, true),
        0x4E => Symbol::Plus,
        0x60 => Symbol::Minus,
        0x4B => Symbol::Point,
        0x40 | 0x00 => Symbol::Blank,
        _ => Symbol::Other,
    }
}

fn classify_ascii(byte: u8) -> Symbol {
    match byte {
        b'0'..=b'9' => Symbol::Digit(byte - b'0'),
        b'{' => Symbol::Overpunch(0, false),
        b'A'..=b'I' => Symbol::Overpunch(byte - b'A' + 1, false),
        b'}' => Symbol::Overpunch(0, true),
        b'J'..=b'R' => Symbol::Overpunch(byte - b'J' + 1, true),
        b'+' => Symbol::Plus,
        b'-' => Symbol::Minus,
        b'.' => Symbol::Point,
        b' ' | 0x00 => Symbol::Blank,
        _ => Symbol::Other,
    }
}

/// Decodes a zoned (DISPLAY) number. All-blank input is a null.
fn decode_display(bytes: &[u8], format: &NumericFormat) -> Result<Option<Number>, DecodeError> {
    match format.encoding {
        Encoding::Ebcdic => parse_display(bytes.iter().copied().enumerate(), classify_ebcdic, format),
        Encoding::Ascii => parse_display(bytes.iter().copied().enumerate(), classify_ascii, format),
        Encoding::Utf16 => {
            if bytes.len() % 2 != 0 {
                return Err(DecodeError::LengthMismatch {
                    expected: bytes.len() + 1,
                    actual: bytes.len(),
                });
            }
            // Non-ASCII code units can never be digits; 0xFF classifies as Other.
            let units = bytes.chunks_exact(2).enumerate().map(|(i, pair)| {
                let unit = u16::from_be_bytes([pair[0], pair[1]]);
                (i, u8::try_from(unit).ok().filter(u8::is_ascii).unwrap_or(0xFF))
            });
            parse_display(units, classify_ascii, format)
        }
    }
}

fn parse_display(
    units: impl Iterator<Item = (usize, u8)>,
    classify: fn(u8) -> Symbol,
    format: &NumericFormat,
) -> Result<Option<Number>, DecodeError> {
    let mut unscaled = BigInt::default();
    let mut digits = 0usize;
    let mut frac_digits = 0u32;
    let mut negative = false;
    let mut sign_byte = None;
    let mut saw_point = false;
    let mut started = false;
    let mut ended = false;
    let mut last = (0usize, 0u8);

    for (position, byte) in units {
        let symbol = classify(byte);
        if let Symbol::Blank = symbol {
            ended |= started;
            continue;
        }
        if ended {
            return Err(DecodeError::InvalidDigit { byte, position });
        }
        started = true;
        last = (position, byte);

        let digit = match symbol {
            Symbol::Digit(d) => Some(d),
            Symbol::Overpunch(d, neg) => {
                if sign_byte.is_some() {
                    return Err(DecodeError::InvalidSign { byte });
                }
                negative = neg;
                sign_byte = Some(byte);
                Some(d)
            }
            Symbol::Plus | Symbol::Minus => {
                if sign_byte.is_some() {
                    return Err(DecodeError::InvalidSign { byte });
                }
                negative = matches!(symbol, Symbol::Minus);
                sign_byte = Some(byte);
                None
            }
            Symbol::Point if format.explicit_decimal_point && !saw_point => {
                saw_point = true;
                None
            }
            _ => return Err(DecodeError::InvalidDigit { byte, position }),
        };

        if let Some(d) = digit {
            digits += 1;
            if saw_point {
                frac_digits += 1;
            }
            unscaled = unscaled * 10u32 + u32::from(d);
        }
    }

    if !started {
        return Ok(None);
    }
    if digits == 0 {
        let (position, byte) = last;
        return Err(DecodeError::InvalidDigit { byte, position });
    }
    match sign_byte {
        Some(byte) if negative && !format.signed => {
            return Err(DecodeError::InvalidSign { byte });
        }
        None if format.signed && format.strict_sign => {
            return Err(DecodeError::InvalidSign { byte: last.1 });
        }
        _ => {}
    }
    if negative {
        unscaled = -unscaled;
    }

    let scale = if format.explicit_decimal_point {
        let scale = frac_digits.max(format.scale);
        unscaled *= BigInt::from(10u32).pow(scale - frac_digits);
        scale
    } else {
        format.scale
    };

    Ok(Some(Number::Fixed { unscaled, scale }))
}

/// Decodes packed decimal (two digits per byte).
///
/// Signed fields end with a sign nibble: C, A, E, F positive; D, B negative.
/// Low-values or EBCDIC spaces across the whole field decode as null.
fn decode_packed(bytes: &[u8], signed: bool) -> Result<Option<BigInt>, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::LengthMismatch {
            expected: 1,
            actual: 0,
        });
    }
    if bytes.iter().all(|&b| b == 0x00) || bytes.iter().all(|&b| b == 0x40) {
        return Ok(None);
    }

    let mut value = BigInt::default();
    let last = bytes.len() - 1;
    for (position, &byte) in bytes.iter().enumerate() {
        let high = byte >> 4;
        let low = byte & 0x0F;
        let nibble_count = if signed && position == last { 1 } else { 2 };
        for nibble in [high, low].into_iter().take(nibble_count) {
            if nibble > 9 {
                return Err(DecodeError::InvalidDigit { byte, position });
            }
            value = value * 10u32 + u32::from(nibble);
        }
    }

    if signed {
        let sign = bytes[last];
        match sign & 0x0F {
            0x0C | 0x0A | 0x0E | 0x0F => {}
            0x0D | 0x0B => value = -value,
            _ => return Err(DecodeError::InvalidSign { byte: sign }),
        }
    }
    Ok(Some(value))
}

/// Decodes a two's complement (signed) or plain (unsigned) binary integer.
fn decode_binary(bytes: &[u8], signed: bool, little_endian: bool) -> Result<BigInt, DecodeError> {
    if bytes.is_empty() || bytes.len() > 16 {
        return Err(DecodeError::LengthMismatch {
            expected: bytes.len().clamp(1, 16),
            actual: bytes.len(),
        });
    }

    let fold = |acc: u128, &b: &u8| (acc << 8) | u128::from(b);
    let raw = if little_endian {
        bytes.iter().rev().fold(0u128, fold)
    } else {
        bytes.iter().fold(0u128, fold)
    };

    let bits = bytes.len() * 8;
    let negative = signed && (raw >> (bits - 1)) & 1 == 1;
    if negative {
        let extended = if bits < 128 { raw | (!0u128 << bits) } else { raw };
        return Ok(BigInt::from(extended as i128));
    }
    Ok(BigInt::from(raw))
}

/// Decodes COMP-1 (4 bytes) or COMP-2 (8 bytes).
fn decode_float(
    bytes: &[u8],
    double: bool,
    format: FloatingPointFormat,
) -> Result<f64, DecodeError> {
    let expected = if double { 8 } else { 4 };
    if bytes.len() != expected {
        return Err(DecodeError::LengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let mut buf = [0u8; 8];
    buf[..expected].copy_from_slice(bytes);
    let value = match (format, double) {
        (FloatingPointFormat::IeeeBigEndian, false) => {
            f64::from(f32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]))
        }
        (FloatingPointFormat::IeeeLittleEndian, false) => {
            f64::from(f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]))
        }
        (FloatingPointFormat::IeeeBigEndian, true) => f64::from_be_bytes(buf),
        (FloatingPointFormat::IeeeLittleEndian, true) => f64::from_le_bytes(buf),
        (FloatingPointFormat::IbmBigEndian, _) => ibm_hex_float(&buf[..expected]),
    };
    Ok(value)
}

/// IBM hexadecimal float: sign bit, excess-64 base-16 exponent, fraction.
fn ibm_hex_float(bytes: &[u8]) -> f64 {
    let fraction_bits = (bytes.len() * 8 - 8) as i32;
    let negative = bytes[0] & 0x80 != 0;
    let exponent = i32::from(bytes[0] & 0x7F) - 64;
    let fraction = bytes[1..]
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
    let magnitude = fraction as f64 / 2f64.powi(fraction_bits) * 2f64.powi(4 * exponent);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}
