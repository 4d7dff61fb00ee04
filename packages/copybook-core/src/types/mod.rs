//! Field data types and decoded values.

mod value;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use value::{Decimal, Value};

/// Character or digit encoding of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    Ebcdic,
    Ascii,
    Utf16,
}

impl Encoding {
    /// Storage width of one character in bits.
    pub fn bits_per_char(self) -> usize {
        match self {
            Encoding::Ebcdic | Encoding::Ascii => 8,
            Encoding::Utf16 => 16,
        }
    }
}

/// Compact (non-DISPLAY) numeric representation declared by a USAGE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Usage {
    /// COMP-1, single precision float
    Float,
    /// COMP-2, double precision float
    Double,
    /// COMP-3, signed packed decimal
    Packed,
    /// COMP-3U, unsigned packed decimal
    PackedUnsigned,
    /// COMP / COMP-4 / COMP-5, big-endian binary
    Binary,
    /// COMP-9, little-endian binary
    BinaryLittleEndian,
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Usage::Float => "COMP-1",
            Usage::Double => "COMP-2",
            Usage::Packed => "COMP-3",
            Usage::PackedUnsigned => "COMP-3U",
            Usage::Binary => "COMP-4",
            Usage::BinaryLittleEndian => "COMP-9",
        };
        f.write_str(name)
    }
}

/// Where the sign of a DISPLAY number is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignPosition {
    Leading,
    Trailing,
}

/// Data type of a primitive field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataType {
    /// PIC X(n) / PIC A(n)
    AlphaNumeric { length: u32, encoding: Encoding },
    /// Numeric with a fractional part (implied or explicit decimal point)
    Decimal {
        encoding: Encoding,
        #[serde(default)]
        compact: Option<Usage>,
        precision: u32,
        scale: u32,
        #[serde(default)]
        sign_position: Option<SignPosition>,
        #[serde(default)]
        is_sign_separate: bool,
        #[serde(default)]
        explicit_decimal_point: bool,
    },
    /// Whole number
    Integral {
        encoding: Encoding,
        #[serde(default)]
        compact: Option<Usage>,
        precision: u32,
        #[serde(default)]
        sign_position: Option<SignPosition>,
        #[serde(default)]
        is_sign_separate: bool,
    },
}

impl DataType {
    /// Encoding of the field's bytes.
    pub fn encoding(&self) -> Encoding {
        match self {
            DataType::AlphaNumeric { encoding, .. }
            | DataType::Decimal { encoding, .. }
            | DataType::Integral { encoding, .. } => *encoding,
        }
    }

    /// Compact representation, `None` for DISPLAY and text fields.
    pub fn compact(&self) -> Option<Usage> {
        match self {
            DataType::AlphaNumeric { .. } => None,
            DataType::Decimal { compact, .. } | DataType::Integral { compact, .. } => *compact,
        }
    }

    /// True for Decimal and Integral.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, DataType::AlphaNumeric { .. })
    }
}

fn write_digits(f: &mut fmt::Formatter<'_>, symbol: char, count: u32) -> fmt::Result {
    match count {
        0 => Ok(()),
        1 => write!(f, "{symbol}"),
        n => write!(f, "{symbol}({n})"),
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::AlphaNumeric { length, .. } => write!(f, "X({length})"),
            DataType::Decimal {
                compact,
                precision,
                scale,
                sign_position,
                explicit_decimal_point,
                ..
            } => {
                if sign_position.is_some() {
                    f.write_str("S")?;
                }
                write_digits(f, '9', precision.saturating_sub(*scale))?;
                f.write_str(if *explicit_decimal_point { "." } else { "V" })?;
                write_digits(f, '9', *scale)?;
                if let Some(usage) = compact {
                    write!(f, " {usage}")?;
                }
                Ok(())
            }
            DataType::Integral {
                compact,
                precision,
                sign_position,
                ..
            } => {
                if sign_position.is_some() {
                    f.write_str("S")?;
                }
                write_digits(f, '9', *precision)?;
                if let Some(usage) = compact {
                    write!(f, " {usage}")?;
                }
                Ok(())
            }
        }
    }
}
