//! Limits and codec configuration.

use serde::{Deserialize, Serialize};

/// Maximum integer digits (precision minus scale) of a decimal field.
pub const MAX_DECIMAL_PRECISION: u32 = 38;

/// Maximum scale of a decimal field.
pub const MAX_DECIMAL_SCALE: u32 = 18;

/// Maximum precision of an integral field stored in a binary representation.
pub const MAX_BINARY_INT_PRECISION: u32 = 38;

/// Which side of a text value gets whitespace removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringTrimming {
    None,
    Left,
    Right,
    #[default]
    Both,
}

/// Binary format of COMP-1 / COMP-2 fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatingPointFormat {
    /// IBM hexadecimal floating point, big-endian
    #[default]
    IbmBigEndian,
    /// IEEE 754, big-endian
    IeeeBigEndian,
    /// IEEE 754, little-endian
    IeeeLittleEndian,
}

/// EBCDIC code page used for text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePage {
    /// Characters shared by all common EBCDIC code pages
    #[default]
    Common,
    /// IBM code page 037 (US/Canada)
    Cp037,
}

/// Codec configuration for [crate::codec::StandardCodecs].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Whitespace trimming applied to text fields
    pub string_trimming: StringTrimming,
    /// Format of floating point fields
    pub floating_point_format: FloatingPointFormat,
    /// Reject zoned numbers without a sign where one is declared
    pub strict_sign: bool,
    /// EBCDIC code page for text fields
    pub ebcdic_code_page: CodePage,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            string_trimming: StringTrimming::Both,
            floating_point_format: FloatingPointFormat::IbmBigEndian,
            strict_sign: false,
            ebcdic_code_page: CodePage::Common,
        }
    }
}

impl CodecConfig {
    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
