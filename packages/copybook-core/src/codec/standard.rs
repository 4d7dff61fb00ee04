//! Reference codec provider.

use std::sync::Arc;

use crate::config::CodecConfig;
use crate::error::DecodeError;
use crate::types::{DataType, Decimal, Encoding, Usage, Value};

use super::numbers::{self, Number, NumericFormat};
use super::text;
use super::{CodecKey, CodecProvider, Decoder};

/// Width of a COMP / COMP-4 / COMP-5 / COMP-9 container for a digit count.
fn binary_bit_width(precision: u32) -> usize {
    match precision {
        0..=4 => 16,
        5..=9 => 32,
        10..=18 => 64,
        _ => 128,
    }
}

/// Codec provider for the encodings and representations in [crate::types].
#[derive(Debug, Clone, Default)]
pub struct StandardCodecs {
    config: CodecConfig,
}

impl StandardCodecs {
    /// Creates a provider with the given configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn numeric_format(
        &self,
        encoding: Encoding,
        compact: Option<Usage>,
        signed: bool,
        scale: u32,
        explicit_decimal_point: bool,
    ) -> NumericFormat {
        NumericFormat {
            encoding,
            compact,
            signed,
            scale,
            explicit_decimal_point,
            strict_sign: self.config.strict_sign,
            floating_point_format: self.config.floating_point_format,
        }
    }
}

impl CodecProvider for StandardCodecs {
    fn min_bit_width(&self, key: &CodecKey) -> usize {
        match key.compact {
            None => key.encoding.bits_per_char(),
            Some(Usage::Float) => 32,
            Some(Usage::Double) => 64,
            Some(Usage::Packed) => 4,
            Some(Usage::PackedUnsigned) => key.precision as usize * 4,
            Some(Usage::Binary | Usage::BinaryLittleEndian) => binary_bit_width(key.precision),
        }
    }

    fn decoder(&self, data_type: &DataType) -> Decoder {
        match *data_type {
            DataType::AlphaNumeric { encoding, .. } => {
                let code_page = self.config.ebcdic_code_page;
                let trimming = self.config.string_trimming;
                Arc::new(move |bytes: &[u8]| -> Result<Option<Value>, DecodeError> {
                    let decoded = match encoding {
                        Encoding::Ebcdic => text::decode_ebcdic(bytes, code_page),
                        Encoding::Ascii => text::decode_ascii(bytes),
                        Encoding::Utf16 => text::decode_utf16(bytes)?,
                    };
                    Ok(Some(Value::Text(text::trim(decoded, trimming))))
                })
            }
            DataType::Decimal {
                encoding,
                compact,
                scale,
                sign_position,
                explicit_decimal_point,
                ..
            } => {
                let format = self.numeric_format(
                    encoding,
                    compact,
                    sign_position.is_some(),
                    scale,
                    explicit_decimal_point,
                );
                Arc::new(move |bytes: &[u8]| -> Result<Option<Value>, DecodeError> {
                    Ok(numbers::decode_number(bytes, &format)?.map(|number| match number {
                        Number::Fixed { unscaled, scale } => {
                            Value::Decimal(Decimal::new(unscaled, scale))
                        }
                        Number::Float(f) => Value::Float(f),
                    }))
                })
            }
            DataType::Integral {
                encoding,
                compact,
                sign_position,
                ..
            } => {
                let format =
                    self.numeric_format(encoding, compact, sign_position.is_some(), 0, false);
                Arc::new(move |bytes: &[u8]| -> Result<Option<Value>, DecodeError> {
                    Ok(numbers::decode_number(bytes, &format)?.map(|number| match number {
                        Number::Fixed { unscaled, .. } => Value::Integer(unscaled),
                        Number::Float(f) => Value::Float(f),
                    }))
                })
            }
        }
    }
}
