//! Storage width of a primitive field.

use crate::codec::{CodecKey, CodecProvider};
use crate::error::DefinitionError;
use crate::types::{DataType, Usage};

use super::validation;
use super::{BinaryProperties, Primitive};

/// A separate sign is one storage byte in every encoding.
const SIGN_BYTE_BITS: usize = 8;

/// Rounds a bit count up to whole bytes.
fn byte_aligned(bits: usize) -> usize {
    bits.div_ceil(8) * 8
}

/// Width of a numeric field in bits, before byte alignment.
///
/// Packed decimal stores two digits per byte plus a sign nibble. Other
/// compact representations use the codec's container width. DISPLAY uses
/// one digit position per digit plus an optional separate sign byte.
fn numeric_bits<C: CodecProvider + ?Sized>(
    codecs: &C,
    key: &CodecKey,
    is_sign_separate: bool,
) -> usize {
    let precision = key.precision as usize;
    match key.compact {
        Some(Usage::Packed) => (precision + 1) * 4,
        Some(_) => codecs.min_bit_width(key),
        None => {
            let sign_bits = if is_sign_separate { SIGN_BYTE_BITS } else { 0 };
            precision * codecs.min_bit_width(key) + sign_bits
        }
    }
}

impl Primitive {
    /// Validates the field and returns its storage width in bits.
    ///
    /// The width is always a multiple of 8.
    pub fn binary_size_bits<C: CodecProvider + ?Sized>(
        &self,
        codecs: &C,
    ) -> Result<usize, DefinitionError> {
        if let Err(e) = validation::validate(self) {
            tracing::warn!("Rejecting field definition: {}", e);
            return Err(e);
        }

        let bits = match *self.data_type() {
            DataType::AlphaNumeric { length, encoding } => {
                let key = CodecKey {
                    encoding,
                    compact: None,
                    precision: length,
                    sign_position: None,
                };
                length as usize * codecs.min_bit_width(&key)
            }
            DataType::Decimal {
                encoding,
                compact,
                precision,
                sign_position,
                is_sign_separate,
                explicit_decimal_point,
                ..
            } => {
                let point = u32::from(compact.is_none() && explicit_decimal_point);
                let key = CodecKey {
                    encoding,
                    compact,
                    precision: precision + point,
                    sign_position,
                };
                numeric_bits(codecs, &key, is_sign_separate)
            }
            DataType::Integral {
                encoding,
                compact,
                precision,
                sign_position,
                is_sign_separate,
            } => {
                let key = CodecKey {
                    encoding,
                    compact,
                    precision,
                    sign_position,
                };
                numeric_bits(codecs, &key, is_sign_separate)
            }
        };

        Ok(byte_aligned(bits))
    }

    /// Returns a copy positioned at `offset_bits` with its width resolved.
    pub fn resolve_binary_properties<C: CodecProvider + ?Sized>(
        &self,
        offset_bits: usize,
        codecs: &C,
    ) -> Result<Self, DefinitionError> {
        let bit_length = self.binary_size_bits(codecs)?;
        tracing::debug!(
            "Resolved field '{}' at line {}: {} bits at offset {}",
            self.name(),
            self.line_number(),
            bit_length,
            offset_bits
        );
        Ok(self.with_binary_properties(BinaryProperties::new(offset_bits, bit_length)))
    }
}
