//! Precision and scale limits for primitive fields.

use crate::config::{MAX_BINARY_INT_PRECISION, MAX_DECIMAL_PRECISION, MAX_DECIMAL_SCALE};
use crate::error::DefinitionError;
use crate::types::DataType;

use super::Primitive;

/// Validates a field's data type against the precision and scale limits.
///
/// # Arguments
/// * `field` - Field to validate
///
/// # Returns
/// `Ok(())` if the field is within limits, `Err(DefinitionError)` naming the
/// line, field and violated limit otherwise.
pub fn validate(field: &Primitive) -> Result<(), DefinitionError> {
    match *field.data_type() {
        DataType::AlphaNumeric { .. } => Ok(()),
        DataType::Decimal {
            precision, scale, ..
        } => {
            let integer_digits = precision.saturating_sub(scale);
            if integer_digits > MAX_DECIMAL_PRECISION {
                return Err(DefinitionError::DecimalPrecisionExceeded {
                    line: field.line_number(),
                    field: field.name().to_string(),
                    precision,
                    scale,
                    integer_digits,
                    limit: MAX_DECIMAL_PRECISION,
                });
            }
            if scale > MAX_DECIMAL_SCALE {
                return Err(DefinitionError::DecimalScaleExceeded {
                    line: field.line_number(),
                    field: field.name().to_string(),
                    scale,
                    limit: MAX_DECIMAL_SCALE,
                });
            }
            Ok(())
        }
        DataType::Integral {
            compact, precision, ..
        } => {
            if compact.is_some() && precision > MAX_BINARY_INT_PRECISION {
                return Err(DefinitionError::BinaryPrecisionExceeded {
                    line: field.line_number(),
                    field: field.name().to_string(),
                    precision,
                    limit: MAX_BINARY_INT_PRECISION,
                });
            }
            Ok(())
        }
    }
}
