//! Copybook error types.

use thiserror::Error;

/// A field declaration violates a precision or scale limit.
///
/// Fatal to compiling the schema that contains the field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// Integer digits (precision minus scale) exceed the decimal limit
    #[error("Line {line}: field '{field}' has {integer_digits} integer digits (precision {precision}, scale {scale}), maximum is {limit}")]
    DecimalPrecisionExceeded {
        line: usize,
        field: String,
        precision: u32,
        scale: u32,
        integer_digits: u32,
        limit: u32,
    },

    /// Scale exceeds the decimal scale limit
    #[error("Line {line}: field '{field}' has scale {scale}, maximum is {limit}")]
    DecimalScaleExceeded {
        line: usize,
        field: String,
        scale: u32,
        limit: u32,
    },

    /// Binary integer declared with too many digits
    #[error("Line {line}: binary field '{field}' has precision {precision}, maximum is {limit}")]
    BinaryPrecisionExceeded {
        line: usize,
        field: String,
        precision: u32,
        limit: u32,
    },
}

/// Bytes cannot be interpreted under the declared representation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A digit position holds something other than a decimal digit
    #[error("Invalid digit 0x{byte:02X} at position {position}")]
    InvalidDigit { byte: u8, position: usize },

    /// Sign nibble or sign byte is not recognized
    #[error("Invalid sign 0x{byte:02X}")]
    InvalidSign { byte: u8 },

    /// Byte range length does not match the representation
    #[error("Length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Text bytes are not valid for the encoding
    #[error("Invalid text: {0}")]
    InvalidText(String),
}

/// Schema arena errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No field with the given name
    #[error("Field '{name}' not found")]
    FieldNotFound { name: String },

    /// Field id does not address a node in this schema
    #[error("Unknown field id {id}")]
    UnknownId { id: usize },

    /// Field id addresses a group where a primitive was expected
    #[error("Field '{name}' is a group, not a primitive")]
    NotPrimitive { name: String },

    /// A primitive failed validation during the layout pass
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}
