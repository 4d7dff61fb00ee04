//! Encoding codec capability: minimum bit widths and byte decoders.
//!
//! The layout calculator and value decoder treat a [CodecProvider] as an
//! opaque collaborator. [StandardCodecs] is the reference provider covering
//! EBCDIC/ASCII/UTF-16 text, zoned and packed decimal, binary integers and
//! floating point.

mod ebcdic;
mod numbers;
mod standard;
mod text;

use std::sync::Arc;

use crate::error::DecodeError;
use crate::types::{DataType, Encoding, SignPosition, Usage, Value};

pub use standard::StandardCodecs;

/// Type alias for decode function signature.
pub type DecodeFn = dyn Fn(&[u8]) -> Result<Option<Value>, DecodeError> + Send + Sync;

/// Decode function bound to a field at construction.
///
/// `Ok(None)` means the bytes encode a null (e.g. a blank numeric field).
pub type Decoder = Arc<DecodeFn>;

/// Inputs to a minimum bit width lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodecKey {
    /// Character or digit encoding
    pub encoding: Encoding,
    /// Compact representation, `None` for DISPLAY
    pub compact: Option<Usage>,
    /// Number of digits (or characters for text)
    pub precision: u32,
    /// Sign placement, `None` for unsigned
    pub sign_position: Option<SignPosition>,
}

/// Source of per-representation bit widths and decode functions.
pub trait CodecProvider: Send + Sync {
    /// Minimum bit width for the representation.
    ///
    /// For DISPLAY this is the width of one digit or character. For compact
    /// representations it is the width of the whole container.
    fn min_bit_width(&self, key: &CodecKey) -> usize;

    /// Decode function for fields of the given type.
    fn decoder(&self, data_type: &DataType) -> Decoder;
}

impl<T: CodecProvider + ?Sized> CodecProvider for Arc<T> {
    fn min_bit_width(&self, key: &CodecKey) -> usize {
        (**self).min_bit_width(key)
    }

    fn decoder(&self, data_type: &DataType) -> Decoder {
        (**self).decoder(data_type)
    }
}

impl<T: CodecProvider + ?Sized> CodecProvider for &T {
    fn min_bit_width(&self, key: &CodecKey) -> usize {
        (**self).min_bit_width(key)
    }

    fn decoder(&self, data_type: &DataType) -> Decoder {
        (**self).decoder(data_type)
    }
}
