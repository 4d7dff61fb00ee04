//! Binary layout and value decoding for COBOL copybook fields.
//!
//! Provides the field descriptor model, precision validation, bit-width
//! calculation for every supported representation, record value decoding,
//! and a persistent arena for the multi-pass schema pipeline.

pub mod codec;
pub mod config;
pub mod error;
pub mod field;
pub mod schema;
pub mod types;

pub use codec::{CodecKey, CodecProvider, Decoder, StandardCodecs};
pub use error::{DecodeError, DefinitionError, SchemaError};
pub use field::{BinaryProperties, FieldDecl, Primitive};
pub use schema::{FieldId, Group, Node, Schema};
pub use types::{DataType, Decimal, Encoding, SignPosition, Usage, Value};

pub use num_bigint::BigInt;
