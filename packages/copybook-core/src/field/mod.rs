//! Primitive field descriptors: validation, binary layout and value decoding.

mod decode;
mod descriptor;
mod layout;
pub mod validation;

pub use descriptor::{BinaryProperties, FieldDecl, Primitive};
