//! Immutable descriptor of one leaf field in a copybook.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{CodecProvider, Decoder};
use crate::schema::FieldId;
use crate::types::DataType;

/// Resolved position and size of a field within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BinaryProperties {
    /// Bit offset from the start of the record
    pub offset_bits: usize,
    /// Storage width in bits, always a multiple of 8
    pub bit_length: usize,
    /// Storage width in bytes
    pub byte_length: usize,
}

impl BinaryProperties {
    /// Creates properties for a field of `bit_length` bits at `offset_bits`.
    pub fn new(offset_bits: usize, bit_length: usize) -> Self {
        Self {
            offset_bits,
            bit_length,
            byte_length: bit_length / 8,
        }
    }
}

/// Field statement as recognized by the copybook compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Level number (01-49)
    pub level: u32,
    /// Field name
    pub name: String,
    /// Source line of the declaration
    pub line_number: usize,
    /// Data type with encoding attributes
    pub data_type: DataType,
    /// Field whose storage this one overlaps
    #[serde(default)]
    pub redefines: Option<String>,
    /// Fixed repeat count
    #[serde(default)]
    pub occurs: Option<u32>,
    /// Upper bound of a variable repeat count
    #[serde(default)]
    pub to: Option<u32>,
    /// Sibling field holding the runtime repeat count
    #[serde(default)]
    pub depending_on: Option<String>,
    /// FILLER field
    #[serde(default)]
    pub is_filler: bool,
    /// Containing group
    #[serde(default)]
    pub parent: Option<FieldId>,
}

/// A primitive (leaf) field.
///
/// Immutable: the `with_*` methods return a new descriptor with exactly
/// one attribute replaced.
#[derive(Clone)]
pub struct Primitive {
    level: u32,
    name: String,
    line_number: usize,
    data_type: DataType,
    redefines: Option<String>,
    is_redefined: bool,
    occurs: Option<u32>,
    to: Option<u32>,
    depending_on: Option<String>,
    is_dependee: bool,
    is_filler: bool,
    decode: Decoder,
    binary_properties: BinaryProperties,
    parent: Option<FieldId>,
}

impl Primitive {
    /// Creates a descriptor with an explicitly supplied decode function.
    pub fn new(decl: FieldDecl, decode: Decoder) -> Self {
        Self {
            level: decl.level,
            name: decl.name,
            line_number: decl.line_number,
            data_type: decl.data_type,
            redefines: decl.redefines,
            is_redefined: false,
            occurs: decl.occurs,
            to: decl.to,
            depending_on: decl.depending_on,
            is_dependee: false,
            is_filler: decl.is_filler,
            decode,
            binary_properties: BinaryProperties::default(),
            parent: decl.parent,
        }
    }

    /// Creates a descriptor whose decode function is selected by `codecs`.
    pub fn bind<C: CodecProvider + ?Sized>(decl: FieldDecl, codecs: &C) -> Self {
        let decode = codecs.decoder(&decl.data_type);
        Self::new(decl, decode)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn redefines(&self) -> Option<&str> {
        self.redefines.as_deref()
    }

    pub fn is_redefined(&self) -> bool {
        self.is_redefined
    }

    pub fn occurs(&self) -> Option<u32> {
        self.occurs
    }

    pub fn to(&self) -> Option<u32> {
        self.to
    }

    pub fn depending_on(&self) -> Option<&str> {
        self.depending_on.as_deref()
    }

    pub fn is_dependee(&self) -> bool {
        self.is_dependee
    }

    pub fn is_filler(&self) -> bool {
        self.is_filler
    }

    /// Containing group, used for rendering only.
    pub fn parent(&self) -> Option<FieldId> {
        self.parent
    }

    pub fn binary_properties(&self) -> BinaryProperties {
        self.binary_properties
    }

    /// Bound decode function.
    pub fn decoder(&self) -> &Decoder {
        &self.decode
    }

    /// Returns a copy with binary properties replaced.
    pub fn with_binary_properties(&self, binary_properties: BinaryProperties) -> Self {
        Self {
            binary_properties,
            ..self.clone()
        }
    }

    /// Returns a copy with the redefined flag replaced.
    pub fn with_redefined(&self, is_redefined: bool) -> Self {
        Self {
            is_redefined,
            ..self.clone()
        }
    }

    /// Returns a copy with the dependee flag replaced.
    pub fn with_dependee(&self, is_dependee: bool) -> Self {
        Self {
            is_dependee,
            ..self.clone()
        }
    }
}

/// Compares every attribute except the decode function.
impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level
            && self.name == other.name
            && self.line_number == other.line_number
            && self.data_type == other.data_type
            && self.redefines == other.redefines
            && self.is_redefined == other.is_redefined
            && self.occurs == other.occurs
            && self.to == other.to
            && self.depending_on == other.depending_on
            && self.is_dependee == other.is_dependee
            && self.is_filler == other.is_filler
            && self.binary_properties == other.binary_properties
            && self.parent == other.parent
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("level", &self.level)
            .field("name", &self.name)
            .field("line_number", &self.line_number)
            .field("data_type", &self.data_type)
            .field("redefines", &self.redefines)
            .field("is_redefined", &self.is_redefined)
            .field("occurs", &self.occurs)
            .field("to", &self.to)
            .field("depending_on", &self.depending_on)
            .field("is_dependee", &self.is_dependee)
            .field("is_filler", &self.is_filler)
            .field("binary_properties", &self.binary_properties)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

/// Renders the field as a copybook line, e.g. `05 AMOUNT PIC S9(5)V9(2) COMP-3`.
impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} {}", self.level, self.name)?;
        if let Some(target) = &self.redefines {
            write!(f, " REDEFINES {target}")?;
        }
        write!(f, " PIC {}", self.data_type)?;
        match (self.occurs, self.to) {
            (Some(min), Some(max)) => write!(f, " OCCURS {min} TO {max}")?,
            (Some(n), None) => write!(f, " OCCURS {n}")?,
            (None, Some(max)) => write!(f, " OCCURS 0 TO {max}")?,
            (None, None) => {}
        }
        if let Some(dependee) = &self.depending_on {
            write!(f, " DEPENDING ON {dependee}")?;
        }
        Ok(())
    }
}
