//! Immutable schema snapshots.

use std::sync::Arc;

use crate::codec::CodecProvider;
use crate::error::{DecodeError, SchemaError};
use crate::field::{BinaryProperties, Primitive};
use crate::types::Value;

use super::node::{FieldId, Node};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Decoded record: field name and value (or absence) per primitive.
pub type Row = Vec<(String, Option<Value>)>;

/// Snapshot of all fields of a copybook record.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    nodes: Vec<Arc<Node>>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Appends a node and returns its id.
    pub fn push(&mut self, node: impl Into<Node>) -> FieldId {
        self.nodes.push(Arc::new(node.into()));
        FieldId(self.nodes.len() - 1)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node with the given id.
    pub fn get(&self, id: FieldId) -> Option<&Node> {
        self.nodes.get(id.0).map(Arc::as_ref)
    }

    /// Returns the first node with the given name.
    pub fn find(&self, name: &str) -> Option<FieldId> {
        self.nodes
            .iter()
            .position(|node| node.name() == name)
            .map(FieldId)
    }

    /// Returns the primitive with the given id.
    pub fn primitive(&self, id: FieldId) -> Result<&Primitive, SchemaError> {
        let node = self
            .get(id)
            .ok_or(SchemaError::UnknownId { id: id.0 })?;
        node.as_primitive().ok_or_else(|| SchemaError::NotPrimitive {
            name: node.name().to_string(),
        })
    }

    /// Iterates over all primitives in declaration order.
    pub fn primitives(&self) -> impl Iterator<Item = (FieldId, &Primitive)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| node.as_primitive().map(|p| (FieldId(i), p)))
    }

    /// True if both snapshots hold the same allocation for `id`.
    pub fn shares_node(&self, other: &Schema, id: FieldId) -> bool {
        match (self.nodes.get(id.0), other.nodes.get(id.0)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns a new snapshot with one primitive replaced by `update`.
    fn update_primitive<F>(&self, id: FieldId, update: F) -> Result<Schema, SchemaError>
    where
        F: FnOnce(&Primitive) -> Result<Primitive, SchemaError>,
    {
        let updated = update(self.primitive(id)?)?;
        let mut nodes = self.nodes.clone();
        nodes[id.0] = Arc::new(Node::Primitive(updated));
        Ok(Schema { nodes })
    }

    fn find_primitive(&self, name: &str) -> Result<FieldId, SchemaError> {
        self.find(name).ok_or_else(|| SchemaError::FieldNotFound {
            name: name.to_string(),
        })
    }

    /// Marks the named field as the target of a REDEFINES.
    pub fn mark_redefined(&self, name: &str) -> Result<Schema, SchemaError> {
        let id = self.find_primitive(name)?;
        self.update_primitive(id, |p| Ok(p.with_redefined(true)))
    }

    /// Marks the named field as the count source of an OCCURS DEPENDING ON.
    pub fn mark_dependee(&self, name: &str) -> Result<Schema, SchemaError> {
        let id = self.find_primitive(name)?;
        self.update_primitive(id, |p| Ok(p.with_dependee(true)))
    }

    /// Applies externally computed bit offsets.
    ///
    /// Bit lengths already resolved are kept.
    pub fn with_offsets(&self, offsets: &[(FieldId, usize)]) -> Result<Schema, SchemaError> {
        let mut nodes = self.nodes.clone();
        for &(id, offset_bits) in offsets {
            let primitive = self.primitive(id)?;
            let props = primitive.binary_properties();
            let updated = primitive.with_binary_properties(BinaryProperties {
                offset_bits,
                ..props
            });
            nodes[id.0] = Arc::new(Node::Primitive(updated));
        }
        Ok(Schema { nodes })
    }

    /// Layout pass: validates and sizes every primitive.
    ///
    /// Offsets already assigned are kept. Groups are shared unchanged.
    pub fn resolve_sizes<C: CodecProvider + ?Sized>(
        &self,
        codecs: &C,
    ) -> Result<Schema, SchemaError> {
        let nodes = self
            .nodes
            .iter()
            .map(|node| match node.as_ref() {
                Node::Primitive(p) => {
                    let offset = p.binary_properties().offset_bits;
                    Ok(Arc::new(Node::Primitive(
                        p.resolve_binary_properties(offset, codecs)?,
                    )))
                }
                Node::Group(_) => Ok(Arc::clone(node)),
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;

        tracing::debug!("Resolved sizes for {} nodes", nodes.len());
        Ok(Schema { nodes })
    }

    /// Renders the dotted path from the root group to `id`.
    pub fn qualified_name(&self, id: FieldId) -> Result<String, SchemaError> {
        let mut parts = Vec::new();
        let mut current = Some(id);
        // Bounded by the arena size so a malformed parent cycle cannot loop.
        for _ in 0..=self.nodes.len() {
            let Some(cursor) = current else { break };
            let node = self
                .get(cursor)
                .ok_or(SchemaError::UnknownId { id: cursor.0 })?;
            parts.push(node.name());
            current = node.parent();
        }
        parts.reverse();
        Ok(parts.join("."))
    }

    fn decode_field(
        primitive: &Primitive,
        record: &[u8],
    ) -> Result<(String, Option<Value>), DecodeError> {
        let offset = primitive.binary_properties().offset_bits;
        let value = primitive.decode_value(offset, record)?;
        Ok((primitive.name().to_string(), value))
    }

    /// Decodes every non-filler primitive at its resolved offset.
    pub fn decode_record(&self, record: &[u8]) -> Result<Row, DecodeError> {
        self.primitives()
            .filter(|(_, p)| !p.is_filler())
            .map(|(_, p)| Self::decode_field(p, record))
            .collect()
    }

    /// Decodes the fields of one record in parallel.
    #[cfg(feature = "parallel")]
    pub fn decode_record_par(&self, record: &[u8]) -> Result<Row, DecodeError> {
        self.nodes
            .par_iter()
            .filter_map(|node| node.as_primitive())
            .filter(|p| !p.is_filler())
            .map(|p| Self::decode_field(p, record))
            .collect()
    }

    /// Decodes many records in parallel.
    #[cfg(feature = "parallel")]
    pub fn decode_records_par(&self, records: &[&[u8]]) -> Result<Vec<Row>, DecodeError> {
        records
            .par_iter()
            .map(|record| self.decode_record(record))
            .collect()
    }
}
