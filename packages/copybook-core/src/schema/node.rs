//! Arena nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::Primitive;

/// Stable index of a node within a [super::Schema].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub usize);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Group item: a named container of other fields with no storage of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub level: u32,
    pub name: String,
    pub line_number: usize,
    #[serde(default)]
    pub parent: Option<FieldId>,
}

/// A node in the schema arena.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Primitive(Primitive),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Group(group) => &group.name,
            Node::Primitive(primitive) => primitive.name(),
        }
    }

    pub fn parent(&self) -> Option<FieldId> {
        match self {
            Node::Group(group) => group.parent,
            Node::Primitive(primitive) => primitive.parent(),
        }
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Node::Primitive(primitive) => Some(primitive),
            Node::Group(_) => None,
        }
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<Primitive> for Node {
    fn from(primitive: Primitive) -> Self {
        Node::Primitive(primitive)
    }
}
