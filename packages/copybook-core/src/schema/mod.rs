//! Arena of field descriptors addressed by [FieldId].
//!
//! Each construction pass (redefines/dependee resolution, layout) returns a
//! new [Schema] snapshot. Unchanged nodes are shared between snapshots.

mod node;
mod snapshot;

pub use node::{FieldId, Group, Node};
pub use snapshot::{Row, Schema};
