//! Typed, directed edges: `dicer_hasPart`, `hasMaterial`, `inDistrict`, ...

use serde::{Deserialize, Serialize};
use super::{NodeId, PropertyMap};

/// Opaque relationship identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelId(pub u64);

impl std::fmt::Display for RelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which end of an edge the traversal starts from.
///
/// Category links on components are stored in either direction, so those
/// lookups use `Both`; everything else follows the stored direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

/// A relationship between two nodes. Properties are carried but the
/// building queries never read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelId,
    pub src: NodeId,
    pub dst: NodeId,
    pub rel_type: String,
    pub properties: PropertyMap,
}

impl Relationship {
    /// Does this edge leave (or enter) `node` in `dir`, with type `rel_type`
    /// when one is given?
    pub fn touches(&self, node: NodeId, dir: Direction, rel_type: Option<&str>) -> bool {
        let attached = match dir {
            Direction::Outgoing => self.src == node,
            Direction::Incoming => self.dst == node,
            Direction::Both => self.src == node || self.dst == node,
        };
        attached && rel_type.is_none_or(|t| self.rel_type == t)
    }

    /// The far end as seen from `from`. A self-loop leads back to `from`.
    pub fn other_node(&self, from: NodeId) -> Option<NodeId> {
        if from == self.src {
            Some(self.dst)
        } else if from == self.dst {
            Some(self.src)
        } else {
            None
        }
    }
}
