//! Flat node storage.

use thicket_math::Aabb;

/// What a node holds besides its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Indices of the two children in the node array.
    Interior { left: u32, right: u32 },
    /// A contiguous range of the tree's leaf order.
    Leaf { start: u32, count: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BvhNode {
    /// Tight bounds of every point below this node.
    pub bounds: Aabb,
    pub kind: NodeKind,
}

impl BvhNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }
}
