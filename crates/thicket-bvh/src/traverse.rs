//! Top-down prune-and-visit traversal.

use std::ops::ControlFlow;

use thicket_math::Aabb;

use crate::{NodeKind, PointBvh, PointId};

/// Callbacks driving [`PointBvh::shapecast`].
pub trait BvhVisitor {
    /// Called for every reached node, leaves included. Returning `false` culls
    /// the node and everything below it.
    fn intersects_bounds(&mut self, bounds: &Aabb, is_leaf: bool, depth: u32) -> bool;

    /// Called once per point of every leaf that survived `intersects_bounds`.
    /// `depth` is the depth of the owning leaf. `Break` ends the whole traversal.
    fn visit_point(&mut self, id: PointId, depth: u32) -> ControlFlow<()>;
}

impl PointBvh {
    /// Walk the tree from the root, left child before right.
    ///
    /// Returns `Break` if the visitor stopped the traversal early.
    pub fn shapecast<V: BvhVisitor + ?Sized>(&self, visitor: &mut V) -> ControlFlow<()> {
        if self.nodes.is_empty() {
            return ControlFlow::Continue(());
        }
        self.shapecast_node(0, 0, visitor)
    }

    fn shapecast_node<V: BvhVisitor + ?Sized>(
        &self,
        index: u32,
        depth: u32,
        visitor: &mut V,
    ) -> ControlFlow<()> {
        let node = &self.nodes[index as usize];
        if !visitor.intersects_bounds(&node.bounds, node.is_leaf(), depth) {
            return ControlFlow::Continue(());
        }
        match node.kind {
            NodeKind::Interior { left, right } => {
                self.shapecast_node(left, depth + 1, visitor)?;
                self.shapecast_node(right, depth + 1, visitor)
            }
            NodeKind::Leaf { start, count } => {
                let range = start as usize..(start + count) as usize;
                for &id in &self.leaf_order[range] {
                    visitor.visit_point(id, depth)?;
                }
                ControlFlow::Continue(())
            }
        }
    }
}
