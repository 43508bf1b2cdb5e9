//! Top-down centre-split construction.
//!
//! Each node splits its points on the longest axis of their bounds, at the
//! midpoint of that axis. The partition reorders `leaf_order` in place, so once
//! the build finishes, every leaf owns a contiguous slice of it and the slice
//! order matches a left-to-right traversal.

use glam::Vec3;
use thicket_math::Aabb;

use crate::{BvhError, BvhNode, NodeKind, PointId};

/// Build parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildOptions {
    /// A node with at most this many points becomes a leaf.
    pub max_leaf_size: usize,
    /// Nodes at this depth become leaves regardless of their point count.
    pub max_depth: u32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_leaf_size: 10,
            max_depth: 40,
        }
    }
}

/// A bounding-volume hierarchy whose leaves partition a point set.
#[derive(Clone, Debug, Default)]
pub struct PointBvh {
    pub(crate) nodes: Vec<BvhNode>,
    pub(crate) leaf_order: Vec<PointId>,
    pub(crate) depth: u32,
}

impl PointBvh {
    /// Build the hierarchy over `positions`, where point `i` has id `i`.
    ///
    /// An empty slice yields an empty index whose queries visit nothing.
    pub fn build(positions: &[Vec3], options: &BuildOptions) -> Result<Self, BvhError> {
        if u32::try_from(positions.len()).is_err() {
            return Err(BvhError::TooManyPoints {
                count: positions.len(),
            });
        }
        if let Some(id) = positions.iter().position(|p| !p.is_finite()) {
            return Err(BvhError::NonFinitePosition { id: id as PointId });
        }
        if positions.is_empty() {
            return Ok(Self::default());
        }

        let mut builder = Builder {
            positions,
            options,
            nodes: Vec::with_capacity(2 * positions.len() / options.max_leaf_size.max(1) + 1),
            order: (0..positions.len() as PointId).collect(),
            depth: 0,
        };
        builder.build_node(0, positions.len(), 0);

        let bvh = Self {
            nodes: builder.nodes,
            leaf_order: builder.order,
            depth: builder.depth,
        };
        log::debug!(
            "built point BVH: {} points, {} nodes, depth {}",
            bvh.len(),
            bvh.node_count(),
            bvh.depth
        );
        Ok(bvh)
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.leaf_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaf_order.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes; index 0 is the root.
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// Point ids in leaf traversal order. Every id appears exactly once.
    pub fn leaf_order(&self) -> &[PointId] {
        &self.leaf_order
    }

    /// Deepest node depth recorded during the build; the root is depth 0.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Bounds of the whole point set, or `None` for an empty index.
    pub fn root_bounds(&self) -> Option<Aabb> {
        self.nodes.first().map(|n| n.bounds)
    }
}

struct Builder<'a> {
    positions: &'a [Vec3],
    options: &'a BuildOptions,
    nodes: Vec<BvhNode>,
    order: Vec<PointId>,
    depth: u32,
}

impl Builder<'_> {
    fn build_node(&mut self, start: usize, end: usize, depth: u32) -> u32 {
        self.depth = self.depth.max(depth);

        let bounds = Aabb::from_points(
            self.order[start..end]
                .iter()
                .map(|&id| self.positions[id as usize]),
        );
        let index = self.nodes.len() as u32;
        self.nodes.push(BvhNode {
            bounds,
            kind: NodeKind::Leaf {
                start: start as u32,
                count: (end - start) as u32,
            },
        });

        if end - start <= self.options.max_leaf_size || depth >= self.options.max_depth {
            return index;
        }

        let axis = bounds.longest_axis();
        if bounds.size()[axis] <= 0.0 {
            // Every point coincides; no split can separate them.
            return index;
        }

        let pivot = bounds.center()[axis];
        let split = self.partition(start, end, axis, pivot);
        if split == start || split == end {
            return index;
        }

        let left = self.build_node(start, split, depth + 1);
        let right = self.build_node(split, end, depth + 1);
        self.nodes[index as usize].kind = NodeKind::Interior { left, right };
        index
    }

    /// Moves points below `pivot` on `axis` to the front of the range and
    /// returns the first index of the upper half.
    fn partition(&mut self, start: usize, end: usize, axis: usize, pivot: f32) -> usize {
        let mut left = start;
        let mut right = end;
        while left < right {
            if self.positions[self.order[left] as usize][axis] < pivot {
                left += 1;
            } else {
                right -= 1;
                self.order.swap(left, right);
            }
        }
        left
    }
}
