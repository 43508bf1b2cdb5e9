//! Density levels derived from the spatial index.
//!
//! Level `i` of `D` keeps every `2^(D - i)`-th point of the index's leaf order,
//! starting at position 0. Level 0 is the sparsest, level `D - 1` keeps every
//! other point. Because each stride divides the next larger one, every level is
//! a subset of the level above it.

use std::ops::ControlFlow;

use thicket_bvh::{BvhVisitor, PointBvh, PointId};
use thicket_math::Aabb;

/// Membership sets for each density level, sparsest first.
#[derive(Clone, Debug, Default)]
pub struct LevelMap {
    levels: Vec<MemberBits>,
}

impl LevelMap {
    /// Derive the levels from a built index.
    ///
    /// An empty index, or one that is a single leaf, has depth 0 and yields an
    /// empty (degenerate) map.
    pub fn generate(index: &PointBvh) -> Self {
        let mut probe = DepthProbe::default();
        let _ = index.shapecast(&mut probe);
        let depth = probe.max_depth;

        let order = index.leaf_order();
        let levels = (0..depth)
            .map(|level| {
                let step = 1usize.checked_shl(depth - level).unwrap_or(usize::MAX);
                let mut bits = MemberBits::new(order.len());
                for &id in order.iter().step_by(step) {
                    bits.insert(id);
                }
                bits
            })
            .collect::<Vec<_>>();

        log::debug!(
            "generated {} density levels over {} points",
            levels.len(),
            order.len()
        );
        Self { levels }
    }

    /// Number of levels, equal to the index depth.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Densest level index; 0 when the map is degenerate.
    pub fn max_level(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// No level distinction is available; selection falls back to distance
    /// and frustum tests only.
    pub fn is_degenerate(&self) -> bool {
        self.levels.is_empty()
    }

    /// Whether `id` belongs to `level`. Unknown levels contain nothing.
    #[inline]
    pub fn contains(&self, level: usize, id: PointId) -> bool {
        self.levels.get(level).is_some_and(|bits| bits.contains(id))
    }

    /// Member count of `level`, or `None` if the level does not exist.
    pub fn level_len(&self, level: usize) -> Option<usize> {
        self.levels.get(level).map(|bits| bits.len)
    }
}

/// Full traversal that only records the deepest node.
#[derive(Default)]
struct DepthProbe {
    max_depth: u32,
}

impl BvhVisitor for DepthProbe {
    fn intersects_bounds(&mut self, _bounds: &Aabb, _is_leaf: bool, depth: u32) -> bool {
        self.max_depth = self.max_depth.max(depth);
        true
    }

    fn visit_point(&mut self, _id: PointId, _depth: u32) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Fixed-size bitset over point ids.
#[derive(Clone, Debug)]
struct MemberBits {
    words: Vec<u64>,
    len: usize,
}

impl MemberBits {
    fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(64)],
            len: 0,
        }
    }

    fn insert(&mut self, id: PointId) {
        let (word, bit) = (id as usize / 64, id % 64);
        let mask = 1u64 << bit;
        if self.words[word] & mask == 0 {
            self.words[word] |= mask;
            self.len += 1;
        }
    }

    #[inline]
    fn contains(&self, id: PointId) -> bool {
        self.words
            .get(id as usize / 64)
            .is_some_and(|word| word & (1u64 << (id % 64)) != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use thicket_bvh::BuildOptions;

    fn line_index(count: usize, max_leaf_size: usize) -> PointBvh {
        let points: Vec<Vec3> = (0..count).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let options = BuildOptions {
            max_leaf_size,
            ..BuildOptions::default()
        };
        PointBvh::build(&points, &options).unwrap()
    }

    #[test]
    fn test_empty_index_is_degenerate() {
        let index = PointBvh::build(&[], &BuildOptions::default()).unwrap();
        let levels = LevelMap::generate(&index);
        assert!(levels.is_degenerate());
        assert_eq!(levels.level_count(), 0);
        assert_eq!(levels.max_level(), 0);
        assert!(!levels.contains(0, 0));
    }

    #[test]
    fn test_single_point_is_degenerate() {
        let levels = LevelMap::generate(&line_index(1, 1));
        assert!(levels.is_degenerate());
    }

    #[test]
    fn test_level_count_matches_depth() {
        let index = line_index(1024, 1);
        let levels = LevelMap::generate(&index);
        assert_eq!(levels.level_count(), index.depth() as usize);
        assert_eq!(levels.level_count(), 10);
        assert_eq!(levels.max_level(), 9);
    }

    #[test]
    fn test_level_sizes_follow_strides() {
        // Depth 10 over 1024 points: level i keeps every 2^(10 - i)-th point.
        let levels = LevelMap::generate(&line_index(1024, 1));
        for level in 0..10 {
            let step = 1usize << (10 - level);
            assert_eq!(levels.level_len(level), Some(1024 / step), "level {level}");
        }
        assert_eq!(levels.level_len(10), None);
    }

    #[test]
    fn test_levels_follow_leaf_order() {
        let index = line_index(1024, 1);
        let levels = LevelMap::generate(&index);
        let order = index.leaf_order();
        assert!(levels.contains(0, order[0]));
        assert!(levels.contains(9, order[2]));
        assert!(!levels.contains(9, order[1]));
        assert!(!levels.contains(0, order[1]));
    }

    #[test]
    fn test_levels_are_nested() {
        let index = line_index(777, 2);
        let levels = LevelMap::generate(&index);
        assert!(levels.level_count() > 1);
        for level in 0..levels.max_level() {
            for id in 0..777 {
                if levels.contains(level, id) {
                    assert!(levels.contains(level + 1, id), "level {level} id {id}");
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_level_contains_nothing() {
        let levels = LevelMap::generate(&line_index(64, 1));
        assert!(!levels.contains(levels.level_count(), 0));
        assert!(!levels.contains(usize::MAX, 0));
    }
}
