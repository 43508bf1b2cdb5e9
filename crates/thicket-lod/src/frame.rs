//! Per-frame point selection: frustum and distance culling followed by
//! density-level membership, capped at the instance budget.

use std::ops::ControlFlow;

use glam::Vec3;
use thicket_bvh::{BvhVisitor, PointBvh, PointId};
use thicket_math::{Aabb, Frustum, Sphere};

use crate::{LevelMap, LevelSelector, PointStore};

/// Camera state and limits for one selection pass.
///
/// The distance range must be finite with `min_distance < max_distance`;
/// [`FrameSelector::select`] selects nothing for any other range.
#[derive(Clone, Copy, Debug)]
pub struct FrameQuery<'a> {
    pub camera_position: Vec3,
    pub frustum: &'a Frustum,
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_count: usize,
}

/// Counters from the most recent selection pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Nodes handed to the bounds test.
    pub visited_nodes: usize,
    /// Nodes rejected by the frustum or distance-sphere test.
    pub culled_nodes: usize,
    /// Points reached in surviving leaves.
    pub candidates: usize,
    /// Points selected for rendering.
    pub accepted: usize,
    /// Whether the budget ran out before the traversal finished.
    pub budget_exhausted: bool,
}

/// Owns the reusable per-frame working set.
#[derive(Debug, Default)]
pub struct FrameSelector {
    accepted: Vec<PointId>,
    stats: FrameStats,
}

impl FrameSelector {
    /// Preallocate room for a full budget so frames never reallocate.
    pub fn with_capacity(max_count: usize) -> Self {
        Self {
            accepted: Vec::with_capacity(max_count),
            stats: FrameStats::default(),
        }
    }

    /// Run one selection pass and return the accepted ids in traversal order.
    ///
    /// The previous frame's result is discarded first.
    pub fn select(
        &mut self,
        index: &PointBvh,
        levels: &LevelMap,
        store: &PointStore,
        query: &FrameQuery<'_>,
    ) -> &[PointId] {
        self.accepted.clear();
        self.stats = FrameStats::default();

        let (min, max) = (query.min_distance, query.max_distance);
        if !min.is_finite() || !max.is_finite() || min >= max {
            log::debug!("skipping selection for invalid distance range {min}..{max}");
            return &self.accepted;
        }

        let mut visitor = SelectVisitor {
            query,
            store,
            levels,
            sphere: Sphere::new(query.camera_position, query.max_distance),
            level_selector: LevelSelector::new(
                query.min_distance,
                query.max_distance,
                levels.max_level(),
            ),
            accepted: &mut self.accepted,
            stats: &mut self.stats,
        };
        if index.shapecast(&mut visitor).is_break() {
            self.stats.budget_exhausted = true;
        }
        self.stats.accepted = self.accepted.len();
        &self.accepted
    }

    /// Ids accepted by the most recent pass.
    pub fn accepted(&self) -> &[PointId] {
        &self.accepted
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

struct SelectVisitor<'a> {
    query: &'a FrameQuery<'a>,
    store: &'a PointStore,
    levels: &'a LevelMap,
    sphere: Sphere,
    level_selector: LevelSelector,
    accepted: &'a mut Vec<PointId>,
    stats: &'a mut FrameStats,
}

impl BvhVisitor for SelectVisitor<'_> {
    fn intersects_bounds(&mut self, bounds: &Aabb, _is_leaf: bool, _depth: u32) -> bool {
        self.stats.visited_nodes += 1;
        let keep = self.query.frustum.intersects_aabb(bounds) && self.sphere.intersects_aabb(bounds);
        if !keep {
            self.stats.culled_nodes += 1;
        }
        keep
    }

    fn visit_point(&mut self, id: PointId, _depth: u32) -> ControlFlow<()> {
        if self.accepted.len() >= self.query.max_count {
            return ControlFlow::Break(());
        }
        self.stats.candidates += 1;

        // Node boxes are conservative; the point itself must be inside.
        let position = self.store.position(id);
        if !self.query.frustum.contains_point(position) {
            return ControlFlow::Continue(());
        }

        let distance = position.distance(self.query.camera_position);
        if distance > self.query.max_distance {
            return ControlFlow::Continue(());
        }

        if !self.levels.is_degenerate() {
            let level = self.level_selector.select_level(distance);
            if !self.levels.contains(level, id) {
                return ControlFlow::Continue(());
            }
        }

        self.accepted.push(id);
        ControlFlow::Continue(())
    }
}
