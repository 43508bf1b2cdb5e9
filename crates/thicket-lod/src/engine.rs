//! The instanced LOD engine: owns the point data, the spatial index, the
//! density levels and one instance batch per mesh variant.

use glam::Vec3;
use thicket_bvh::{PointBvh, PointId};
use thicket_math::{Camera, Frustum};

use crate::{
    FrameQuery, FrameSelector, FrameStats, InstanceBatch, LevelMap, LodError, LodSettings,
    PointCloud, PointStore, write_instances,
};

/// Selects which points to draw each frame and writes their transforms into
/// per-variant instance batches.
///
/// Construction does all the heavy lifting (validation, index build, level
/// generation). [`update`](Self::update) is then cheap enough to call every
/// frame, or every few frames when the camera moves slowly.
#[derive(Debug)]
pub struct InstancedLod<V> {
    settings: LodSettings,
    store: PointStore,
    index: Option<PointBvh>,
    levels: LevelMap,
    selector: FrameSelector,
    batches: Vec<InstanceBatch<V>>,
}

impl<V> InstancedLod<V> {
    /// Build the engine for a point cloud and a non-empty list of variants.
    ///
    /// A point set the index cannot be built over (non-finite positions, too
    /// many points) is not an error: the engine is created without an index
    /// and every update draws nothing.
    pub fn new(variants: Vec<V>, points: PointCloud, settings: LodSettings) -> Result<Self, LodError> {
        settings.validate()?;
        if variants.is_empty() {
            return Err(LodError::NoMeshVariants);
        }
        let store = PointStore::new(points)?;

        let positions: Vec<Vec3> = store.positions().collect();
        let index = match PointBvh::build(&positions, &settings.build) {
            Ok(index) => Some(index),
            Err(err) => {
                log::warn!("point index build failed, instancing disabled: {err}");
                None
            }
        };
        let levels = index.as_ref().map(LevelMap::generate).unwrap_or_default();

        let batches = variants
            .into_iter()
            .map(|variant| InstanceBatch::new(variant, settings.max_count))
            .collect::<Vec<_>>();

        log::info!(
            "instanced lod ready: {} points, {} variants, {} levels, budget {}",
            store.len(),
            batches.len(),
            levels.level_count(),
            settings.max_count
        );

        Ok(Self {
            selector: FrameSelector::with_capacity(settings.max_count),
            settings,
            store,
            index,
            levels,
            batches,
        })
    }

    /// Select the points to draw for this camera and refresh every batch.
    ///
    /// Returns the number of active instances. Without an index this does
    /// nothing and returns 0.
    pub fn update(&mut self, camera_position: Vec3, frustum: &Frustum) -> usize {
        let Some(index) = &self.index else {
            return 0;
        };

        let query = FrameQuery {
            camera_position,
            frustum,
            min_distance: self.settings.min_distance,
            max_distance: self.settings.max_distance,
            max_count: self.settings.max_count,
        };
        let accepted = self.selector.select(index, &self.levels, &self.store, &query);
        write_instances(accepted, &self.store, &mut self.batches);

        let stats = self.selector.stats();
        log::trace!(
            "lod update: {} accepted of {} candidates, {} nodes culled",
            stats.accepted,
            stats.candidates,
            stats.culled_nodes
        );
        stats.accepted
    }

    /// [`update`](Self::update) using the camera's world position and frustum.
    pub fn update_from_camera(&mut self, camera: &Camera) -> usize {
        let frustum = camera.frustum();
        self.update(camera.world_position(), &frustum)
    }

    pub fn batches(&self) -> &[InstanceBatch<V>] {
        &self.batches
    }

    /// Mutable access for renderers that clear the dirty flag after upload.
    pub fn batches_mut(&mut self) -> &mut [InstanceBatch<V>] {
        &mut self.batches
    }

    pub fn batch(&self, i: usize) -> Option<&InstanceBatch<V>> {
        self.batches.get(i)
    }

    pub fn settings(&self) -> &LodSettings {
        &self.settings
    }

    pub fn levels(&self) -> &LevelMap {
        &self.levels
    }

    pub fn point_count(&self) -> usize {
        self.store.len()
    }

    /// False when the index build failed and updates are no-ops.
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    pub fn last_stats(&self) -> FrameStats {
        self.selector.stats()
    }

    /// Point ids accepted by the last update, in slot order.
    pub fn accepted_ids(&self) -> &[PointId] {
        self.selector.accepted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thicket_math::Aabb;

    fn everything() -> Frustum {
        Frustum::from_aabb(&Aabb::new(Vec3::splat(-1e6), Vec3::splat(1e6)))
    }

    fn grid(n: usize, spacing: f32) -> PointCloud {
        let mut positions = Vec::with_capacity(n * n * 3);
        for x in 0..n {
            for z in 0..n {
                positions.extend_from_slice(&[x as f32 * spacing, 0.0, z as f32 * spacing]);
            }
        }
        PointCloud::from_positions(positions)
    }

    #[test]
    fn test_no_variants_is_rejected() {
        let err = InstancedLod::<()>::new(Vec::new(), grid(2, 1.0), LodSettings::default()).unwrap_err();
        assert_eq!(err, LodError::NoMeshVariants);
    }

    #[test]
    fn test_invalid_settings_are_rejected_before_anything_else() {
        let settings = LodSettings {
            min_distance: 100.0,
            max_distance: 10.0,
            ..LodSettings::default()
        };
        let err = InstancedLod::<()>::new(Vec::new(), grid(2, 1.0), settings).unwrap_err();
        assert!(matches!(err, LodError::InvalidDistanceRange { .. }));
    }

    #[test]
    fn test_one_batch_per_variant_sized_to_budget() {
        let lod = InstancedLod::new(vec!["a", "b", "c"], grid(4, 1.0), LodSettings::default()).unwrap();
        assert_eq!(lod.batches().len(), 3);
        for batch in lod.batches() {
            assert_eq!(batch.capacity(), 1000);
            assert_eq!(batch.active_count(), 0);
        }
        assert_eq!(*lod.batch(1).unwrap().variant(), "b");
        assert!(lod.batch(3).is_none());
        assert_eq!(lod.point_count(), 16);
        assert!(lod.has_index());
    }

    #[test]
    fn test_non_finite_position_disables_index() {
        let cloud = PointCloud::from_positions(vec![0.0, 0.0, 0.0, f32::NAN, 0.0, 0.0]);
        let mut lod = InstancedLod::new(vec![()], cloud, LodSettings::default()).unwrap();
        assert!(!lod.has_index());
        assert_eq!(lod.update(Vec3::ZERO, &everything()), 0);
        assert!(!lod.batch(0).unwrap().is_dirty());
        assert_eq!(lod.last_stats(), FrameStats::default());
    }

    #[test]
    fn test_update_fills_all_batches() {
        let mut lod = InstancedLod::new(vec![0, 1], grid(3, 1.0), LodSettings::default()).unwrap();
        let count = lod.update(Vec3::new(1.0, 1.0, 1.0), &everything());
        assert!(count > 0);
        assert_eq!(count, lod.accepted_ids().len());
        assert_eq!(lod.last_stats().accepted, count);
        for batch in lod.batches() {
            assert_eq!(batch.active_count(), count);
            assert!(batch.is_dirty());
        }
        assert_eq!(
            lod.batches()[0].active_instances(),
            lod.batches()[1].active_instances()
        );
    }

    #[test]
    fn test_camera_far_away_draws_nothing() {
        let mut lod = InstancedLod::new(vec![()], grid(3, 1.0), LodSettings::default()).unwrap();
        assert_eq!(lod.update(Vec3::new(0.0, 500.0, 0.0), &everything()), 0);
        assert_eq!(lod.batch(0).unwrap().active_count(), 0);
    }

    #[test]
    fn test_update_from_camera_looking_away_draws_nothing() {
        let mut lod = InstancedLod::new(vec![()], grid(3, 1.0), LodSettings::default()).unwrap();
        let camera = Camera::looking_at(Vec3::new(1.0, 5.0, -5.0), Vec3::new(1.0, 5.0, -20.0), Vec3::Y);
        assert_eq!(lod.update_from_camera(&camera), 0);

        let camera = Camera::looking_at(Vec3::new(1.0, 5.0, -5.0), Vec3::new(1.0, 0.0, 1.0), Vec3::Y);
        assert!(lod.update_from_camera(&camera) > 0);
    }

    /// A point on the sparsest level and its grid position; it sits on every level.
    fn sparsest_point(lod: &InstancedLod<()>, n: usize) -> (PointId, Vec3) {
        let id = (0..(n * n) as PointId)
            .find(|&id| lod.levels().contains(0, id))
            .unwrap();
        let (x, z) = (id as usize / n, id as usize % n);
        (id, Vec3::new(x as f32, 0.0, z as f32))
    }

    #[test]
    fn test_point_exactly_at_max_distance_is_drawn() {
        let mut lod = InstancedLod::new(vec![()], grid(16, 1.0), LodSettings::default()).unwrap();
        assert!(!lod.levels().is_degenerate());
        let (id, position) = sparsest_point(&lod, 16);

        // Every other grid point is strictly further than 100 from here.
        assert_eq!(lod.update(position + Vec3::new(0.0, 100.0, 0.0), &everything()), 1);
        assert_eq!(lod.accepted_ids(), &[id]);

        assert_eq!(lod.update(position + Vec3::new(0.0, 100.5, 0.0), &everything()), 0);
    }

    #[test]
    fn test_negative_min_distance_still_selects() {
        let settings = LodSettings {
            min_distance: -5.0,
            ..LodSettings::default()
        };
        let mut lod = InstancedLod::new(vec![()], grid(16, 1.0), settings).unwrap();
        let (id, position) = sparsest_point(&lod, 16);
        assert!(lod.update(position, &everything()) > 0);
        assert!(lod.accepted_ids().contains(&id));
    }

    #[test]
    fn test_mark_uploaded_through_batches_mut() {
        let mut lod = InstancedLod::new(vec![()], grid(2, 1.0), LodSettings::default()).unwrap();
        lod.update(Vec3::ZERO, &everything());
        for batch in lod.batches_mut() {
            batch.mark_uploaded();
        }
        assert!(!lod.batch(0).unwrap().is_dirty());
    }
}
