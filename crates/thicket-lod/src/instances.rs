//! Per-variant instance buffers and the writer that fills them.
//!
//! Every mesh variant gets one [`InstanceBatch`] sized to the instance budget.
//! Each frame the writer places the transform of the i-th accepted point at
//! slot i of every batch, so all variants stack at the same positions. Only
//! the first `active_count` slots are meaningful; the rest keep stale data.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use thicket_bvh::PointId;

use crate::PointStore;

/// One column-major model matrix, laid out for direct GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl InstanceRaw {
    pub const IDENTITY: Self = Self {
        model: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn from_mat4(matrix: &Mat4) -> Self {
        Self {
            model: matrix.to_cols_array_2d(),
        }
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

/// A fixed-capacity transform buffer for one mesh variant.
///
/// `V` is whatever the host renders with (geometry and material handles);
/// the batch only carries it along.
#[derive(Debug)]
pub struct InstanceBatch<V> {
    variant: V,
    instances: Vec<InstanceRaw>,
    active_count: usize,
    dirty: bool,
}

impl<V> InstanceBatch<V> {
    /// Create a batch with `capacity` identity slots and no active instances.
    pub fn new(variant: V, capacity: usize) -> Self {
        Self {
            variant,
            instances: vec![InstanceRaw::IDENTITY; capacity],
            active_count: 0,
            dirty: false,
        }
    }

    pub fn variant(&self) -> &V {
        &self.variant
    }

    /// Number of slots, equal to the instance budget.
    pub fn capacity(&self) -> usize {
        self.instances.len()
    }

    /// Number of slots holding this frame's instances.
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// The transform at `slot`, if that slot is active.
    pub fn transform(&self, slot: usize) -> Option<Mat4> {
        self.active_instances().get(slot).map(InstanceRaw::to_mat4)
    }

    /// This frame's instances, in slot order.
    pub fn active_instances(&self) -> &[InstanceRaw] {
        &self.instances[..self.active_count]
    }

    /// The active instances as raw bytes for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.active_instances())
    }

    /// Whether the buffer changed since the renderer last uploaded it.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the renderer once the active range has been uploaded.
    pub fn mark_uploaded(&mut self) {
        self.dirty = false;
    }

    fn set_slot(&mut self, slot: usize, instance: InstanceRaw) {
        self.instances[slot] = instance;
    }

    fn finish_frame(&mut self, active_count: usize) {
        self.active_count = active_count;
        self.dirty = true;
    }
}

/// Write transforms for `accepted` into every batch, then publish the count.
///
/// Ids past a batch's capacity are dropped; the selector never produces more
/// than the budget, so this only guards against mismatched callers.
pub fn write_instances<V>(accepted: &[PointId], store: &PointStore, batches: &mut [InstanceBatch<V>]) {
    let capacity = batches.iter().map(InstanceBatch::capacity).min().unwrap_or(0);
    let count = accepted.len().min(capacity);

    for (slot, &id) in accepted[..count].iter().enumerate() {
        let instance = InstanceRaw::from_mat4(&store.transform(id));
        for batch in batches.iter_mut() {
            batch.set_slot(slot, instance);
        }
    }

    // Counts become visible only once every slot is written.
    for batch in batches.iter_mut() {
        batch.finish_frame(count);
    }
}
