//! Engine tuning knobs, fixed at construction.

use thicket_bvh::BuildOptions;

use crate::LodError;

/// Distance range, instance budget and index build parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct LodSettings {
    /// Points farther than this from the camera are never selected.
    pub max_distance: f32,
    /// Points closer than this always map to the densest level.
    pub min_distance: f32,
    /// Hard cap on instances per frame, shared by every mesh variant.
    pub max_count: usize,
    /// Spatial index build parameters.
    pub build: BuildOptions,
}

impl Default for LodSettings {
    fn default() -> Self {
        Self {
            max_distance: 100.0,
            min_distance: 10.0,
            max_count: 1000,
            build: BuildOptions::default(),
        }
    }
}

impl LodSettings {
    /// Reject configurations the selector cannot work with.
    pub fn validate(&self) -> Result<(), LodError> {
        let (min, max) = (self.min_distance, self.max_distance);
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(LodError::InvalidDistanceRange { min, max });
        }
        if self.max_count == 0 {
            return Err(LodError::ZeroMaxCount);
        }
        if self.build.max_leaf_size == 0 {
            return Err(LodError::ZeroLeafSize);
        }
        Ok(())
    }
}
