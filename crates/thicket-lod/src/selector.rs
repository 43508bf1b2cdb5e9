//! Distance-to-density-level mapping.

/// Maps a camera distance onto a density level.
///
/// Distances are normalized linearly over `[min_distance, max_distance]`,
/// scaled by `max_level`, rounded and clamped, then inverted so that near
/// points land on the densest level (`max_level`) and points at
/// `max_distance` land on level 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelSelector {
    min_distance: f32,
    max_distance: f32,
    max_level: usize,
}

impl LevelSelector {
    /// Create a selector. Callers guarantee a finite `min_distance < max_distance`,
    /// as [`LodSettings::validate`](crate::LodSettings::validate) and
    /// [`FrameSelector::select`](crate::FrameSelector::select) do.
    pub fn new(min_distance: f32, max_distance: f32, max_level: usize) -> Self {
        debug_assert!(min_distance < max_distance, "distance range must be non-empty");
        Self {
            min_distance,
            max_distance,
            max_level,
        }
    }

    /// Return the density level for a point at `distance` from the camera.
    ///
    /// Both ends of the range are inclusive; distances beyond it clamp.
    pub fn select_level(&self, distance: f32) -> usize {
        let t = (distance - self.min_distance) / (self.max_distance - self.min_distance);
        let raw = (t * self.max_level as f32).round().clamp(0.0, self.max_level as f32);
        self.max_level - raw as usize
    }

    /// The densest level this selector can return.
    pub fn max_level(&self) -> usize {
        self.max_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_selector() -> LevelSelector {
        LevelSelector::new(10.0, 100.0, 9)
    }

    /// Anything nearer than min_distance gets the densest level.
    #[test]
    fn test_near_distances_return_max_level() {
        let selector = default_selector();
        assert_eq!(selector.select_level(0.0), 9);
        assert_eq!(selector.select_level(5.0), 9);
        assert_eq!(selector.select_level(10.0), 9);
    }

    /// max_distance maps to the sparsest level; beyond it clamps.
    #[test]
    fn test_far_distances_return_level_0() {
        let selector = default_selector();
        assert_eq!(selector.select_level(100.0), 0);
        assert_eq!(selector.select_level(1000.0), 0);
        assert_eq!(selector.select_level(f32::MAX), 0);
    }

    /// Each level spans (max - min) / max_level = 10 units, centred on the
    /// rounding boundary.
    #[test]
    fn test_rounding_boundaries() {
        let selector = default_selector();
        assert_eq!(selector.select_level(14.9), 9);
        assert_eq!(selector.select_level(15.1), 8);
        assert_eq!(selector.select_level(55.0), 4);
        assert_eq!(selector.select_level(94.9), 1);
        assert_eq!(selector.select_level(95.1), 0);
    }

    /// Level is monotonically non-increasing with distance.
    #[test]
    fn test_monotonically_decreasing_with_distance() {
        let selector = default_selector();
        let mut previous = selector.select_level(0.0);
        for step in 0..=200 {
            let level = selector.select_level(step as f32 * 0.75);
            assert!(level <= previous, "level rose at distance {}", step as f32 * 0.75);
            previous = level;
        }
    }

    /// A single level means every distance maps to level 0.
    #[test]
    fn test_zero_max_level_always_returns_0() {
        let selector = LevelSelector::new(10.0, 100.0, 0);
        for d in [0.0, 10.0, 50.0, 100.0] {
            assert_eq!(selector.select_level(d), 0);
        }
    }
}
