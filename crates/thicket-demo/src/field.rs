//! Seeded random vegetation field.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use thicket_config::FieldConfig;
use thicket_lod::PointCloud;

/// Scatter `point_count` points over a square on the ground plane centred on
/// the origin, each with a random yaw and a random uniform scale.
pub fn generate_field(config: &FieldConfig) -> PointCloud {
    let mut rng = Xoshiro256StarStar::seed_from_u64(config.seed);
    let half = config.extent.abs() * 0.5;
    let count = config.point_count;

    let mut positions = Vec::with_capacity(count * 3);
    let mut rotations = Vec::with_capacity(count * 3);
    let mut scales = Vec::with_capacity(count * 3);

    for _ in 0..count {
        let (x, z) = if half > 0.0 {
            (rng.gen_range(-half..half), rng.gen_range(-half..half))
        } else {
            (0.0, 0.0)
        };
        positions.extend_from_slice(&[x, 0.0, z]);

        let yaw = rng.gen_range(0.0..std::f32::consts::TAU);
        rotations.extend_from_slice(&[0.0, yaw, 0.0]);

        let s = if config.max_scale > config.min_scale {
            rng.gen_range(config.min_scale..config.max_scale)
        } else {
            config.min_scale
        };
        scales.extend_from_slice(&[s, s, s]);
    }

    PointCloud::from_positions(positions)
        .with_rotations(rotations)
        .with_scales(scales)
}
