//! Immutable per-point position, rotation and scale arrays.

use glam::{Mat4, Vec3};
use thicket_bvh::PointId;
use thicket_math::compose_trs;

use crate::LodError;

/// Raw point cloud buffers as supplied by the host, flat `xyz` triples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    /// Required positions.
    pub positions: Vec<f32>,
    /// Euler XYZ angles in radians; zero when absent.
    pub rotations: Option<Vec<f32>>,
    /// Per-axis scales; one when absent.
    pub scales: Option<Vec<f32>>,
}

impl PointCloud {
    pub fn from_positions(positions: Vec<f32>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    pub fn with_rotations(mut self, rotations: Vec<f32>) -> Self {
        self.rotations = Some(rotations);
        self
    }

    pub fn with_scales(mut self, scales: Vec<f32>) -> Self {
        self.scales = Some(scales);
        self
    }
}

/// Validated point arrays indexed by `id * 3 + axis`.
#[derive(Clone, Debug)]
pub struct PointStore {
    positions: Vec<f32>,
    rotations: Vec<f32>,
    scales: Vec<f32>,
}

impl PointStore {
    /// Validate buffer lengths and fill in identity rotations and scales.
    pub fn new(cloud: PointCloud) -> Result<Self, LodError> {
        let PointCloud {
            positions,
            rotations,
            scales,
        } = cloud;

        let len = positions.len();
        if len % 3 != 0 {
            return Err(LodError::PositionLength { len });
        }

        let rotations = fill_attribute("rotations", rotations, len, 0.0)?;
        let scales = fill_attribute("scales", scales, len, 1.0)?;

        Ok(Self {
            positions,
            rotations,
            scales,
        })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn position(&self, id: PointId) -> Vec3 {
        triple(&self.positions, id)
    }

    #[inline]
    pub fn rotation(&self, id: PointId) -> Vec3 {
        triple(&self.rotations, id)
    }

    #[inline]
    pub fn scale(&self, id: PointId) -> Vec3 {
        triple(&self.scales, id)
    }

    /// Local instance transform: translate, rotate (XYZ Euler), scale.
    pub fn transform(&self, id: PointId) -> Mat4 {
        compose_trs(self.position(id), self.rotation(id), self.scale(id))
    }

    /// Positions as vectors, in id order.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
    }
}

fn fill_attribute(
    attribute: &'static str,
    values: Option<Vec<f32>>,
    expected: usize,
    default: f32,
) -> Result<Vec<f32>, LodError> {
    match values {
        Some(values) if values.len() != expected => Err(LodError::AttributeLength {
            attribute,
            expected,
            actual: values.len(),
        }),
        Some(values) => Ok(values),
        None => Ok(vec![default; expected]),
    }
}

#[inline]
fn triple(values: &[f32], id: PointId) -> Vec3 {
    let i = id as usize * 3;
    Vec3::new(values[i], values[i + 1], values[i + 2])
}
