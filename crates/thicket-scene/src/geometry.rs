//! Triangle geometry and smooth/flat normal generation.

use glam::{Quat, Vec3};

/// Triangle list geometry. When `indices` is `None`, every three consecutive
/// positions form one triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Option<Vec<u32>>,
}

impl Geometry {
    /// Non-indexed geometry; normals are computed immediately.
    pub fn from_triangles(positions: Vec<Vec3>) -> Self {
        let mut geometry = Self {
            positions,
            ..Self::default()
        };
        geometry.compute_vertex_normals();
        geometry
    }

    /// Indexed geometry; normals are computed immediately.
    pub fn indexed(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let mut geometry = Self {
            positions,
            normals: Vec::new(),
            indices: Some(indices),
        };
        geometry.compute_vertex_normals();
        geometry
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    pub fn scale(&mut self, scale: Vec3) {
        for p in &mut self.positions {
            *p *= scale;
        }
    }

    pub fn rotate(&mut self, rotation: Quat) {
        for p in &mut self.positions {
            *p = rotation * *p;
        }
    }

    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Recompute per-vertex normals from the triangles.
    ///
    /// Indexed geometry gets smooth normals: each vertex sums the unnormalized
    /// cross products of its faces (so larger faces weigh more) and is then
    /// normalized. Non-indexed geometry gets one flat normal per triangle.
    /// Vertices with no usable face keep a zero normal.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        let positions = &self.positions;

        match &self.indices {
            Some(indices) => {
                for tri in indices.chunks_exact(3) {
                    let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
                    let (Some(&pa), Some(&pb), Some(&pc)) =
                        (positions.get(a), positions.get(b), positions.get(c))
                    else {
                        log::warn!("triangle references vertex out of range, skipped");
                        continue;
                    };
                    let face = (pb - pa).cross(pc - pa);
                    normals[a] += face;
                    normals[b] += face;
                    normals[c] += face;
                }
                for n in &mut normals {
                    *n = n.normalize_or_zero();
                }
            }
            None => {
                for (tri, out) in positions.chunks_exact(3).zip(normals.chunks_exact_mut(3)) {
                    let face = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
                    out.fill(face);
                }
            }
        }

        self.normals = normals;
    }
}

/// Geometry paired with the host's material handle.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh<M> {
    pub geometry: Geometry,
    pub material: M,
}

impl<M> Mesh<M> {
    pub fn new(geometry: Geometry, material: M) -> Self {
        Self { geometry, material }
    }
}
