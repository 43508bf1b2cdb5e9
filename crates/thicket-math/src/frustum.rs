//! View frustum as six inward-facing half-spaces, with box and point tests.
//!
//! The frustum is usually extracted from a camera's view-projection matrix, but
//! hosts that already track their own clip planes can hand them over directly
//! through [`Frustum::from_planes`].

use glam::{Mat4, Vec3, Vec4};

use crate::Aabb;

/// Plane indices into the frustum planes array.
const LEFT: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const TOP: usize = 3;
const NEAR: usize = 4;
const FAR: usize = 5;

/// A view frustum defined by six inward-pointing planes.
#[derive(Clone, Debug, PartialEq)]
pub struct Frustum {
    /// Six planes: left, right, bottom, top, near, far.
    /// Each `Vec4(a, b, c, d)` where `(a,b,c)` is the normalized inward
    /// normal and `d` is the signed distance term.
    planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a combined view-projection matrix
    /// using the Griggs-Hartmann method.
    ///
    /// Expects reverse-Z with a `[0, 1]` depth range (near maps to 1, far to 0),
    /// which is what [`Camera`](crate::Camera) produces for both projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];

        let mut planes = [Vec4::ZERO; 6];
        planes[LEFT] = rows[3] + rows[0];
        planes[RIGHT] = rows[3] - rows[0];
        planes[BOTTOM] = rows[3] + rows[1];
        planes[TOP] = rows[3] - rows[1];
        // Reverse-Z: z_ndc <= 1 is the near plane, z_ndc >= 0 the far plane.
        planes[NEAR] = rows[3] - rows[2];
        planes[FAR] = rows[2];

        Self::from_planes(planes)
    }

    /// Build a frustum from six half-spaces `(n, d)` where `n.dot(p) + d >= 0`
    /// holds for points inside. Normals are normalized here.
    pub fn from_planes(mut planes: [Vec4; 6]) -> Self {
        for plane in &mut planes {
            let len = plane.truncate().length();
            if len > 0.0 {
                *plane /= len;
            }
        }
        Self { planes }
    }

    /// An axis-aligned box expressed as six half-spaces.
    ///
    /// Useful for top-down map views and for tests that need an exact volume.
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self::from_planes([
            Vec4::new(1.0, 0.0, 0.0, -aabb.min.x),
            Vec4::new(-1.0, 0.0, 0.0, aabb.max.x),
            Vec4::new(0.0, 1.0, 0.0, -aabb.min.y),
            Vec4::new(0.0, -1.0, 0.0, aabb.max.y),
            Vec4::new(0.0, 0.0, -1.0, aabb.max.z),
            Vec4::new(0.0, 0.0, 1.0, -aabb.min.z),
        ])
    }

    /// The normalized planes in left, right, bottom, top, near, far order.
    pub fn planes(&self) -> &[Vec4; 6] {
        &self.planes
    }

    /// Test whether an AABB is at least partially inside the frustum.
    ///
    /// Uses the p-vertex (positive vertex) method: for each plane, find
    /// the corner of the AABB furthest along the plane normal. If that
    /// corner is behind the plane, the entire AABB is outside.
    ///
    /// This is conservative: it may return `true` for some AABBs that
    /// are fully outside (near frustum corners), but never returns
    /// `false` for visible boxes.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        for plane in &self.planes {
            let normal = plane.truncate();
            let d = plane.w;

            // Positive vertex: the corner furthest along the plane normal.
            let p = Vec3::new(
                if normal.x >= 0.0 {
                    aabb.max.x
                } else {
                    aabb.min.x
                },
                if normal.y >= 0.0 {
                    aabb.max.y
                } else {
                    aabb.min.y
                },
                if normal.z >= 0.0 {
                    aabb.max.z
                } else {
                    aabb.min.z
                },
            );

            if normal.dot(p) + d < 0.0 {
                return false;
            }
        }
        true
    }

    /// Exact point test; points lying on a plane count as inside.
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(p) + plane.w >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    fn default_camera_vp() -> Mat4 {
        let view = Mat4::look_to_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let proj = Mat4::perspective_rh(
            std::f32::consts::FRAC_PI_4,
            16.0 / 9.0,
            1000.0, // reverse-Z: far as near param
            0.1,    // reverse-Z: near as far param
        );
        proj * view
    }

    #[test]
    fn test_object_in_front_visible() {
        let frustum = Frustum::from_view_projection(&default_camera_vp());
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -5.0), Vec3::new(1.0, 1.0, -3.0));
        assert!(frustum.intersects_aabb(&aabb));
    }

    #[test]
    fn test_object_behind_camera_not_visible() {
        let frustum = Frustum::from_view_projection(&default_camera_vp());
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, 5.0), Vec3::new(1.0, 1.0, 10.0));
        assert!(!frustum.intersects_aabb(&aabb));
    }

    #[test]
    fn test_object_far_to_the_side_not_visible() {
        let frustum = Frustum::from_view_projection(&default_camera_vp());
        let aabb = Aabb::new(Vec3::new(1000.0, -1.0, -6.0), Vec3::new(1002.0, 1.0, -4.0));
        assert!(!frustum.intersects_aabb(&aabb));
    }

    #[test]
    fn test_object_partially_in_frustum_is_visible() {
        let frustum = Frustum::from_view_projection(&default_camera_vp());
        let aabb = Aabb::new(Vec3::new(-100.0, -1.0, -10.0), Vec3::new(1.0, 1.0, -5.0));
        assert!(frustum.intersects_aabb(&aabb));
    }

    #[test]
    fn test_all_six_planes_tested() {
        let frustum = Frustum::from_view_projection(&default_camera_vp());

        // Behind camera
        let behind = Aabb::new(Vec3::splat(10.0), Vec3::splat(20.0));
        assert!(!frustum.intersects_aabb(&behind));

        // Far left
        let left = Aabb::new(Vec3::new(-1000.0, 0.0, -5.0), Vec3::new(-999.0, 1.0, -4.0));
        assert!(!frustum.intersects_aabb(&left));

        // Far right
        let right = Aabb::new(Vec3::new(999.0, 0.0, -5.0), Vec3::new(1000.0, 1.0, -4.0));
        assert!(!frustum.intersects_aabb(&right));

        // Far above
        let above = Aabb::new(Vec3::new(0.0, 999.0, -5.0), Vec3::new(1.0, 1000.0, -4.0));
        assert!(!frustum.intersects_aabb(&above));

        // Far below
        let below = Aabb::new(Vec3::new(0.0, -1000.0, -5.0), Vec3::new(1.0, -999.0, -4.0));
        assert!(!frustum.intersects_aabb(&below));

        // Beyond far plane
        let beyond_far = Aabb::new(Vec3::new(0.0, 0.0, -2000.0), Vec3::new(1.0, 1.0, -1500.0));
        assert!(!frustum.intersects_aabb(&beyond_far));
    }

    #[test]
    fn test_frustum_planes_are_normalized() {
        let frustum = Frustum::from_view_projection(&default_camera_vp());
        for plane in frustum.planes() {
            let normal_len = plane.truncate().length();
            assert!(
                (normal_len - 1.0).abs() < 1e-4,
                "plane normal not normalized: {normal_len}"
            );
        }
    }

    #[test]
    fn test_contains_point_respects_near_and_far() {
        let frustum = Frustum::from_view_projection(&default_camera_vp());
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -10.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -0.05)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -1001.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_box_frustum_is_inclusive_on_faces() {
        let frustum = Frustum::from_aabb(&Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)));
        assert!(frustum.contains_point(Vec3::ZERO));
        assert!(frustum.contains_point(Vec3::new(1.0, -1.0, 1.0)));
        assert!(!frustum.contains_point(Vec3::new(1.5, 0.0, 0.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -1.5)));
    }
}
