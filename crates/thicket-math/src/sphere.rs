//! Bounding spheres used for max-distance culling.

use glam::Vec3;

use crate::Aabb;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// True when the closest point of `aabb` lies within the sphere.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        aabb.distance_squared_to_point(self.center) <= self.radius * self.radius
    }
}
