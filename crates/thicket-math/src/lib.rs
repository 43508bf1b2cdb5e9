//! Geometry primitives shared by the thicket crates: bounding volumes, view
//! frustum tests, a camera, and instance transform composition.

mod aabb;
mod camera;
mod frustum;
mod sphere;
mod transform;

pub use aabb::Aabb;
pub use camera::Camera;
pub use frustum::Frustum;
pub use sphere::Sphere;
pub use transform::compose_trs;
