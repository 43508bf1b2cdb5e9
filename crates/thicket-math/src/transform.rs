//! Instance transform composition.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Rotation for intrinsic X-then-Y-then-Z Euler angles (radians), i.e. `Rx * Ry * Rz`.
#[inline]
fn euler_xyz_to_quat(euler: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z)
}

/// `T * R * S` for a translation, XYZ Euler rotation and per-axis scale.
#[inline]
pub fn compose_trs(translation: Vec3, euler: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, euler_xyz_to_quat(euler), translation)
}
