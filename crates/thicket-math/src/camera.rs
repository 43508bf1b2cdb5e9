//! Perspective camera that hands the selector a world position and a frustum.

use glam::{Mat4, Quat, Vec3};

use crate::Frustum;

/// A perspective viewer with reverse-Z depth.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Orientation; the camera looks down its local -Z with +Y up.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: std::f32::consts::FRAC_PI_3,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 10_000.0,
        }
    }
}

impl Camera {
    /// A default-lens camera at `eye` looking towards `target`.
    ///
    /// Keeps the identity rotation when `eye == target`.
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut camera = Self {
            position: eye,
            ..Self::default()
        };
        camera.look_at(target, up);
        camera
    }

    /// Turn in place so that the view axis points at `target`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let dir = target - self.position;
        if dir.length_squared() <= f32::EPSILON {
            return;
        }
        // look_to_rh is world->view; the camera orientation is its inverse.
        let view = Mat4::look_to_rh(Vec3::ZERO, dir.normalize(), up);
        self.rotation = Quat::from_mat4(&view).inverse().normalize();
    }

    /// Clip-space transform: near maps to depth 1, far to depth 0.
    pub fn view_projection_matrix(&self) -> Mat4 {
        // Swapping near and far gives reverse-Z.
        let projection = Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near);
        let view = Mat4::from_rotation_translation(self.rotation, self.position).inverse();
        projection * view
    }

    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }

    /// World-space position; cameras here are never parented.
    pub fn world_position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn ndc(camera: &Camera, p: Vec3) -> Vec3 {
        let clip = camera.view_projection_matrix() * Vec4::new(p.x, p.y, p.z, 1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn test_default_camera_sees_down_neg_z() {
        let frustum = Camera::default().frustum();
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -5.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_target_projects_to_screen_centre() {
        let camera = Camera::looking_at(Vec3::new(3.0, 8.0, -4.0), Vec3::new(20.0, 0.0, 10.0), Vec3::Y);
        let p = ndc(&camera, Vec3::new(20.0, 0.0, 10.0));
        assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4, "{p}");
    }

    #[test]
    fn test_depth_is_reversed() {
        let camera = Camera {
            near: 1.0,
            far: 100.0,
            ..Camera::default()
        };
        let near = ndc(&camera, Vec3::new(0.0, 0.0, -1.0));
        let far = ndc(&camera, Vec3::new(0.0, 0.0, -100.0));
        assert!((near.z - 1.0).abs() < 1e-5, "near depth {}", near.z);
        assert!(far.z.abs() < 1e-5, "far depth {}", far.z);
    }

    #[test]
    fn test_straight_down_view_keeps_ground_in_frame() {
        let camera = Camera::looking_at(Vec3::new(0.0, 20.0, 0.0), Vec3::ZERO, Vec3::Z);
        let frustum = camera.frustum();
        assert!(frustum.contains_point(Vec3::ZERO));
        assert!(!frustum.contains_point(Vec3::new(0.0, 40.0, 0.0)));
    }

    #[test]
    fn test_frustum_rejects_points_past_far_plane() {
        let camera = Camera {
            far: 50.0,
            ..Camera::looking_at(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
        };
        let frustum = camera.frustum();
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -49.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -51.0)));
    }

    #[test]
    fn test_wider_aspect_sees_further_sideways() {
        let p = Vec3::new(9.0, 0.0, -10.0);
        let narrow = Camera {
            aspect_ratio: 1.0,
            ..Camera::default()
        };
        assert!(!narrow.frustum().contains_point(p));
        assert!(Camera::default().frustum().contains_point(p));
    }

    #[test]
    fn test_look_at_own_position_is_ignored() {
        let mut camera = Camera::default();
        camera.look_at(Vec3::ZERO, Vec3::Y);
        assert_eq!(camera.rotation, Quat::IDENTITY);
        assert_eq!(camera.world_position(), Vec3::ZERO);
    }
}
