use glam::{Mat4, Quat, Vec3};

use crate::Mesh;

/// Local transform of a scene node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn from_scale(scale: Vec3) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    /// `translation * rotation * scale`.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// A node in a model hierarchy, optionally carrying a mesh.
#[derive(Clone, Debug)]
pub struct SceneNode<M> {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Mesh<M>>,
    pub children: Vec<SceneNode<M>>,
}

impl<M> SceneNode<M> {
    /// An empty grouping node.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            mesh: None,
            children: Vec::new(),
        }
    }

    /// A leaf node holding `mesh`.
    pub fn with_mesh(name: impl Into<String>, mesh: Mesh<M>) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::group(name)
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_child(mut self, child: SceneNode<M>) -> Self {
        self.children.push(child);
        self
    }
}
