//! Procedural mesh variants: a grass blade and a small flower.

use glam::{Quat, Vec3};
use thicket_scene::{Geometry, Mesh, SceneNode, Transform, flat_meshes};

/// Flat-colour material handle for the demo variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub name: &'static str,
    pub color: [f32; 3],
}

const BLADE: Material = Material {
    name: "blade",
    color: [0.28, 0.55, 0.18],
};
const FLOWER: Material = Material {
    name: "flower",
    color: [0.95, 0.85, 0.3],
};

/// A tapered blade narrowing to a tip at height 1.
fn blade_geometry() -> Geometry {
    Geometry::indexed(
        vec![
            Vec3::new(-0.05, 0.0, 0.0),
            Vec3::new(0.05, 0.0, 0.0),
            Vec3::new(0.03, 0.5, 0.0),
            Vec3::new(-0.03, 0.5, 0.0),
            Vec3::new(0.0, 1.0, 0.02),
        ],
        vec![0, 1, 2, 0, 2, 3, 3, 2, 4],
    )
}

/// A flat unit square facing up.
fn card_geometry() -> Geometry {
    Geometry::indexed(
        vec![
            Vec3::new(-0.5, 0.0, -0.5),
            Vec3::new(0.5, 0.0, -0.5),
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(-0.5, 0.0, 0.5),
        ],
        vec![0, 2, 1, 0, 3, 2],
    )
}

/// The model hierarchy for both variants, as a loader would produce it.
pub fn vegetation_scene() -> SceneNode<Material> {
    let flower = SceneNode::group("flower")
        .with_transform(Transform::from_translation(Vec3::new(0.3, 0.0, 0.0)))
        .with_child(
            SceneNode::with_mesh("petals", Mesh::new(card_geometry(), FLOWER)).with_transform(
                Transform {
                    translation: Vec3::new(0.0, 0.7, 0.0),
                    rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
                    scale: Vec3::splat(0.2),
                },
            ),
        );

    SceneNode::group("vegetation")
        .with_child(SceneNode::with_mesh("blade", Mesh::new(blade_geometry(), BLADE)))
        .with_child(flower)
}

/// Flattened meshes of the vegetation scene, one instancing variant each.
pub fn build_variants() -> Vec<Mesh<Material>> {
    flat_meshes(&vegetation_scene())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_follow_scene_order() {
        let names: Vec<_> = build_variants().iter().map(|m| m.material.name).collect();
        assert_eq!(names, ["blade", "flower"]);
    }

    #[test]
    fn test_petals_are_baked_into_place() {
        let variants = build_variants();
        let petals = &variants[1].geometry;
        for p in &petals.positions {
            assert!((p.y - 0.7).abs() < 1e-5);
            assert!((p.x - 0.3).abs() <= 0.15);
        }
        for n in &petals.normals {
            assert!((n.y.abs() - 1.0).abs() < 1e-5);
        }
    }
}
