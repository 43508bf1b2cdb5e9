use glam::Mat4;

use crate::{Mesh, SceneNode};

/// Collect every mesh in the hierarchy with its world transform baked in.
///
/// Nodes are visited depth-first, parent before children, children in order.
/// Each returned mesh owns a copy of its geometry; the accumulated world
/// matrix is decomposed and applied as scale, then rotation, then
/// translation, after which normals are recomputed. Shear from non-uniform
/// parent scales does not survive the decomposition.
pub fn flat_meshes<M: Clone>(root: &SceneNode<M>) -> Vec<Mesh<M>> {
    let mut meshes = Vec::new();
    collect(root, Mat4::IDENTITY, &mut meshes);
    log::debug!("flattened {} meshes from '{}'", meshes.len(), root.name);
    meshes
}

fn collect<M: Clone>(node: &SceneNode<M>, parent: Mat4, out: &mut Vec<Mesh<M>>) {
    let world = parent * node.transform.to_matrix();

    if let Some(mesh) = &node.mesh {
        let (scale, rotation, translation) = world.to_scale_rotation_translation();
        let mut geometry = mesh.geometry.clone();
        geometry.scale(scale);
        geometry.rotate(rotation);
        geometry.translate(translation);
        geometry.compute_vertex_normals();
        out.push(Mesh::new(geometry, mesh.material.clone()));
    }

    for child in &node.children {
        collect(child, world, out);
    }
}
