//! Minimal scene hierarchy and the flattening pass that turns a loaded model
//! into standalone mesh variants for instancing.
//!
//! Instanced rendering needs each variant's geometry in a single local space.
//! [`flat_meshes`] walks a hierarchy, bakes every node's world transform into
//! a copy of its geometry and returns the meshes in traversal order.

mod flatten;
mod geometry;
mod node;

pub use flatten::flat_meshes;
pub use geometry::{Geometry, Mesh};
pub use node::{SceneNode, Transform};
