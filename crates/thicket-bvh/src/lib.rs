//! Bounding-volume hierarchy over a static point set.
//!
//! Every point lands in exactly one leaf. Queries walk the tree top-down,
//! letting a [`BvhVisitor`] prune subtrees by their bounds and then visiting
//! the surviving points one by one.

mod build;
mod error;
mod node;
mod traverse;

pub use build::{BuildOptions, PointBvh};
pub use error::BvhError;
pub use node::{BvhNode, NodeKind};
pub use traverse::BvhVisitor;

/// Stable handle of one point: its index in the source arrays.
pub type PointId = u32;
