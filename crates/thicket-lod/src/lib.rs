//! Instanced level-of-detail for dense point clouds.
//!
//! Given a static set of points (each with an optional rotation and scale) and
//! a list of mesh variants, [`InstancedLod`] decides every frame which points
//! are worth drawing and writes their transforms into one instance batch per
//! variant. Points outside the frustum or beyond `max_distance` are skipped;
//! the remainder are thinned by distance using density levels derived from a
//! bounding-volume hierarchy, and the result is capped at `max_count`.

mod engine;
mod error;
mod frame;
mod instances;
mod levels;
mod point_store;
mod selector;
mod settings;

pub use engine::InstancedLod;
pub use error::LodError;
pub use frame::{FrameQuery, FrameSelector, FrameStats};
pub use instances::{InstanceBatch, InstanceRaw, write_instances};
pub use levels::LevelMap;
pub use point_store::{PointCloud, PointStore};
pub use selector::LevelSelector;
pub use settings::LodSettings;

pub use thicket_bvh::{BuildOptions, PointId};
