//! Engine construction errors.

/// Errors rejected when constructing an [`InstancedLod`](crate::InstancedLod).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LodError {
    /// Distances must be finite with `min < max`.
    #[error("invalid distance range: min {min} must be finite and below max {max}")]
    InvalidDistanceRange { min: f32, max: f32 },

    /// The instance budget must allow at least one instance.
    #[error("max_count must be greater than zero")]
    ZeroMaxCount,

    /// Leaves must hold at least one point.
    #[error("max_leaf_size must be greater than zero")]
    ZeroLeafSize,

    /// At least one mesh variant is needed to render anything.
    #[error("no mesh variants supplied")]
    NoMeshVariants,

    /// The positions buffer is not a whole number of xyz triples.
    #[error("positions buffer length {len} is not a multiple of 3")]
    PositionLength { len: usize },

    /// An optional per-point buffer does not match the positions buffer.
    #[error("{attribute} buffer has length {actual}, expected {expected}")]
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },
}
