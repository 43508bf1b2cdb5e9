//! Index build errors.

use crate::PointId;

/// Errors that can occur while building a [`PointBvh`](crate::PointBvh).
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BvhError {
    /// A coordinate was NaN or infinite, which makes its bounds meaningless.
    #[error("point {id} has a non-finite position")]
    NonFinitePosition { id: PointId },

    /// More points than a [`PointId`] can address.
    #[error("{count} points exceed the u32 id space")]
    TooManyPoints { count: usize },
}
