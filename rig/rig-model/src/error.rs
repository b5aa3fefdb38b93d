//! Error types for model loading.

use rig_skeleton::SkeletonError;
use rig_topology::TopologyError;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Fatal load-time errors for a model.
///
/// A model that fails to load is replaced by a placeholder by the
/// caller. Bad animation tracks are *not* here: they are dropped with a
/// warning and the model loads without them.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The skeleton violates its structural invariants.
    #[error("skeleton failed to load: {0}")]
    Skeleton(#[from] SkeletonError),

    /// A mesh's index structure is corrupt.
    #[error("mesh {mesh} failed to load: {source}")]
    Mesh {
        /// Index of the offending mesh.
        mesh: usize,
        /// The underlying structural error.
        source: TopologyError,
    },
}
