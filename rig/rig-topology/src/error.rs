//! Error types for topology preprocessing.

use thiserror::Error;

/// Result type for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Load-time structural errors in a mesh.
///
/// Any of these is fatal to the mesh: the caller substitutes a
/// placeholder model rather than drawing corrupt data.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// A vertex's weight range runs past the end of the weight list.
    #[error(
        "vertex {vertex} weight range at {first} ({count} weights) exceeds weight list of {weight_count}"
    )]
    WeightRangeOutOfBounds {
        /// The offending vertex.
        vertex: usize,
        /// First weight index.
        first: u32,
        /// Number of weights.
        count: u32,
        /// Length of the mesh's weight list.
        weight_count: usize,
    },

    /// A vertex with no weights cannot be deformed.
    #[error("vertex {vertex} has no weights")]
    NoWeights {
        /// The offending vertex.
        vertex: usize,
    },

    /// A weight references a joint the skeleton does not have.
    #[error("weight {weight} references joint {joint} ({joint_count} joints)")]
    JointOutOfBounds {
        /// Index into the weight list.
        weight: usize,
        /// The bad joint index.
        joint: u32,
        /// The skeleton's joint count.
        joint_count: usize,
    },

    /// A triangle references a vertex the mesh does not have.
    #[error("triangle {triangle} references vertex {vertex} ({vertex_count} vertices)")]
    VertexOutOfBounds {
        /// The offending triangle.
        triangle: usize,
        /// The bad vertex index.
        vertex: u32,
        /// The mesh's vertex count.
        vertex_count: usize,
    },
}
