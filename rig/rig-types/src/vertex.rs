//! Skinned vertices and bone weights.

use nalgebra::{Point3, Vector2};
use smallvec::SmallVec;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The set of geometric-duplicate vertex indices attached to a vertex.
///
/// Most vertices have no duplicates; seam vertices typically have one or
/// two, so the set stays inline.
pub type GeoDupSet = SmallVec<[u32; 4]>;

/// One bone influence on a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexWeight {
    /// Index of the influencing joint.
    pub joint: u32,
    /// Scalar blend weight. Weights of one vertex are assumed to be
    /// pre-normalized; this is not enforced at runtime.
    pub weight: f64,
    /// Bind-space offset of the vertex relative to the joint.
    pub offset: Point3<f64>,
}

impl VertexWeight {
    /// Create a weight.
    #[inline]
    #[must_use]
    pub const fn new(joint: u32, weight: f64, offset: Point3<f64>) -> Self {
        Self {
            joint,
            weight,
            offset,
        }
    }
}

/// A vertex of a skinned mesh.
///
/// The deformable data (bone influences) lives in the mesh's shared
/// weight list; the vertex stores a range into it. Two vertices whose
/// weight data is identical are *geo-dups* of each other: they always
/// deform to the same position and differ only in their UV coordinates
/// (and, after seam splitting, their polarity). Geo-dup sets are
/// symmetric, transitive-closed, stored in increasing index order, and
/// never contain the vertex's own index.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkinnedVertex {
    /// Texture coordinates.
    pub uv: Vector2<f64>,
    /// Index of the first weight in the mesh's weight list.
    pub first_weight: u32,
    /// Number of consecutive weights belonging to this vertex.
    pub weight_count: u32,
    /// UV-winding polarity of the triangles this vertex belongs to.
    /// After the seam-splitting pass every vertex belongs to triangles
    /// of a single polarity only.
    pub polarity: bool,
    /// Indices of weight-identical vertices.
    pub geo_dups: GeoDupSet,
}

impl SkinnedVertex {
    /// Create a vertex with the given UV and weight range.
    ///
    /// Polarity is stamped and geo-dups are linked by the topology
    /// preprocessor at load time.
    #[must_use]
    pub fn new(uv: Vector2<f64>, first_weight: u32, weight_count: u32) -> Self {
        Self {
            uv,
            first_weight,
            weight_count,
            polarity: true,
            geo_dups: GeoDupSet::new(),
        }
    }

    /// The vertex's range into the mesh weight list.
    #[inline]
    #[must_use]
    pub const fn weight_range(&self) -> Range<usize> {
        let first = self.first_weight as usize;
        first..first + self.weight_count as usize
    }

    /// Check whether any geo-dups are linked.
    #[inline]
    #[must_use]
    pub fn has_geo_dups(&self) -> bool {
        !self.geo_dups.is_empty()
    }
}
