//! A skinned mesh group.

use crate::{Material, MeshTriangle, SkinnedVertex, VertexWeight};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One mesh group of a model: vertices, shared weight list, triangles,
/// and the material the renderer draws it with.
///
/// The tables are filled by the loader and finalized by the topology
/// preprocessor (geo-dup linking, seam splitting, adjacency). After that
/// they are immutable for the lifetime of the mesh.
///
/// # Example
///
/// ```
/// use rig_types::{Material, MeshTriangle, Point3, SkinnedMesh, SkinnedVertex,
///                 Vector2, VertexWeight};
///
/// let mut mesh = SkinnedMesh::new(Material::new("skin"));
/// for k in 0..3 {
///     mesh.weights.push(VertexWeight::new(0, 1.0, Point3::new(k as f64, 0.0, 0.0)));
///     mesh.vertices.push(SkinnedVertex::new(Vector2::new(0.0, 0.0), k, 1));
/// }
/// mesh.triangles.push(MeshTriangle::new([0, 1, 2]));
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkinnedMesh {
    /// Material this group is drawn with.
    pub material: Material,
    /// Vertex table.
    pub vertices: Vec<SkinnedVertex>,
    /// Shared weight list; vertices reference consecutive ranges of it.
    pub weights: Vec<VertexWeight>,
    /// Triangle table.
    pub triangles: Vec<MeshTriangle>,
}

impl SkinnedMesh {
    /// Create an empty mesh with the given material.
    #[inline]
    #[must_use]
    pub const fn new(material: Material) -> Self {
        Self {
            material,
            vertices: Vec::new(),
            weights: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no drawable geometry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangles.is_empty()
    }

    /// The weights influencing a vertex.
    ///
    /// The vertex's weight range is validated against the weight list at
    /// load time, so this never goes out of bounds for a preprocessed
    /// mesh.
    #[inline]
    #[must_use]
    pub fn weights_of(&self, vertex: &SkinnedVertex) -> &[VertexWeight] {
        &self.weights[vertex.weight_range()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector2};

    #[test]
    fn weights_of_vertex() {
        let mut mesh = SkinnedMesh::new(Material::new("m"));
        mesh.weights.push(VertexWeight::new(0, 0.3, Point3::origin()));
        mesh.weights.push(VertexWeight::new(1, 0.7, Point3::origin()));
        mesh.vertices.push(SkinnedVertex::new(Vector2::zeros(), 0, 2));

        let w = mesh.weights_of(&mesh.vertices[0]);
        assert_eq!(w.len(), 2);
        assert_eq!(w[1].joint, 1);
    }

    #[test]
    fn empty_mesh() {
        let mesh = SkinnedMesh::new(Material::new("m"));
        assert!(mesh.is_empty());
    }
}
