//! Renderer-facing geometry views.

use rig_types::{DeformedVertex, Material, SkinnedMesh, Vector2};

/// One mesh group's renderable data for the current pose.
///
/// This is the tuple the renderer consumes for ambient and lighting
/// passes: a material reference plus per-vertex positions, tangent
/// frames, and UVs. The view borrows from the model; nothing is copied.
#[derive(Debug, Clone, Copy)]
pub struct MeshGeometry<'a> {
    /// The material to draw with.
    pub material: &'a Material,
    /// Deformed positions and tangent bases, one per vertex.
    pub vertices: &'a [DeformedVertex],
    mesh: &'a SkinnedMesh,
}

impl<'a> MeshGeometry<'a> {
    pub(crate) fn new(mesh: &'a SkinnedMesh, vertices: &'a [DeformedVertex]) -> Self {
        Self {
            material: &mesh.material,
            vertices,
            mesh,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Texture coordinates of one vertex.
    #[must_use]
    pub fn uv(&self, vertex: usize) -> Vector2<f64> {
        self.mesh.vertices[vertex].uv
    }

    /// Iterate over triangle vertex-index triples.
    pub fn triangle_indices(&self) -> impl Iterator<Item = [u32; 3]> + 'a {
        self.mesh.triangles.iter().map(|t| t.vertices)
    }
}
