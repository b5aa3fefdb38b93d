//! The one-shot preprocessing driver.

use crate::adjacency::build_adjacency;
use crate::error::{TopologyError, TopologyResult};
use crate::geodup::link_geo_dups;
use crate::polarity::split_polarity_seams;
use rig_types::SkinnedMesh;
use tracing::{debug, info};

/// Summary of what preprocessing did to a mesh.
#[derive(Debug, Clone, Default)]
pub struct TopologyReport {
    /// Vertex count after seam splitting.
    pub vertex_count: usize,
    /// Triangle count.
    pub triangle_count: usize,
    /// Geo-dup links created by weight-identity detection.
    pub geo_dup_links: usize,
    /// Vertices split by mirror-seam repair.
    pub split_vertices: usize,
    /// Triangle edges with no neighbor.
    pub open_edges: usize,
    /// Undirected edges shared by more than two triangles.
    pub non_manifold_edges: usize,
}

impl TopologyReport {
    /// Check whether the mesh is closed and manifold - the precondition
    /// for the even-silhouette guarantee of shadow extraction.
    #[must_use]
    pub const fn is_watertight(&self) -> bool {
        self.open_edges == 0 && self.non_manifold_edges == 0
    }
}

impl std::fmt::Display for TopologyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Topology Report:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Triangles: {}", self.triangle_count)?;
        writeln!(f, "  Geo-dup links: {}", self.geo_dup_links)?;
        writeln!(f, "  Split vertices: {}", self.split_vertices)?;
        writeln!(f, "  Open edges: {}", self.open_edges)?;
        write!(f, "  Non-manifold edges: {}", self.non_manifold_edges)
    }
}

/// Validate a mesh's index structure against the skeleton's joint count.
///
/// Checks every vertex's weight range, every weight's joint index, and
/// every triangle's vertex indices. Any violation is fatal to the mesh.
pub fn validate_mesh(mesh: &SkinnedMesh, joint_count: usize) -> TopologyResult<()> {
    for (index, vertex) in mesh.vertices.iter().enumerate() {
        if vertex.weight_count == 0 {
            return Err(TopologyError::NoWeights { vertex: index });
        }
        if vertex.weight_range().end > mesh.weights.len() {
            return Err(TopologyError::WeightRangeOutOfBounds {
                vertex: index,
                first: vertex.first_weight,
                count: vertex.weight_count,
                weight_count: mesh.weights.len(),
            });
        }
    }
    for (index, weight) in mesh.weights.iter().enumerate() {
        if weight.joint as usize >= joint_count {
            return Err(TopologyError::JointOutOfBounds {
                weight: index,
                joint: weight.joint,
                joint_count,
            });
        }
    }
    for (index, triangle) in mesh.triangles.iter().enumerate() {
        for &v in &triangle.vertices {
            if v as usize >= mesh.vertices.len() {
                return Err(TopologyError::VertexOutOfBounds {
                    triangle: index,
                    vertex: v,
                    vertex_count: mesh.vertices.len(),
                });
            }
        }
    }
    Ok(())
}

/// Run the full load-time preprocessing pipeline on a mesh.
///
/// Order matters: geo-dups are linked from the loader's vertex table,
/// seam splitting then extends the dup sets with the copies it appends,
/// and adjacency is built last over the final vertex classes.
///
/// After this returns the mesh tables are final; nothing mutates them
/// again.
pub fn preprocess(mesh: &mut SkinnedMesh, joint_count: usize) -> TopologyResult<TopologyReport> {
    validate_mesh(mesh, joint_count)?;

    let geo_dup_links = link_geo_dups(mesh);
    let split_vertices = split_polarity_seams(mesh);
    let (open_edges, non_manifold_edges) = build_adjacency(mesh);

    let report = TopologyReport {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        geo_dup_links,
        split_vertices,
        open_edges,
        non_manifold_edges,
    };

    debug!(
        vertices = report.vertex_count,
        triangles = report.triangle_count,
        geo_dup_links = report.geo_dup_links,
        split_vertices = report.split_vertices,
        material = %mesh.material.name,
        "preprocessed mesh"
    );
    if !report.is_watertight() {
        info!(
            open = report.open_edges,
            non_manifold = report.non_manifold_edges,
            material = %mesh.material.name,
            "mesh is not watertight; shadow silhouettes may be open"
        );
    }
    Ok(report)
}
