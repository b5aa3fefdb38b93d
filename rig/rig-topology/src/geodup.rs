//! Geo-dup detection.
//!
//! Two vertices are *geo-dups* when their weight data is identical: the
//! same bone influences with the same scalar weights and bind offsets.
//! Such vertices exist to carry different UVs across a texture seam while
//! deforming to the exact same position. Linking them lets the deformer
//! compute each position once and lets adjacency treat the seam as
//! connected surface.

use rig_types::{SkinnedMesh, SkinnedVertex, VertexWeight};
use tracing::debug;

/// Link every pair of weight-identical vertices.
///
/// Vertices `i` and `j` are geo-dups iff they have the same weight count
/// and either the same first-weight index or element-wise identical
/// (joint, weight, offset) tuples. Comparison is exact: duplicated
/// vertices come from duplicated source data, so their components are
/// bit-identical.
///
/// This is an O(V²) pass, acceptable as a one-time load cost.
///
/// Returns the number of links created. The resulting sets are symmetric
/// and transitive-closed (weight identity is an equivalence relation),
/// stored in increasing index order.
pub fn link_geo_dups(mesh: &mut SkinnedMesh) -> usize {
    let mut links = 0;

    for i in 0..mesh.vertices.len() {
        for j in (i + 1)..mesh.vertices.len() {
            if !are_geo_dups(&mesh.vertices[i], &mesh.vertices[j], &mesh.weights) {
                continue;
            }
            // j ascends within the inner loop and i ascends in the outer
            // loop, so plain pushes keep both sets sorted.
            mesh.vertices[i].geo_dups.push(j as u32);
            mesh.vertices[j].geo_dups.push(i as u32);
            links += 1;
        }
    }

    if links > 0 {
        debug!(links, "linked geo-dup vertices");
    }
    links
}

/// Weight-identity test for one vertex pair.
fn are_geo_dups(a: &SkinnedVertex, b: &SkinnedVertex, weights: &[VertexWeight]) -> bool {
    if a.weight_count != b.weight_count {
        return false;
    }
    if a.first_weight == b.first_weight {
        return true;
    }
    let wa = &weights[a.weight_range()];
    let wb = &weights[b.weight_range()];
    wa.iter()
        .zip(wb)
        .all(|(x, y)| x.joint == y.joint && x.weight == y.weight && x.offset == y.offset)
}
