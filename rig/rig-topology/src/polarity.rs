//! UV-polarity stamping and mirror-seam repair.
//!
//! A triangle's polarity is the sign of its UV winding. Where a texture
//! is mirrored, triangles of both polarities meet, and a vertex shared
//! across that seam would need two opposing tangent-space orientations
//! at once. The repair pass splits such vertices so that every vertex
//! belongs to triangles of a single polarity only; tangent accumulation
//! then never averages across the mirror.

use nalgebra::Vector2;
use rig_types::SkinnedMesh;
use tracing::debug;

/// Polarity of a UV triangle: `true` for positive winding.
///
/// Computed as the sign of the 2D cross product of the two UV edge
/// deltas. Degenerate (zero-area) UV triangles count as positive.
#[inline]
#[must_use]
pub fn uv_polarity(uv0: Vector2<f64>, uv1: Vector2<f64>, uv2: Vector2<f64>) -> bool {
    (uv1 - uv0).perp(&(uv2 - uv0)) >= 0.0
}

/// Stamp polarities and split vertices shared across a mirror seam.
///
/// Every triangle gets its UV polarity; every vertex is stamped with the
/// polarity of an arbitrary incident triangle. Then each vertex whose
/// triangle disagrees with its stamp is split: a copy is appended, the
/// original is fixed to positive polarity and the copy to negative, and
/// all triangles referencing the original are repointed to whichever of
/// the two matches their own polarity. The copy joins the original's
/// geo-dup set (symmetrically, on both sides) since its weight data is
/// identical by construction.
///
/// Splitting only ever appends vertex records and rewrites triangle
/// index fields, so no reference into the vertex table is held across
/// the append.
///
/// Returns the number of vertices split.
pub fn split_polarity_seams(mesh: &mut SkinnedMesh) -> usize {
    for t in 0..mesh.triangles.len() {
        let [a, b, c] = mesh.triangles[t].vertices;
        mesh.triangles[t].polarity = uv_polarity(
            mesh.vertices[a as usize].uv,
            mesh.vertices[b as usize].uv,
            mesh.vertices[c as usize].uv,
        );
    }

    // Stamp each vertex from its first incident triangle.
    let mut stamped = vec![false; mesh.vertices.len()];
    for t in 0..mesh.triangles.len() {
        let polarity = mesh.triangles[t].polarity;
        for &v in &mesh.triangles[t].vertices {
            if !stamped[v as usize] {
                stamped[v as usize] = true;
                mesh.vertices[v as usize].polarity = polarity;
            }
        }
    }

    let mut splits = 0;
    for t in 0..mesh.triangles.len() {
        let polarity = mesh.triangles[t].polarity;
        for k in 0..3 {
            let v = mesh.triangles[t].vertices[k] as usize;
            if mesh.vertices[v].polarity != polarity {
                split_vertex(mesh, v);
                splits += 1;
            }
        }
    }

    if splits > 0 {
        debug!(splits, "split mirror-seam vertices");
    }
    splits
}

/// Split one vertex into a positive-polarity original and a
/// negative-polarity copy, repointing every referencing triangle.
fn split_vertex(mesh: &mut SkinnedMesh, v: usize) {
    let new_index = mesh.vertices.len() as u32;

    let mut copy = mesh.vertices[v].clone();
    copy.polarity = false;
    // The copy is a geo-dup of the original and of everything the
    // original was a dup of.
    let original_dups = mesh.vertices[v].geo_dups.clone();
    if let Err(slot) = copy.geo_dups.binary_search(&(v as u32)) {
        copy.geo_dups.insert(slot, v as u32);
    }
    mesh.vertices.push(copy);

    mesh.vertices[v].polarity = true;
    mesh.vertices[v].geo_dups.push(new_index);
    for &d in &original_dups {
        mesh.vertices[d as usize].geo_dups.push(new_index);
    }

    for triangle in &mut mesh.triangles {
        if triangle.polarity {
            continue;
        }
        for slot in &mut triangle.vertices {
            if *slot == v as u32 {
                *slot = new_index;
            }
        }
    }
}
