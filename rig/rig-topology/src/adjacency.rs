//! Triangle adjacency over geo-dup classes.
//!
//! Adjacency is what the silhouette walk consumes. Geo-dup vertices are
//! topologically identical (a UV seam is still connected surface), so
//! edges are keyed by a canonical representative of each vertex's
//! geo-dup class rather than by raw indices.

use hashbrown::{HashMap, HashSet};
use rig_types::{EdgeNeighbor, SkinnedMesh};
use tracing::debug;

/// Build per-edge adjacency for every triangle.
///
/// For each directed edge the matching triangles are those sharing the
/// *reversed* edge (consistent winding means a neighbor traverses the
/// shared edge the other way). Exactly one match is a normal neighbor.
/// An edge shared by more than two triangles is non-manifold, and every
/// triangle on it is flagged so - not just the pair that detected it -
/// because the third triangle usually finds the conflict asymmetrically.
/// Unmatched edges stay open.
///
/// Returns `(open_edges, non_manifold_edges)` counts for reporting;
/// `non_manifold_edges` counts distinct undirected edges.
pub fn build_adjacency(mesh: &mut SkinnedMesh) -> (usize, usize) {
    // Canonical vertex class: the smallest index in {v} ∪ geo_dups.
    // Geo-dup sets are sorted and transitive-closed, so the first entry
    // is the class minimum.
    let class: Vec<u32> = mesh
        .vertices
        .iter()
        .enumerate()
        .map(|(i, v)| v.geo_dups.first().map_or(i as u32, |&d| d.min(i as u32)))
        .collect();

    // Directed class edge -> (triangle, edge slot) list.
    let mut edges: HashMap<(u32, u32), Vec<(u32, u8)>> = HashMap::new();
    for (t, triangle) in mesh.triangles.iter().enumerate() {
        for k in 0..3 {
            let (a, b) = triangle.edge(k);
            let key = (class[a as usize], class[b as usize]);
            edges.entry(key).or_default().push((t as u32, k as u8));
        }
    }

    // Undirected edges shared by more than two triangles. Computing the
    // set up front keeps the flagging symmetric: every triangle on such
    // an edge is flagged, regardless of which directions the windings
    // happen to run.
    let mut non_manifold: HashSet<(u32, u32)> = HashSet::new();
    for (&(a, b), list) in &edges {
        let total = if a == b {
            list.len()
        } else {
            list.len() + edges.get(&(b, a)).map_or(0, Vec::len)
        };
        if total > 2 {
            non_manifold.insert(if a <= b { (a, b) } else { (b, a) });
        }
    }

    let mut open = 0;

    for t in 0..mesh.triangles.len() {
        for k in 0..3 {
            let (a, b) = mesh.triangles[t].edge(k);
            let (ca, cb) = (class[a as usize], class[b as usize]);
            let undirected = if ca <= cb { (ca, cb) } else { (cb, ca) };

            if non_manifold.contains(&undirected) {
                mesh.triangles[t].neighbors[k] = EdgeNeighbor::NonManifold;
                continue;
            }

            let reversed: &[(u32, u8)] = if ca == cb {
                // Degenerate edge within one class; a neighbor cannot be
                // told apart from the triangle itself.
                &[]
            } else {
                edges.get(&(cb, ca)).map_or(&[], Vec::as_slice)
            };

            let mut matches = reversed.iter().filter(|&&(other, _)| other as usize != t);
            match (matches.next(), matches.next()) {
                (Some(&(other, _)), None) => {
                    mesh.triangles[t].neighbors[k] = EdgeNeighbor::Triangle(other);
                }
                _ => {
                    mesh.triangles[t].neighbors[k] = EdgeNeighbor::Open;
                    open += 1;
                }
            }
        }
    }
    let non_manifold_edges = non_manifold.len();

    if open > 0 || non_manifold_edges > 0 {
        debug!(open, non_manifold_edges, "adjacency has unpaired edges");
    }
    (open, non_manifold_edges)
}
