//! Vertex skinning.

use nalgebra::{Matrix4, Point3, Vector3};
use rig_types::{DeformedVertex, SkinnedMesh};

/// Deform every vertex of a mesh by the given joint matrices.
///
/// Single-weight vertices are transformed directly; multi-weight
/// vertices take the convex combination of their per-joint transforms
/// (weights are assumed pre-normalized). A vertex whose lowest geo-dup
/// index has already been deformed in this pass copies that result
/// instead of recomputing it - geo-dups have identical weight data, so
/// the copy is bit-identical to what recomputation would produce.
///
/// `out` is resized to the vertex count; normals, tangents and binormals
/// are left untouched for the tangent accumulator.
pub fn deform_vertices(mesh: &SkinnedMesh, joints: &[Matrix4<f64>], out: &mut Vec<DeformedVertex>) {
    out.resize(mesh.vertices.len(), DeformedVertex::zeroed());

    for i in 0..mesh.vertices.len() {
        let vertex = &mesh.vertices[i];

        if let Some(&first_dup) = vertex.geo_dups.first() {
            if (first_dup as usize) < i {
                out[i].position = out[first_dup as usize].position;
                continue;
            }
        }

        let weights = mesh.weights_of(vertex);
        out[i].position = if let [single] = weights {
            joints[single.joint as usize].transform_point(&single.offset)
        } else {
            let mut blended = Vector3::zeros();
            for w in weights {
                let p = joints[w.joint as usize].transform_point(&w.offset);
                blended += p.coords * w.weight;
            }
            Point3::from(blended)
        };
    }
}
