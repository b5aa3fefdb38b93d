//! Angle-weighted tangent-space accumulation.

use nalgebra::Vector3;
use rig_types::{DeformedVertex, SkinnedMesh};

/// UV determinants below this are treated as degenerate: the triangle
/// contributes a normal but no tangent or binormal.
const UV_DEGENERATE_EPSILON: f64 = 1.0e-12;

/// Compute per-triangle normals and per-vertex tangent bases for the
/// current pose.
///
/// For each triangle the edge vectors `E01`, `E02` in deformed space and
/// the matching UV deltas give the geometric normal `E02 × E01`
/// (clockwise source winding) and, from the 2x2 UV system, a tangent and
/// binormal whose handedness the determinant sign corrects. Each vertex
/// accumulates these weighted by the angle it subtends inside the
/// triangle, which keeps large triangles from dominating the average.
///
/// Contributions are also distributed to every geo-dup of each vertex so
/// a UV seam shades as connected surface; the tangent (not normal or
/// binormal) is negated when the dup's polarity differs from the
/// triangle's, undoing the mirror.
///
/// `triangle_normals` receives one unit normal per triangle (zero for
/// degenerate triangles); `deformed` must already hold the skinned
/// positions. Accumulations that cancel to zero fall back to a fixed
/// axis rather than a NaN.
pub fn accumulate_tangents(
    mesh: &SkinnedMesh,
    deformed: &mut [DeformedVertex],
    triangle_normals: &mut Vec<Vector3<f64>>,
) {
    for v in deformed.iter_mut() {
        v.normal = Vector3::zeros();
        v.tangent = Vector3::zeros();
        v.binormal = Vector3::zeros();
    }

    triangle_normals.clear();
    triangle_normals.reserve(mesh.triangles.len());

    for triangle in &mesh.triangles {
        let [i0, i1, i2] = triangle.vertices.map(|v| v as usize);

        let p0 = deformed[i0].position;
        let e01 = deformed[i1].position - p0;
        let e02 = deformed[i2].position - p0;

        let normal = e02
            .cross(&e01)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros);
        triangle_normals.push(normal);

        let uv0 = mesh.vertices[i0].uv;
        let uv01 = mesh.vertices[i1].uv - uv0;
        let uv02 = mesh.vertices[i2].uv - uv0;
        let det = uv01.x * uv02.y - uv01.y * uv02.x;

        let (tangent, binormal) = if det.abs() < UV_DEGENERATE_EPSILON {
            (Vector3::zeros(), Vector3::zeros())
        } else {
            // Solving [e01 e02] = [tangent binormal] · [uv01 uv02] for
            // the tangent frame; dividing by the signed determinant
            // keeps the handedness flip of mirrored UVs.
            let inv = 1.0 / det;
            let tangent = (e01 * uv02.y - e02 * uv01.y) * inv;
            let binormal = (e02 * uv01.x - e01 * uv02.x) * inv;
            (
                tangent.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros),
                binormal.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros),
            )
        };

        let angles = corner_angles(&e01, &e02, &(deformed[i2].position - deformed[i1].position));

        for (corner, angle) in triangle.vertices.iter().zip(angles) {
            let corner = *corner as usize;
            contribute(&mut deformed[corner], angle, normal, tangent, binormal);

            // Geo-dups shade as the same surface point; a dup on the
            // other side of a mirror seam takes a flipped tangent.
            for d in 0..mesh.vertices[corner].geo_dups.len() {
                let dup = mesh.vertices[corner].geo_dups[d] as usize;
                let flip = mesh.vertices[dup].polarity != triangle.polarity;
                let dup_tangent = if flip { -tangent } else { tangent };
                contribute(&mut deformed[dup], angle, normal, dup_tangent, binormal);
            }
        }
    }

    for v in deformed.iter_mut() {
        v.normal = normalize_or(v.normal, Vector3::z());
        v.tangent = normalize_or(v.tangent, Vector3::x());
        v.binormal = normalize_or(v.binormal, Vector3::y());
    }
}

/// The interior angle at each corner of a triangle.
///
/// The third angle comes from the angle sum rather than a third `acos`;
/// for a degenerate sliver that difference can dip below zero, so it is
/// clamped rather than trusted.
fn corner_angles(e01: &Vector3<f64>, e02: &Vector3<f64>, e12: &Vector3<f64>) -> [f64; 3] {
    let d01 = e01.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
    let d02 = e02.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
    let d12 = e12.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);

    let w0 = d01.dot(&d02).clamp(-1.0, 1.0).acos();
    let w1 = (-d01).dot(&d12).clamp(-1.0, 1.0).acos();
    let w2 = (std::f64::consts::PI - w0 - w1).max(0.0);
    [w0, w1, w2]
}

#[inline]
fn contribute(
    v: &mut DeformedVertex,
    angle: f64,
    normal: Vector3<f64>,
    tangent: Vector3<f64>,
    binormal: Vector3<f64>,
) {
    v.normal += normal * angle;
    v.tangent += tangent * angle;
    v.binormal += binormal * angle;
}

#[inline]
fn normalize_or(v: Vector3<f64>, fallback: Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(1.0e-12).unwrap_or(fallback)
}
