//! Silhouette classification and volume assembly.

use nalgebra::{Point3, Vector3, Vector4};
use rig_types::{DeformedVertex, MeshTriangle};

/// A transient shadow-volume mesh for one light.
///
/// Positions are homogeneous: near vertices have `w = 1`, far vertices
/// are directions with `w = 0`.
#[derive(Debug, Clone, Default)]
pub struct ShadowVolume {
    /// Extruded side walls, one quad per silhouette edge. Vertices run
    /// around the quad: near edge start, near edge end, far edge end,
    /// far edge start.
    pub quads: Vec<[Vector4<f64>; 4]>,
    /// Near and far capping triangles.
    pub caps: Vec<[Vector4<f64>; 3]>,
}

impl ShadowVolume {
    /// Number of silhouette quads.
    #[inline]
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Number of capping triangles.
    #[inline]
    #[must_use]
    pub fn cap_count(&self) -> usize {
        self.caps.len()
    }

    /// Check whether the volume casts anything at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty() && self.caps.is_empty()
    }

    /// Append another volume (a model aggregates one per mesh).
    pub fn merge(&mut self, other: Self) {
        self.quads.extend(other.quads);
        self.caps.extend(other.caps);
    }
}

/// Classify every triangle against a light position.
///
/// A triangle faces the light when the light lies on the positive side
/// of its plane: `dot(light - v0, normal) > 0`. Geometry whose material
/// casts no shadow is forced back-facing, which removes it from
/// silhouette and cap emission without a special case downstream.
#[must_use]
pub fn classify_facing(
    light: &Point3<f64>,
    triangles: &[MeshTriangle],
    deformed: &[DeformedVertex],
    triangle_normals: &[Vector3<f64>],
    casts_shadow: bool,
) -> Vec<bool> {
    if !casts_shadow {
        return vec![false; triangles.len()];
    }
    triangles
        .iter()
        .zip(triangle_normals)
        .map(|(triangle, normal)| {
            let v0 = deformed[triangle.vertices[0] as usize].position;
            (light - v0).dot(normal) > 0.0
        })
        .collect()
}

/// Extract the shadow volume of one mesh for one light.
///
/// A front-facing triangle's edge is a silhouette edge when its neighbor
/// is open, non-manifold, or back-facing. Each such edge becomes a side
/// quad; each front-facing triangle becomes a near cap and a reversed,
/// extruded far cap.
#[must_use]
pub fn extract_shadow_volume(
    light: &Point3<f64>,
    triangles: &[MeshTriangle],
    deformed: &[DeformedVertex],
    triangle_normals: &[Vector3<f64>],
    casts_shadow: bool,
) -> ShadowVolume {
    let facing = classify_facing(light, triangles, deformed, triangle_normals, casts_shadow);
    let mut volume = ShadowVolume::default();

    for (t, triangle) in triangles.iter().enumerate() {
        if !facing[t] {
            continue;
        }

        for k in 0..3 {
            let neighbor = triangle.neighbors[k];
            let silhouette = match neighbor.triangle() {
                Some(other) => !facing[other as usize],
                // Open or non-manifold: nothing to trace across.
                None => true,
            };
            if !silhouette {
                continue;
            }

            let (a, b) = triangle.edge(k);
            let pa = deformed[a as usize].position;
            let pb = deformed[b as usize].position;
            volume.quads.push([
                near(&pa),
                near(&pb),
                far(light, &pb),
                far(light, &pa),
            ]);
        }

        let [p0, p1, p2] = triangle
            .vertices
            .map(|v| deformed[v as usize].position);
        // Near cap keeps the triangle's winding; the far cap reverses it
        // so both faces point out of the closed volume.
        volume.caps.push([near(&p0), near(&p1), near(&p2)]);
        volume
            .caps
            .push([far(light, &p2), far(light, &p1), far(light, &p0)]);
    }

    volume
}

/// A near vertex: the point itself.
#[inline]
fn near(p: &Point3<f64>) -> Vector4<f64> {
    Vector4::new(p.x, p.y, p.z, 1.0)
}

/// A far vertex: the light-to-vertex direction projected to infinity.
#[inline]
fn far(light: &Point3<f64>, p: &Point3<f64>) -> Vector4<f64> {
    let d = p - light;
    Vector4::new(d.x, d.y, d.z, 0.0)
}
