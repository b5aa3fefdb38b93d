//! Per-pose deformation output.

use nalgebra::{Point3, Vector3};

/// A vertex after skinning and tangent-space accumulation.
///
/// These buffers are pose-local: they are overwritten in place on every
/// pose-cache miss and never serialized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeformedVertex {
    /// Deformed position in model space.
    pub position: Point3<f64>,
    /// Unit normal.
    pub normal: Vector3<f64>,
    /// Unit tangent (U direction of the texture mapping).
    pub tangent: Vector3<f64>,
    /// Unit binormal (V direction of the texture mapping).
    pub binormal: Vector3<f64>,
}

impl DeformedVertex {
    /// An all-zero vertex, used to initialize pose buffers.
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            position: Point3::origin(),
            normal: Vector3::zeros(),
            tangent: Vector3::zeros(),
            binormal: Vector3::zeros(),
        }
    }
}

impl Default for DeformedVertex {
    fn default() -> Self {
        Self::zeroed()
    }
}
