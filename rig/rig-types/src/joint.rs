//! Skeletal joints and their local transforms.

use nalgebra::{Matrix4, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A local translation/rotation/scale triple.
///
/// This is the unit of skeletal animation: every joint carries one as its
/// bind-time base value, and animation frames override individual
/// components of it.
///
/// # Example
///
/// ```
/// use rig_types::JointTransform;
///
/// let t = JointTransform::identity();
/// assert_eq!(t.to_matrix(), rig_types::Matrix4::identity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointTransform {
    /// Translation relative to the parent joint.
    pub position: Vector3<f64>,
    /// Rotation relative to the parent joint.
    pub rotation: UnitQuaternion<f64>,
    /// Per-axis scale relative to the parent joint.
    pub scale: Vector3<f64>,
}

impl JointTransform {
    /// Create a transform from its three components.
    #[inline]
    #[must_use]
    pub const fn new(
        position: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
        scale: Vector3<f64>,
    ) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// The identity transform (zero translation, identity rotation, unit scale).
    #[inline]
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Create a transform that only translates.
    #[inline]
    #[must_use]
    pub fn from_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Compose the components into a homogeneous matrix.
    ///
    /// The composition order is scale, then rotation, then translation,
    /// so the matrix maps joint-local points into parent space.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }
}

impl Default for JointTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A joint (bone) in the skeletal hierarchy.
///
/// Joints live in a flat array owned by the skeleton. The hierarchy is
/// expressed through `parent` indices rather than a pointer tree, and the
/// array is ordered so that **parents always precede children** - a
/// load-time invariant that lets pose evaluation run as a single forward
/// scan over the array.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Joint {
    /// Joint name, used to bind to a carrying model's skeleton.
    pub name: String,
    /// Index of the parent joint, or `None` for the root.
    ///
    /// Invariant: `parent < own index`.
    pub parent: Option<u32>,
    /// Bind-time local transform; animation frames override its components.
    pub base: JointTransform,
}

impl Joint {
    /// Create a root joint (no parent).
    #[must_use]
    pub fn root(name: impl Into<String>, base: JointTransform) -> Self {
        Self {
            name: name.into(),
            parent: None,
            base,
        }
    }

    /// Create a child joint.
    #[must_use]
    pub fn child(name: impl Into<String>, parent: u32, base: JointTransform) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            base,
        }
    }

    /// Check if this is a root joint.
    #[inline]
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
