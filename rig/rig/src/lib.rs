//! Skinned-mesh pose evaluation for real-time rendering.
//!
//! This umbrella crate re-exports the rig-* crates, providing a unified
//! API for evaluating the pose of an animated skinned mesh and deriving
//! everything a renderer needs to draw it and cast correct stencil
//! shadows: deformed positions, per-vertex tangent bases, and shadow
//! volume geometry.
//!
//! # Quick Start
//!
//! ```no_run
//! use rig::prelude::*;
//!
//! # fn load_from_somewhere() -> (rig::skeleton::Skeleton, Vec<rig::types::AnimationTrack>, Vec<rig::types::SkinnedMesh>) { unimplemented!() }
//! // Assemble a model from loader output; validation and topology
//! // preprocessing happen here.
//! let (skeleton, tracks, meshes) = load_from_somewhere();
//! let mut model = SkinnedModel::from_parts(skeleton, tracks, meshes).unwrap();
//!
//! // Once per frame: evaluate the pose (memoized).
//! let pose = model.evaluate_pose(Some(0), 12.5, None);
//!
//! // Ambient pass: renderable geometry per mesh group.
//! for geometry in model.deformed_geometry(pose).unwrap() {
//!     // submit (geometry.material, geometry.vertices, uvs...) to the renderer
//! }
//!
//! // Per light: extract the shadow volume.
//! let light = Point3::new(0.0, 50.0, 100.0);
//! if model.bounding_box(Some(0), 12.5).intersects_sphere(&light, 200.0) {
//!     let volume = model.shadow_volume(pose, &light).unwrap();
//!     // submit volume.quads and volume.caps with two-sided stencil
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data model: joints, tracks, vertices, triangles
//! - [`skeleton`] - Skeleton validation and world-matrix evaluation
//! - [`topology`] - Load-time preprocessing: geo-dups, seam repair, adjacency
//! - [`deform`] - Skinning, tangent accumulation, the pose cache
//! - [`shadow`] - Stencil shadow-volume extraction
//! - [`model`] - The [`SkinnedModel`](model::SkinnedModel) facade
//!
//! # Feature Flags
//!
//! - `serde` - Serialization for the core data model

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data model: joints, tracks, vertices, triangles.
pub use rig_types as types;

/// Skeleton validation and world-matrix evaluation.
pub use rig_skeleton as skeleton;

/// Load-time preprocessing: geo-dups, seam repair, adjacency.
pub use rig_topology as topology;

/// Skinning, tangent accumulation, the pose cache.
pub use rig_deform as deform;

/// Stencil shadow-volume extraction.
pub use rig_shadow as shadow;

/// The `SkinnedModel` facade.
pub use rig_model as model;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for pose evaluation.
pub mod prelude {
    pub use rig_model::{MeshGeometry, PoseHandle, SkinnedModel};
    pub use rig_shadow::ShadowVolume;
    pub use rig_skeleton::{normalize_frame, Skeleton, SuperPose};
    pub use rig_types::{
        Aabb, AnimationTrack, DeformedVertex, Joint, JointTransform, Material, Point3,
        SkinnedMesh, SkinnedVertex, Vector3,
    };
}

// =============================================================================
// Tests
// =============================================================================
