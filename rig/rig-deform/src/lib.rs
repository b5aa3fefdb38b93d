//! Pose deformation for RigForge.
//!
//! Everything that happens between "here are the joint matrices" and
//! "here are renderable vertex buffers":
//!
//! - Skinning: weighted blend of joint matrices per vertex, with geo-dup
//!   results copied instead of recomputed
//! - Per-triangle geometric normals for the current pose
//! - Angle-weighted tangent-space accumulation, polarity-aware across
//!   mirror seams
//! - The pose cache: one coarse (sequence, frame) key memoizes the whole
//!   pipeline so an ambient pass plus N light passes pay for one
//!   evaluation
//!
//! The cache is deliberately all-or-nothing: any key difference recomputes
//! every buffer. Per-component invalidation looks cheaper on paper and is
//! a reliable source of stale-buffer bugs when different consumers pull
//! different subsets in different orders.

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cache;
mod skin;
mod tangent;

pub use cache::{MeshBuffers, PoseCache, PoseKey};
pub use skin::deform_vertices;
pub use tangent::accumulate_tangents;
