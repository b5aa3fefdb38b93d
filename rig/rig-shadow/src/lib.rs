//! Stencil shadow-volume extraction for RigForge.
//!
//! Given a light position and a deformed pose, classifies every triangle
//! as front- or back-facing with respect to the light, walks the
//! adjacency table for silhouette edges, and emits the geometry of a
//! shadow volume:
//!
//! - One extruded quad per silhouette edge (the volume's side walls)
//! - A near cap (the front-facing triangles as-is) and a far cap (the
//!   same triangles extruded to infinity with reversed winding)
//!
//! Far vertices are homogeneous directions (`w = 0`) along the
//! light-to-vertex ray, the projective-geometry trick that lets a
//! renderer draw an infinite volume with a finite vertex buffer. The
//! renderer submits both buffers with two-sided stencil
//! increment/decrement.
//!
//! Extraction is cheap relative to skinning and depends on the light, so
//! nothing here is cached; each light pass re-extracts from the cached
//! pose buffers.

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod silhouette;

pub use silhouette::{classify_facing, extract_shadow_volume, ShadowVolume};
