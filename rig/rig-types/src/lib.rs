//! Core data model for RigForge.
//!
//! This crate provides the foundational types for skinned-mesh pose
//! evaluation:
//!
//! - [`Joint`] / [`JointTransform`] - The skeletal hierarchy
//! - [`AnimationTrack`] / [`Frame`] - Keyframed animation data
//! - [`SkinnedVertex`] / [`VertexWeight`] - Skinning data
//! - [`MeshTriangle`] / [`EdgeNeighbor`] - Triangle topology and adjacency
//! - [`SkinnedMesh`] - A mesh group with its material
//! - [`DeformedVertex`] - Per-pose output of the deformation pipeline
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Layer 0 Crate
//!
//! This crate has no renderer or engine dependencies. It can be used in
//! CLI tools, servers, converters, and other engines.
//!
//! # Units and Precision
//!
//! All coordinates are `f64`. The library is unit-agnostic.
//!
//! # Coordinate System and Winding
//!
//! Uses a right-handed coordinate system. Triangle faces are wound
//! **clockwise when viewed from outside**; the per-triangle geometric
//! normal is `(v2 - v0) × (v1 - v0)`, which points outward under that
//! convention.
//!
//! # Immutability
//!
//! Everything except [`DeformedVertex`] is created at mesh-load time and
//! never mutated afterward. The one exception is the load-time
//! seam-splitting pass, which appends vertices and rewrites triangle
//! indices before the mesh is first drawn.

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod animation;
mod bounds;
mod deformed;
mod joint;
mod material;
mod mesh;
mod triangle;
mod vertex;

pub use animation::{AnimationTrack, Frame, FramePose, JointChannels};
pub use bounds::Aabb;
pub use deformed::DeformedVertex;
pub use joint::{Joint, JointTransform};
pub use material::Material;
pub use mesh::SkinnedMesh;
pub use triangle::{EdgeNeighbor, MeshTriangle};
pub use vertex::{GeoDupSet, SkinnedVertex, VertexWeight};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector2, Vector3, Vector4};
