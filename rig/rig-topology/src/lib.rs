//! Load-time topology preprocessing for RigForge.
//!
//! Runs once when a mesh is loaded and never again:
//!
//! - Structural validation (weight ranges, joint and vertex indices)
//! - Geo-dup linking: vertices with identical weight data are tied
//!   together so they always deform identically
//! - UV-polarity stamping and seam repair: vertices shared by triangles
//!   of opposite UV winding are split, so no vertex ever carries two
//!   incompatible tangent-space orientations
//! - Triangle adjacency, with geo-dups treated as topologically
//!   identical and non-manifold edges flagged on every triangle that
//!   shares them
//!
//! The result is immutable for the lifetime of the mesh and is consumed
//! by the deformation and shadow crates.
//!
//! # Example
//!
//! ```
//! use rig_topology::preprocess;
//! use rig_types::{Material, MeshTriangle, Point3, SkinnedMesh, SkinnedVertex,
//!                 Vector2, VertexWeight};
//!
//! let mut mesh = SkinnedMesh::new(Material::new("skin"));
//! for k in 0..3u32 {
//!     mesh.weights.push(VertexWeight::new(0, 1.0, Point3::new(k as f64, 0.0, 0.0)));
//!     mesh.vertices.push(SkinnedVertex::new(Vector2::new(k as f64, 0.0), k, 1));
//! }
//! mesh.triangles.push(MeshTriangle::new([0, 1, 2]));
//!
//! let report = preprocess(&mut mesh, 1).unwrap();
//! assert_eq!(report.open_edges, 3);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod error;
mod geodup;
mod polarity;
mod preprocess;

pub use adjacency::build_adjacency;
pub use error::{TopologyError, TopologyResult};
pub use geodup::link_geo_dups;
pub use polarity::{split_polarity_seams, uv_polarity};
pub use preprocess::{preprocess, validate_mesh, TopologyReport};
