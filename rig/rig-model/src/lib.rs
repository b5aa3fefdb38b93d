//! The RigForge model facade.
//!
//! Ties the pipeline crates together behind the four calls a renderer
//! needs:
//!
//! - [`SkinnedModel::evaluate_pose`] - memoized pose evaluation
//! - [`SkinnedModel::deformed_geometry`] - per-mesh vertex buffers
//! - [`SkinnedModel::shadow_volume`] - silhouette + cap buffers per light
//! - [`SkinnedModel::bounding_box`] - early rejection without pose work
//!
//! plus the load pipeline: skeleton validation, per-track validation
//! with graceful degradation, and one-shot topology preprocessing.
//!
//! # Example
//!
//! ```
//! use rig_model::SkinnedModel;
//! use rig_skeleton::Skeleton;
//! use rig_types::{Joint, JointTransform, Material, MeshTriangle, Point3,
//!                 SkinnedMesh, SkinnedVertex, Vector2, VertexWeight};
//!
//! let skeleton = Skeleton::new(vec![Joint::root("root", JointTransform::identity())]);
//! let mut mesh = SkinnedMesh::new(Material::new("skin"));
//! for k in 0..3u32 {
//!     mesh.weights.push(VertexWeight::new(0, 1.0, Point3::new(k as f64, 0.0, 0.0)));
//!     mesh.vertices.push(SkinnedVertex::new(Vector2::new(k as f64, 0.0), k, 1));
//! }
//! mesh.triangles.push(MeshTriangle::new([0, 1, 2]));
//!
//! let mut model = SkinnedModel::from_parts(skeleton, vec![], vec![mesh]).unwrap();
//! let pose = model.evaluate_pose(None, 0.0, None);
//! let geometry = model.deformed_geometry(pose).unwrap();
//! assert_eq!(geometry[0].vertex_count(), 3);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod geometry;
mod model;

pub use error::{ModelError, ModelResult};
pub use geometry::MeshGeometry;
pub use model::{PoseHandle, SkinnedModel};
