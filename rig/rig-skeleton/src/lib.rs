//! Skeleton evaluation for RigForge.
//!
//! This crate turns a (sequence, frame) request into one world matrix per
//! joint:
//!
//! - Skeleton and animation-track validation (load-time)
//! - Frame normalization for looping and play-once sequences
//! - Keyframe interpolation (lerp for position/scale, slerp for rotation)
//! - Hierarchy composition as a single forward scan
//! - Verbatim joint substitution from a "super" skeleton, so an attached
//!   model can be driven by its carrier's bones
//!
//! Out-of-range sequences and unusable tracks degrade to the bind pose;
//! they never fail a draw.
//!
//! # Example
//!
//! ```
//! use rig_skeleton::{evaluate_pose, Skeleton};
//! use rig_types::{Joint, JointTransform, Matrix4, Vector3};
//!
//! let skeleton = Skeleton::new(vec![
//!     Joint::root("root", JointTransform::identity()),
//!     Joint::child("tip", 0, JointTransform::from_position(Vector3::new(0.0, 0.0, 10.0))),
//! ]);
//! skeleton.validate().unwrap();
//!
//! let mut joints: Vec<Matrix4<f64>> = Vec::new();
//! evaluate_pose(&skeleton, &[], None, 0.0, None, &mut joints);
//!
//! assert_eq!(joints.len(), 2);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod frame;
mod pose;
mod skeleton;

pub use error::{SkeletonError, SkeletonResult};
pub use frame::{normalize_frame, LAST_FRAME_MARGIN};
pub use pose::{evaluate_pose, SuperPose};
pub use skeleton::Skeleton;
