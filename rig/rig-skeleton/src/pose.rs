//! Pose evaluation: (sequence, frame) to per-joint world matrices.

use crate::frame::normalize_frame;
use crate::skeleton::Skeleton;
use nalgebra::Matrix4;
use rig_types::{AnimationTrack, JointTransform};
use tracing::debug;

/// An already-evaluated pose of a different model's skeleton, plus the
/// joint mapping into it.
///
/// When an attached model (a carried weapon, a rider) is evaluated, any
/// of its joints that maps onto the carrier copies the carrier's world
/// matrix verbatim instead of being computed from its own animation.
#[derive(Debug, Clone, Copy)]
pub struct SuperPose<'a> {
    /// World matrices of the carrier skeleton's joints.
    pub matrices: &'a [Matrix4<f64>],
    /// For each joint of the attached skeleton, the carrier joint it
    /// binds to, or `None` when unmatched. Built with
    /// [`Skeleton::joint_map_to`].
    pub joint_map: &'a [Option<u32>],
}

impl<'a> SuperPose<'a> {
    /// The substituted matrix for an attached joint, if it is bound.
    #[inline]
    #[must_use]
    fn matrix_for(&self, joint: usize) -> Option<&'a Matrix4<f64>> {
        let mapped = (*self.joint_map.get(joint)?)?;
        self.matrices.get(mapped as usize)
    }
}

/// Evaluate one pose of a skeleton into per-joint world matrices.
///
/// `sequence` selects an animation track; `None`, an out-of-range index,
/// or a track that cannot be sampled (bad rate, fewer than two frames)
/// all fall back to the bind pose - range problems are recoverable by
/// policy, not errors. `frame` is normalized by wrapping modulo the
/// frame count before the bracketing keyframes are chosen; play-once
/// callers clamp with [`normalize_frame`][crate::normalize_frame] first,
/// which wrapping then leaves untouched.
///
/// Position and scale interpolate linearly between the bracketing
/// frames; rotation interpolates spherically. Joints bound through
/// `super_pose` copy the carrier's matrix verbatim and skip sampling
/// entirely.
///
/// `out` is cleared and refilled; buffers are reused across calls.
pub fn evaluate_pose(
    skeleton: &Skeleton,
    tracks: &[AnimationTrack],
    sequence: Option<usize>,
    frame: f64,
    super_pose: Option<&SuperPose<'_>>,
    out: &mut Vec<Matrix4<f64>>,
) {
    let track = sequence
        .and_then(|index| tracks.get(index))
        .filter(|track| track.is_animatable());
    if sequence.is_some() && track.is_none() {
        debug!(?sequence, "sequence unavailable, substituting bind pose");
    }

    let (f0, f1, fraction) = match track {
        Some(track) => bracket(frame, track.frame_count()),
        None => (0, 0, 0.0),
    };

    out.clear();
    out.reserve(skeleton.joints.len());

    for (index, joint) in skeleton.joints.iter().enumerate() {
        if let Some(matrix) = super_pose.and_then(|sp| sp.matrix_for(index)) {
            out.push(*matrix);
            continue;
        }

        let local = match track {
            Some(track) => sample_joint(track, index, f0, f1, fraction, &joint.base),
            None => joint.base,
        };

        let local = local.to_matrix();
        let world = match joint.parent {
            Some(parent) => out[parent as usize] * local,
            None => local,
        };
        out.push(world);
    }
}

/// Find the bracketing integer frames and the interpolation fraction.
fn bracket(frame: f64, frame_count: usize) -> (usize, usize, f64) {
    let frame = normalize_frame(frame, frame_count, true);
    let f0 = frame.floor() as usize;
    let f1 = (f0 + 1) % frame_count;
    (f0, f1, frame - f0 as f64)
}

/// Sample one joint's local transform from a track.
///
/// Components not animated by the track fall back to the joint's base
/// value on both sides of the interpolation.
fn sample_joint(
    track: &AnimationTrack,
    joint: usize,
    f0: usize,
    f1: usize,
    fraction: f64,
    base: &JointTransform,
) -> JointTransform {
    let p0 = &track.frames[f0].poses[joint];
    let p1 = &track.frames[f1].poses[joint];

    let position = p0
        .position
        .unwrap_or(base.position)
        .lerp(&p1.position.unwrap_or(base.position), fraction);
    let scale = p0
        .scale
        .unwrap_or(base.scale)
        .lerp(&p1.scale.unwrap_or(base.scale), fraction);

    let q0 = p0.rotation.unwrap_or(base.rotation);
    let q1 = p1.rotation.unwrap_or(base.rotation);
    // Antipodal quaternions have no unique interpolation path; snap to
    // the nearer endpoint instead of panicking.
    let rotation = q0
        .try_slerp(&q1, fraction, 1.0e-9)
        .unwrap_or(if fraction < 0.5 { q0 } else { q1 });

    JointTransform {
        position,
        rotation,
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig_types::{Aabb, Frame, FramePose, Joint, JointChannels, UnitQuaternion, Vector3};
    use std::f64::consts::FRAC_PI_2;

    fn skeleton() -> Skeleton {
        Skeleton::new(vec![
            Joint::root("root", JointTransform::identity()),
            Joint::child(
                "tip",
                0,
                JointTransform::from_position(Vector3::new(0.0, 0.0, 10.0)),
            ),
        ])
    }

    fn rotation_track() -> AnimationTrack {
        // Two frames: identity, then the tip rotated 90 degrees about x.
        let channels = vec![
            JointChannels::NONE,
            JointChannels {
                rotation: true,
                ..JointChannels::NONE
            },
        ];
        let frames = vec![
            Frame::new(
                vec![
                    FramePose::EMPTY,
                    FramePose::with_rotation(UnitQuaternion::identity()),
                ],
                Aabb::empty(),
            ),
            Frame::new(
                vec![
                    FramePose::EMPTY,
                    FramePose::with_rotation(UnitQuaternion::from_axis_angle(
                        &Vector3::x_axis(),
                        FRAC_PI_2,
                    )),
                ],
                Aabb::empty(),
            ),
        ];
        AnimationTrack::new("swing", 24.0, channels, frames)
    }

    #[test]
    fn bind_pose_composes_hierarchy() {
        let skeleton = skeleton();
        let mut joints = Vec::new();
        evaluate_pose(&skeleton, &[], None, 0.0, None, &mut joints);

        assert_eq!(joints.len(), 2);
        let tip = joints[1].transform_point(&rig_types::Point3::origin());
        assert!((tip.z - 10.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_sequence_is_bind_pose() {
        let skeleton = skeleton();
        let tracks = vec![rotation_track()];

        let mut bind = Vec::new();
        evaluate_pose(&skeleton, &tracks, None, 0.0, None, &mut bind);

        let mut bad = Vec::new();
        evaluate_pose(&skeleton, &tracks, Some(5), 0.0, None, &mut bad);

        assert_eq!(bind, bad);
    }

    #[test]
    fn single_frame_track_is_bind_pose() {
        let skeleton = skeleton();
        let mut track = rotation_track();
        track.frames.truncate(1);
        let tracks = vec![track];

        let mut bind = Vec::new();
        evaluate_pose(&skeleton, &[], None, 0.0, None, &mut bind);

        let mut sampled = Vec::new();
        evaluate_pose(&skeleton, &tracks, Some(0), 0.0, None, &mut sampled);

        assert_eq!(bind, sampled);
    }

    #[test]
    fn fractional_frame_interpolates_rotation() {
        use approx::assert_relative_eq;

        let skeleton = skeleton();
        let tracks = vec![rotation_track()];

        let mut joints = Vec::new();
        evaluate_pose(&skeleton, &tracks, Some(0), 0.5, None, &mut joints);

        // Halfway between identity and 90 degrees: 45 degrees about x.
        let p = joints[1].transform_point(&rig_types::Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p.y, -(FRAC_PI_2 / 2.0).sin(), epsilon = 1e-9);
        assert_relative_eq!(p.z, 10.0 + (FRAC_PI_2 / 2.0).cos(), epsilon = 1e-9);
    }

    #[test]
    fn frame_wraps_modulo_count() {
        let skeleton = skeleton();
        let tracks = vec![rotation_track()];

        let mut a = Vec::new();
        evaluate_pose(&skeleton, &tracks, Some(0), 0.25, None, &mut a);
        let mut b = Vec::new();
        evaluate_pose(&skeleton, &tracks, Some(0), 2.25, None, &mut b);

        assert_eq!(a, b);
    }

    #[test]
    fn super_pose_substitutes_verbatim() {
        let skeleton = skeleton();
        let carrier = Matrix4::new_translation(&Vector3::new(5.0, 0.0, 0.0));
        let matrices = vec![carrier];
        let joint_map = vec![None, Some(0)];
        let super_pose = SuperPose {
            matrices: &matrices,
            joint_map: &joint_map,
        };

        let mut joints = Vec::new();
        evaluate_pose(&skeleton, &[], None, 0.0, Some(&super_pose), &mut joints);

        // The tip ignores its own hierarchy and takes the carrier matrix.
        assert_eq!(joints[1], carrier);
        assert_eq!(joints[0], Matrix4::identity());
    }
}
