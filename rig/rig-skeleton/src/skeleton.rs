//! The immutable skeleton definition and its validation.

use crate::error::{SkeletonError, SkeletonResult};
use rig_types::{AnimationTrack, Joint};

/// The joint hierarchy of a model.
///
/// Joints are stored in a flat array with integer parent indices, ordered
/// parent-before-child. This makes pose evaluation a single forward scan:
/// by the time a joint is visited, its parent's world matrix is already
/// computed.
#[derive(Debug, Clone)]
pub struct Skeleton {
    /// Joints in parent-before-child order.
    pub joints: Vec<Joint>,
}

impl Skeleton {
    /// Create a skeleton from a joint array.
    ///
    /// Call [`Skeleton::validate`] before using it; construction itself
    /// never fails.
    #[inline]
    #[must_use]
    pub const fn new(joints: Vec<Joint>) -> Self {
        Self { joints }
    }

    /// Number of joints.
    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Verify the parent-ordering invariant.
    ///
    /// Every joint's parent index must be smaller than its own index and
    /// inside the array. This is checked once at load; evaluation relies
    /// on it unconditionally.
    pub fn validate(&self) -> SkeletonResult<()> {
        for (index, joint) in self.joints.iter().enumerate() {
            if let Some(parent) = joint.parent {
                if parent as usize >= self.joints.len() {
                    return Err(SkeletonError::ParentOutOfBounds {
                        joint: index,
                        parent,
                        joint_count: self.joints.len(),
                    });
                }
                if parent as usize >= index {
                    return Err(SkeletonError::ParentOutOfOrder {
                        joint: index,
                        parent,
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate an animation track against this skeleton.
    ///
    /// Checks the frame rate, that the track has frames, and that every
    /// frame's pose table and the channel table agree with the joint
    /// count and with each other. A failing track is dropped by the
    /// loader; the mesh merely loses one sequence.
    pub fn validate_track(&self, track: &AnimationTrack) -> SkeletonResult<()> {
        if !track.fps.is_finite() || track.fps <= 0.0 {
            return Err(SkeletonError::InvalidFrameRate {
                track: track.name.clone(),
                fps: track.fps,
            });
        }
        if track.frames.is_empty() {
            return Err(SkeletonError::EmptyTrack {
                track: track.name.clone(),
            });
        }
        if track.channels.len() != self.joints.len() {
            return Err(SkeletonError::JointCountMismatch {
                track: track.name.clone(),
                expected: self.joints.len(),
                actual: track.channels.len(),
            });
        }
        for (frame_index, frame) in track.frames.iter().enumerate() {
            if frame.poses.len() != self.joints.len() {
                return Err(SkeletonError::FrameJointMismatch {
                    track: track.name.clone(),
                    frame: frame_index,
                    expected: self.joints.len(),
                    actual: frame.poses.len(),
                });
            }
            for (joint_index, (channels, pose)) in
                track.channels.iter().zip(&frame.poses).enumerate()
            {
                if !channels.matches(pose) {
                    return Err(SkeletonError::ChannelMismatch {
                        track: track.name.clone(),
                        frame: frame_index,
                        joint: joint_index,
                    });
                }
            }
        }
        Ok(())
    }

    /// Map this skeleton's joints onto another skeleton by name.
    ///
    /// Used to drive an attached model from a carrier: entry `j` is the
    /// carrier's joint index whose name matches joint `j` here, or `None`
    /// when the carrier has no such joint.
    #[must_use]
    pub fn joint_map_to(&self, carrier: &Self) -> Vec<Option<u32>> {
        self.joints
            .iter()
            .map(|joint| {
                carrier
                    .joints
                    .iter()
                    .position(|other| other.name == joint.name)
                    .map(|index| index as u32)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig_types::{Aabb, Frame, FramePose, JointChannels, JointTransform, Vector3};

    fn two_joint_skeleton() -> Skeleton {
        Skeleton::new(vec![
            Joint::root("root", JointTransform::identity()),
            Joint::child(
                "tip",
                0,
                JointTransform::from_position(Vector3::new(0.0, 0.0, 10.0)),
            ),
        ])
    }

    #[test]
    fn valid_skeleton() {
        assert!(two_joint_skeleton().validate().is_ok());
    }

    #[test]
    fn parent_after_child_is_rejected() {
        let skeleton = Skeleton::new(vec![
            Joint::child("a", 1, JointTransform::identity()),
            Joint::root("b", JointTransform::identity()),
        ]);
        assert!(matches!(
            skeleton.validate(),
            Err(SkeletonError::ParentOutOfOrder { joint: 0, parent: 1 })
        ));
    }

    #[test]
    fn parent_out_of_bounds_is_rejected() {
        let skeleton = Skeleton::new(vec![
            Joint::root("a", JointTransform::identity()),
            Joint::child("b", 7, JointTransform::identity()),
        ]);
        assert!(matches!(
            skeleton.validate(),
            Err(SkeletonError::ParentOutOfBounds { parent: 7, .. })
        ));
    }

    #[test]
    fn self_parent_is_rejected() {
        let skeleton = Skeleton::new(vec![Joint::child("a", 0, JointTransform::identity())]);
        assert!(skeleton.validate().is_err());
    }

    fn frame(poses: Vec<FramePose>) -> Frame {
        Frame::new(poses, Aabb::empty())
    }

    #[test]
    fn track_with_wrong_joint_count_is_rejected() {
        let skeleton = two_joint_skeleton();
        let track = AnimationTrack::new(
            "bad",
            24.0,
            vec![JointChannels::NONE],
            vec![frame(vec![FramePose::EMPTY]); 2],
        );
        assert!(matches!(
            skeleton.validate_track(&track),
            Err(SkeletonError::JointCountMismatch { .. })
        ));
    }

    #[test]
    fn track_with_channel_disagreement_is_rejected() {
        let skeleton = two_joint_skeleton();
        // Channels claim rotation is animated but the frame stores none.
        let channels = vec![
            JointChannels::NONE,
            JointChannels {
                rotation: true,
                ..JointChannels::NONE
            },
        ];
        let track = AnimationTrack::new(
            "bad",
            24.0,
            channels,
            vec![frame(vec![FramePose::EMPTY, FramePose::EMPTY]); 2],
        );
        assert!(matches!(
            skeleton.validate_track(&track),
            Err(SkeletonError::ChannelMismatch { frame: 0, joint: 1, .. })
        ));
    }

    #[test]
    fn track_with_bad_fps_is_rejected() {
        let skeleton = two_joint_skeleton();
        let track = AnimationTrack::new(
            "bad",
            0.0,
            vec![JointChannels::NONE; 2],
            vec![frame(vec![FramePose::EMPTY; 2]); 2],
        );
        assert!(matches!(
            skeleton.validate_track(&track),
            Err(SkeletonError::InvalidFrameRate { .. })
        ));
    }

    #[test]
    fn joint_map_matches_by_name() {
        let attached = Skeleton::new(vec![
            Joint::root("origin", JointTransform::identity()),
            Joint::child("hand_r", 0, JointTransform::identity()),
        ]);
        let carrier = Skeleton::new(vec![
            Joint::root("pelvis", JointTransform::identity()),
            Joint::child("spine", 0, JointTransform::identity()),
            Joint::child("hand_r", 1, JointTransform::identity()),
        ]);

        let map = attached.joint_map_to(&carrier);
        assert_eq!(map, vec![None, Some(2)]);
    }
}
