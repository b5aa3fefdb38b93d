//! Keyframed animation tracks.
//!
//! A track stores, per joint, only the transform components that actually
//! vary over the sequence; components that are not animated fall back to
//! the joint's base value at sampling time. Tracks are immutable once
//! loaded.

use crate::Aabb;
use nalgebra::{UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which transform components a track animates for one joint.
///
/// Channels that are off never appear in the track's frames for that
/// joint; the sampler substitutes the joint's base component instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointChannels {
    /// Position is animated.
    pub position: bool,
    /// Rotation is animated.
    pub rotation: bool,
    /// Scale is animated.
    pub scale: bool,
}

impl JointChannels {
    /// No channels animated.
    pub const NONE: Self = Self {
        position: false,
        rotation: false,
        scale: false,
    };

    /// All channels animated.
    pub const ALL: Self = Self {
        position: true,
        rotation: true,
        scale: true,
    };

    /// Check whether any channel is animated.
    #[inline]
    #[must_use]
    pub const fn any(&self) -> bool {
        self.position || self.rotation || self.scale
    }

    /// Check whether a frame pose stores exactly the channels flagged here.
    #[inline]
    #[must_use]
    pub const fn matches(&self, pose: &FramePose) -> bool {
        self.position == pose.position.is_some()
            && self.rotation == pose.rotation.is_some()
            && self.scale == pose.scale.is_some()
    }
}

/// The animated components of one joint in one frame.
///
/// `None` components fall back to the joint's base value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FramePose {
    /// Animated position, if the position channel is on.
    pub position: Option<Vector3<f64>>,
    /// Animated rotation, if the rotation channel is on.
    pub rotation: Option<UnitQuaternion<f64>>,
    /// Animated scale, if the scale channel is on.
    pub scale: Option<Vector3<f64>>,
}

impl FramePose {
    /// A pose that animates nothing.
    pub const EMPTY: Self = Self {
        position: None,
        rotation: None,
        scale: None,
    };

    /// A pose that animates only position.
    #[inline]
    #[must_use]
    pub const fn with_position(position: Vector3<f64>) -> Self {
        Self {
            position: Some(position),
            rotation: None,
            scale: None,
        }
    }

    /// A pose that animates only rotation.
    #[inline]
    #[must_use]
    pub const fn with_rotation(rotation: UnitQuaternion<f64>) -> Self {
        Self {
            position: None,
            rotation: Some(rotation),
            scale: None,
        }
    }
}

/// One keyframe: a pose per joint plus the frame's bounding box.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Per-joint animated components. Length equals the skeleton's joint
    /// count (a load-time invariant).
    pub poses: Vec<FramePose>,
    /// Bounding box of the mesh in this frame, used for early rejection.
    pub bounds: Aabb,
}

impl Frame {
    /// Create a frame with the given poses and bounds.
    #[inline]
    #[must_use]
    pub const fn new(poses: Vec<FramePose>, bounds: Aabb) -> Self {
        Self { poses, bounds }
    }
}

/// An animation sequence: frame rate, channel flags, and ordered frames.
///
/// # Example
///
/// ```
/// use rig_types::{Aabb, AnimationTrack, Frame, FramePose, JointChannels};
///
/// let track = AnimationTrack::new(
///     "idle",
///     24.0,
///     vec![JointChannels::NONE],
///     vec![Frame::new(vec![FramePose::EMPTY], Aabb::empty()); 2],
/// );
///
/// assert_eq!(track.frame_count(), 2);
/// assert!((track.frame_at(0.5) - 12.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnimationTrack {
    /// Sequence name.
    pub name: String,
    /// Playback rate in frames per second.
    pub fps: f64,
    /// Per-joint animated-channel flags. Length equals the skeleton's
    /// joint count.
    pub channels: Vec<JointChannels>,
    /// Ordered keyframes.
    pub frames: Vec<Frame>,
}

impl AnimationTrack {
    /// Create a track from its parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        fps: f64,
        channels: Vec<JointChannels>,
        frames: Vec<Frame>,
    ) -> Self {
        Self {
            name: name.into(),
            fps,
            channels,
            frames,
        }
    }

    /// Number of keyframes.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Check whether the track can actually be sampled.
    ///
    /// A track needs a sane frame rate and at least two frames to
    /// interpolate between; anything less degrades to the bind pose.
    #[inline]
    #[must_use]
    pub fn is_animatable(&self) -> bool {
        self.fps.is_finite() && self.fps > 0.0 && self.frames.len() >= 2
    }

    /// Convert a time in seconds to a real-valued frame number.
    ///
    /// The result is un-normalized; callers wrap or clamp it depending on
    /// whether the sequence loops.
    #[inline]
    #[must_use]
    pub fn frame_at(&self, seconds: f64) -> f64 {
        seconds * self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_match_pose() {
        let channels = JointChannels {
            rotation: true,
            ..JointChannels::NONE
        };
        assert!(channels.matches(&FramePose::with_rotation(UnitQuaternion::identity())));
        assert!(!channels.matches(&FramePose::EMPTY));
        assert!(!channels.matches(&FramePose::with_position(Vector3::zeros())));
    }

    #[test]
    fn animatable_requires_two_frames_and_valid_fps() {
        let frame = Frame::new(vec![], Aabb::empty());

        let one_frame = AnimationTrack::new("t", 24.0, vec![], vec![frame.clone()]);
        assert!(!one_frame.is_animatable());

        let bad_fps = AnimationTrack::new("t", -10.0, vec![], vec![frame.clone(); 2]);
        assert!(!bad_fps.is_animatable());

        let nan_fps = AnimationTrack::new("t", f64::NAN, vec![], vec![frame.clone(); 2]);
        assert!(!nan_fps.is_animatable());

        let ok = AnimationTrack::new("t", 24.0, vec![], vec![frame; 2]);
        assert!(ok.is_animatable());
    }

    #[test]
    fn frame_at_scales_by_fps() {
        let track = AnimationTrack::new("t", 30.0, vec![], vec![]);
        assert!((track.frame_at(2.0) - 60.0).abs() < f64::EPSILON);
    }
}
