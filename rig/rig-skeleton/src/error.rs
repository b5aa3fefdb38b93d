//! Error types for skeleton and animation-track validation.

use thiserror::Error;

/// Result type for skeleton operations.
pub type SkeletonResult<T> = Result<T, SkeletonError>;

/// Load-time structural errors in a skeleton or one of its tracks.
///
/// These are permanent: the data is wrong on disk and cannot become valid
/// at runtime. A bad track is dropped (the model loses one sequence); a
/// bad skeleton is fatal to the model.
#[derive(Debug, Error)]
pub enum SkeletonError {
    /// A joint's parent does not precede it in the joint array.
    #[error("joint {joint} has parent {parent}, but parents must precede children")]
    ParentOutOfOrder {
        /// Index of the offending joint.
        joint: usize,
        /// Its parent index.
        parent: u32,
    },

    /// A non-first joint without a parent, or multiple roots are fine -
    /// but a parent index past the end of the array is not.
    #[error("joint {joint} references nonexistent parent {parent} ({joint_count} joints)")]
    ParentOutOfBounds {
        /// Index of the offending joint.
        joint: usize,
        /// Its parent index.
        parent: u32,
        /// Total number of joints.
        joint_count: usize,
    },

    /// A track's channel table does not match the skeleton's joint count.
    #[error("track '{track}' has channel flags for {actual} joints, skeleton has {expected}")]
    JointCountMismatch {
        /// Track name.
        track: String,
        /// Skeleton joint count.
        expected: usize,
        /// Track joint count.
        actual: usize,
    },

    /// A frame's pose table does not match the skeleton's joint count.
    #[error("track '{track}' frame {frame} has {actual} joint poses, skeleton has {expected}")]
    FrameJointMismatch {
        /// Track name.
        track: String,
        /// Frame index.
        frame: usize,
        /// Skeleton joint count.
        expected: usize,
        /// Frame joint count.
        actual: usize,
    },

    /// A frame stores components that disagree with the track's
    /// animated-channel flags.
    #[error("track '{track}' frame {frame} joint {joint}: stored components disagree with channel flags")]
    ChannelMismatch {
        /// Track name.
        track: String,
        /// Frame index.
        frame: usize,
        /// Joint index.
        joint: usize,
    },

    /// A track's frame rate is not a positive finite number.
    #[error("track '{track}' has invalid frame rate {fps}")]
    InvalidFrameRate {
        /// Track name.
        track: String,
        /// The offending rate.
        fps: f64,
    },

    /// A track with no frames at all.
    #[error("track '{track}' has no frames")]
    EmptyTrack {
        /// Track name.
        track: String,
    },
}
