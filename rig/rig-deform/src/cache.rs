//! The coarse-grained pose cache.

use crate::skin::deform_vertices;
use crate::tangent::accumulate_tangents;
use nalgebra::{Matrix4, Vector3};
use rig_skeleton::{evaluate_pose, Skeleton, SuperPose};
use rig_types::{AnimationTrack, DeformedVertex, SkinnedMesh};
use tracing::debug;

/// The cache key: which pose the buffers currently hold.
///
/// Frames compare by bit pattern, so a cached result is reused only for
/// a request that is bit-identical to the one that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseKey {
    /// Sequence index, or `None` for the bind pose.
    pub sequence: Option<usize>,
    /// Bit pattern of the real-valued frame number.
    pub frame_bits: u64,
}

impl PoseKey {
    /// Build a key from a pose request.
    #[inline]
    #[must_use]
    pub fn new(sequence: Option<usize>, frame: f64) -> Self {
        Self {
            sequence,
            frame_bits: frame.to_bits(),
        }
    }
}

/// Per-mesh deformation output for one pose.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    /// Skinned vertices with their tangent bases.
    pub vertices: Vec<DeformedVertex>,
    /// One geometric unit normal per triangle.
    pub triangle_normals: Vec<Vector3<f64>>,
}

/// Memoized pose evaluation for one model instance.
///
/// One cache instance serves one rendering thread: the immutable mesh
/// tables may be shared across threads, these buffers may not. The
/// invalidation rule is total - a cached pose is valid only for a
/// bit-identical (sequence, frame) request, and an evaluation driven by
/// a super-skeleton is never cached, since the carrier's matrices are
/// not part of the key. Partial, per-component invalidation is
/// deliberately not offered.
#[derive(Debug, Default)]
pub struct PoseCache {
    joints: Vec<Matrix4<f64>>,
    meshes: Vec<MeshBuffers>,
    current: Option<PoseKey>,
    cacheable: bool,
    evaluations: u64,
}

impl PoseCache {
    /// Create an empty cache for a model with `mesh_count` meshes.
    #[must_use]
    pub fn new(mesh_count: usize) -> Self {
        Self {
            joints: Vec::new(),
            meshes: vec![MeshBuffers::default(); mesh_count],
            current: None,
            cacheable: false,
            evaluations: 0,
        }
    }

    /// Evaluate a pose, reusing the cached buffers when the key matches.
    ///
    /// Runs skeleton evaluation, skinning, and tangent accumulation for
    /// every mesh on a miss; returns the key either way. The whole
    /// computation is synchronous and runs to completion.
    pub fn evaluate(
        &mut self,
        skeleton: &Skeleton,
        tracks: &[AnimationTrack],
        meshes: &[SkinnedMesh],
        sequence: Option<usize>,
        frame: f64,
        super_pose: Option<&SuperPose<'_>>,
    ) -> PoseKey {
        let key = PoseKey::new(sequence, frame);

        if self.cacheable && self.current == Some(key) && super_pose.is_none() {
            return key;
        }

        debug!(?sequence, frame, "pose cache miss, recomputing");
        evaluate_pose(skeleton, tracks, sequence, frame, super_pose, &mut self.joints);

        self.meshes.resize_with(meshes.len(), MeshBuffers::default);
        for (mesh, buffers) in meshes.iter().zip(&mut self.meshes) {
            deform_vertices(mesh, &self.joints, &mut buffers.vertices);
            accumulate_tangents(mesh, &mut buffers.vertices, &mut buffers.triangle_normals);
        }

        self.evaluations += 1;
        self.current = Some(key);
        // A super-driven pose depends on matrices outside the key; it
        // must never satisfy a later request.
        self.cacheable = super_pose.is_none();
        key
    }

    /// The key of the pose currently in the buffers.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> Option<PoseKey> {
        self.current
    }

    /// How many times the full pipeline has actually run.
    ///
    /// Instrumentation for tests and profiling: repeated draws of the
    /// same pose must not bump this.
    #[inline]
    #[must_use]
    pub const fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// The joint world matrices of the current pose.
    #[inline]
    #[must_use]
    pub fn joint_matrices(&self) -> &[Matrix4<f64>] {
        &self.joints
    }

    /// The deformation buffers of mesh `index`.
    #[inline]
    #[must_use]
    pub fn mesh_buffers(&self, index: usize) -> Option<&MeshBuffers> {
        self.meshes.get(index)
    }

    /// Iterate over all mesh buffers.
    pub fn buffers(&self) -> impl Iterator<Item = &MeshBuffers> {
        self.meshes.iter()
    }
}
