//! The skinned model facade.

use crate::error::{ModelError, ModelResult};
use crate::geometry::MeshGeometry;
use nalgebra::{Matrix4, Point3};
use rig_deform::{PoseCache, PoseKey};
use rig_shadow::{extract_shadow_volume, ShadowVolume};
use rig_skeleton::{normalize_frame, Skeleton, SuperPose};
use rig_topology::preprocess;
use rig_types::{Aabb, AnimationTrack, SkinnedMesh};
use tracing::{info, warn};

/// A token for a pose held in the model's cache.
///
/// Returned by [`SkinnedModel::evaluate_pose`]; the data accessors take
/// it back and return `None` if a different pose has been evaluated
/// since, so a stale handle can never read mismatched buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseHandle {
    key: PoseKey,
}

/// A fully loaded, preprocessed skinned model.
///
/// Owns the immutable skeleton, animation tracks and mesh tables, plus
/// the mutable pose cache. The tables may be shared read-only across
/// threads by cloning the model; the cache is single-writer, so each
/// concurrently drawn instance needs its own `SkinnedModel`.
#[derive(Debug)]
pub struct SkinnedModel {
    skeleton: Skeleton,
    tracks: Vec<AnimationTrack>,
    meshes: Vec<SkinnedMesh>,
    cache: PoseCache,
    bind_bounds: Aabb,
}

impl SkinnedModel {
    /// Assemble a model from loader output.
    ///
    /// The skeleton and every mesh must be structurally sound or the
    /// model fails to load. Animation tracks are validated individually:
    /// a bad track is dropped with a warning and the model merely loses
    /// that sequence.
    pub fn from_parts(
        skeleton: Skeleton,
        tracks: Vec<AnimationTrack>,
        mut meshes: Vec<SkinnedMesh>,
    ) -> ModelResult<Self> {
        skeleton.validate()?;

        let mut usable = Vec::with_capacity(tracks.len());
        for track in tracks {
            match skeleton.validate_track(&track) {
                Ok(()) => usable.push(track),
                Err(error) => {
                    warn!(track = %track.name, %error, "dropping unusable animation track");
                }
            }
        }

        for (index, mesh) in meshes.iter_mut().enumerate() {
            preprocess(mesh, skeleton.joint_count())
                .map_err(|source| ModelError::Mesh { mesh: index, source })?;
        }

        let mut model = Self {
            cache: PoseCache::new(meshes.len()),
            skeleton,
            tracks: usable,
            meshes,
            bind_bounds: Aabb::empty(),
        };

        // Measure the bind pose once; the cache keeps it warm for
        // callers that draw unanimated.
        model.evaluate_pose(None, 0.0, None);
        model.bind_bounds = Aabb::from_points(
            model
                .cache
                .buffers()
                .flat_map(|b| b.vertices.iter().map(|v| &v.position)),
        );

        info!(
            joints = model.skeleton.joint_count(),
            meshes = model.meshes.len(),
            sequences = model.tracks.len(),
            "loaded skinned model"
        );
        Ok(model)
    }

    /// The skeleton definition.
    #[inline]
    #[must_use]
    pub const fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// The usable animation tracks.
    #[inline]
    #[must_use]
    pub fn tracks(&self) -> &[AnimationTrack] {
        &self.tracks
    }

    /// The preprocessed mesh tables.
    #[inline]
    #[must_use]
    pub fn meshes(&self) -> &[SkinnedMesh] {
        &self.meshes
    }

    /// Evaluate a pose, memoized on the (sequence, frame) pair.
    ///
    /// `None` or an out-of-range sequence silently yields the bind pose.
    /// The frame wraps modulo the sequence's frame count; play-once
    /// callers clamp with [`normalize_frame`] before calling. A request
    /// identical to the cached one returns without recomputing;
    /// requests carrying a `super_pose` always recompute, since the
    /// carrier's matrices are outside the cache key.
    pub fn evaluate_pose(
        &mut self,
        sequence: Option<usize>,
        frame: f64,
        super_pose: Option<&SuperPose<'_>>,
    ) -> PoseHandle {
        let key = self.cache.evaluate(
            &self.skeleton,
            &self.tracks,
            &self.meshes,
            sequence,
            frame,
            super_pose,
        );
        PoseHandle { key }
    }

    /// The joint world matrices of a pose, e.g. to drive an attached
    /// model through [`SuperPose`].
    #[must_use]
    pub fn joint_matrices(&self, handle: PoseHandle) -> Option<&[Matrix4<f64>]> {
        self.check(handle)?;
        Some(self.cache.joint_matrices())
    }

    /// Per-mesh renderable geometry for a pose.
    #[must_use]
    pub fn deformed_geometry(&self, handle: PoseHandle) -> Option<Vec<MeshGeometry<'_>>> {
        self.check(handle)?;
        let views = self
            .meshes
            .iter()
            .enumerate()
            .filter_map(|(index, mesh)| {
                let buffers = self.cache.mesh_buffers(index)?;
                Some(MeshGeometry::new(mesh, &buffers.vertices))
            })
            .collect();
        Some(views)
    }

    /// The stencil shadow volume of a pose for one light.
    ///
    /// Aggregated over all meshes; groups whose material casts no
    /// shadow contribute nothing. Re-extracted per call: the result
    /// depends on the light, so it is not cached.
    #[must_use]
    pub fn shadow_volume(&self, handle: PoseHandle, light: &Point3<f64>) -> Option<ShadowVolume> {
        self.check(handle)?;
        let mut volume = ShadowVolume::default();
        for (index, mesh) in self.meshes.iter().enumerate() {
            let Some(buffers) = self.cache.mesh_buffers(index) else {
                continue;
            };
            volume.merge(extract_shadow_volume(
                light,
                &mesh.triangles,
                &buffers.vertices,
                &buffers.triangle_normals,
                mesh.material.casts_shadow,
            ));
        }
        Some(volume)
    }

    /// The bounding box of a (sequence, frame) pose without evaluating
    /// it.
    ///
    /// For an animated request this is the union of the two bracketing
    /// keyframes' stored boxes; for the bind pose, or any out-of-range
    /// request, the measured bind-pose box. Callers use this to reject
    /// draws against a light's influence radius cheaply.
    #[must_use]
    pub fn bounding_box(&self, sequence: Option<usize>, frame: f64) -> Aabb {
        let track = sequence
            .and_then(|index| self.tracks.get(index))
            .filter(|track| track.is_animatable());
        let Some(track) = track else {
            return self.bind_bounds;
        };

        let frame = normalize_frame(frame, track.frame_count(), true);
        let f0 = frame.floor() as usize;
        let f1 = (f0 + 1) % track.frame_count();
        track.frames[f0].bounds.union(&track.frames[f1].bounds)
    }

    /// How many times the full deformation pipeline has run.
    #[inline]
    #[must_use]
    pub const fn pose_evaluations(&self) -> u64 {
        self.cache.evaluations()
    }

    /// Guard against stale handles.
    fn check(&self, handle: PoseHandle) -> Option<()> {
        (self.cache.current() == Some(handle.key)).then_some(())
    }
}
