//! End-to-end pipeline tests: load, pose, deform, shadow.

use nalgebra::{Point3, Vector2, Vector3};
use rig_model::SkinnedModel;
use rig_skeleton::{Skeleton, SuperPose};
use rig_types::{
    Aabb, AnimationTrack, Frame, FramePose, Joint, JointChannels, JointTransform, Material,
    MeshTriangle, SkinnedMesh, SkinnedVertex, UnitQuaternion, VertexWeight,
};
use std::f64::consts::FRAC_PI_2;

// =============================================================================
// Fixtures
// =============================================================================

/// Root plus one child 10 units up the z axis.
fn two_joint_skeleton() -> Skeleton {
    Skeleton::new(vec![
        Joint::root("root", JointTransform::identity()),
        Joint::child(
            "arm",
            0,
            JointTransform::from_position(Vector3::new(0.0, 0.0, 10.0)),
        ),
    ])
}

/// Two frames: identity, then the arm swung 90 degrees about x.
fn swing_track(bounds: [Aabb; 2]) -> AnimationTrack {
    let channels = vec![
        JointChannels::NONE,
        JointChannels {
            rotation: true,
            ..JointChannels::NONE
        },
    ];
    let [b0, b1] = bounds;
    let frames = vec![
        Frame::new(
            vec![
                FramePose::EMPTY,
                FramePose::with_rotation(UnitQuaternion::identity()),
            ],
            b0,
        ),
        Frame::new(
            vec![
                FramePose::EMPTY,
                FramePose::with_rotation(UnitQuaternion::from_axis_angle(
                    &Vector3::x_axis(),
                    FRAC_PI_2,
                )),
            ],
            b1,
        ),
    ];
    AnimationTrack::new("swing", 24.0, channels, frames)
}

/// A triangle riding entirely on the arm joint; its first vertex sits at
/// bind offset (0, 0, 1) from the joint.
fn arm_mesh() -> SkinnedMesh {
    let mut mesh = SkinnedMesh::new(Material::new("skin"));
    let offsets = [
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    for (k, offset) in offsets.iter().enumerate() {
        mesh.weights.push(VertexWeight::new(1, 1.0, *offset));
        mesh.vertices.push(SkinnedVertex::new(
            Vector2::new(offset.x, offset.y),
            k as u32,
            1,
        ));
    }
    mesh.triangles.push(MeshTriangle::new([0, 1, 2]));
    mesh
}

fn arm_model() -> SkinnedModel {
    SkinnedModel::from_parts(
        two_joint_skeleton(),
        vec![swing_track([Aabb::empty(), Aabb::empty()])],
        vec![arm_mesh()],
    )
    .unwrap()
}

/// A quad whose texture is mirrored across the shared edge: u runs from
/// 0 at both outer edges to 1 at the seam.
fn mirrored_quad_mesh() -> SkinnedMesh {
    let mut mesh = SkinnedMesh::new(Material::new("mirror"));
    let corners = [
        (Point3::new(0.0, 0.0, 0.0), Vector2::new(1.0, 0.0)),
        (Point3::new(0.0, 1.0, 0.0), Vector2::new(1.0, 1.0)),
        (Point3::new(-1.0, 0.0, 0.0), Vector2::new(0.0, 0.0)),
        (Point3::new(1.0, 0.0, 0.0), Vector2::new(0.0, 0.0)),
    ];
    for (k, (p, uv)) in corners.iter().enumerate() {
        mesh.weights.push(VertexWeight::new(0, 1.0, *p));
        mesh.vertices.push(SkinnedVertex::new(*uv, k as u32, 1));
    }
    mesh.triangles.push(MeshTriangle::new([0, 1, 2]));
    mesh.triangles.push(MeshTriangle::new([1, 0, 3]));
    mesh
}

// =============================================================================
// Pose evaluation scenarios
// =============================================================================

#[test]
fn bind_frame_places_vertex_at_bone_tip() {
    let mut model = arm_model();
    let pose = model.evaluate_pose(Some(0), 0.0, None);
    let geometry = model.deformed_geometry(pose).unwrap();

    // Arm at (0,0,10), vertex offset (0,0,1): world (0,0,11).
    let p = geometry[0].vertices[0].position;
    assert!((p - Point3::new(0.0, 0.0, 11.0)).norm() < 1e-9);
}

#[test]
fn swung_frame_rotates_vertex_about_joint() {
    let mut model = arm_model();
    let pose = model.evaluate_pose(Some(0), 1.0, None);
    let geometry = model.deformed_geometry(pose).unwrap();

    // The 90-degree swing about +x carries the offset (0,0,1) onto
    // (0,-1,0), pivoting at the joint: world (0,-1,10).
    let p = geometry[0].vertices[0].position;
    assert!((p - Point3::new(0.0, -1.0, 10.0)).norm() < 1e-9);
}

#[test]
fn out_of_range_sequence_degrades_to_bind_pose() {
    let mut model = arm_model();
    let bind = model.evaluate_pose(None, 0.0, None);
    let bind_position = model.deformed_geometry(bind).unwrap()[0].vertices[0].position;

    let bad = model.evaluate_pose(Some(99), 0.0, None);
    let bad_position = model.deformed_geometry(bad).unwrap()[0].vertices[0].position;

    assert_eq!(bind_position, bad_position);
}

#[test]
fn pose_cache_is_idempotent() {
    let mut model = arm_model();
    let before = model.pose_evaluations();

    let a = model.evaluate_pose(Some(0), 0.5, None);
    let after_first = model.pose_evaluations();
    let b = model.evaluate_pose(Some(0), 0.5, None);
    let after_second = model.pose_evaluations();

    assert_eq!(a, b);
    assert_eq!(after_first, before + 1);
    assert_eq!(after_second, after_first, "identical request must not recompute");
}

#[test]
fn stale_handle_is_rejected() {
    let mut model = arm_model();
    let old = model.evaluate_pose(Some(0), 0.0, None);
    model.evaluate_pose(Some(0), 1.0, None);

    assert!(model.deformed_geometry(old).is_none());
    assert!(model.joint_matrices(old).is_none());
    assert!(model.shadow_volume(old, &Point3::origin()).is_none());
}

#[test]
fn bad_track_is_dropped_but_model_loads() {
    let bad_track = AnimationTrack::new("broken", -1.0, vec![], vec![]);
    let model = SkinnedModel::from_parts(
        two_joint_skeleton(),
        vec![bad_track, swing_track([Aabb::empty(), Aabb::empty()])],
        vec![arm_mesh()],
    )
    .unwrap();

    assert_eq!(model.tracks().len(), 1);
    assert_eq!(model.tracks()[0].name, "swing");
}

#[test]
fn bad_mesh_is_fatal() {
    let mut mesh = arm_mesh();
    mesh.vertices[0].weight_count = 10;
    let result = SkinnedModel::from_parts(two_joint_skeleton(), vec![], vec![mesh]);
    assert!(result.is_err());
}

#[test]
fn bad_skeleton_is_fatal() {
    let skeleton = Skeleton::new(vec![Joint::child("a", 3, JointTransform::identity())]);
    assert!(SkinnedModel::from_parts(skeleton, vec![], vec![arm_mesh()]).is_err());
}

// =============================================================================
// Geo-dups and seam splitting
// =============================================================================

#[test]
fn mirrored_quad_splits_shared_edge_into_dup_pairs() {
    let mut model =
        SkinnedModel::from_parts(two_joint_skeleton(), vec![], vec![mirrored_quad_mesh()])
            .unwrap();

    // The two shared-edge vertices split into four physical vertices.
    let mesh = &model.meshes()[0];
    assert_eq!(mesh.vertex_count(), 6);

    let split: Vec<usize> = (0..mesh.vertex_count())
        .filter(|&v| mesh.vertices[v].has_geo_dups())
        .collect();
    assert_eq!(split.len(), 4);
    for &v in &split {
        let dups = &mesh.vertices[v].geo_dups;
        assert_eq!(dups.len(), 1, "each split vertex pairs with one dup");
        assert!(mesh.vertices[dups[0] as usize]
            .geo_dups
            .contains(&(v as u32)));
    }

    // Opposite polarities on the two halves.
    assert_ne!(mesh.triangles[0].polarity, mesh.triangles[1].polarity);

    // Geo-dups deform identically, bit for bit.
    let pose = model.evaluate_pose(None, 0.0, None);
    let geometry = model.deformed_geometry(pose).unwrap();
    let mesh = &model.meshes()[0];
    for v in 0..mesh.vertex_count() {
        for &d in &mesh.vertices[v].geo_dups {
            assert_eq!(
                geometry[0].vertices[v].position,
                geometry[0].vertices[d as usize].position
            );
        }
    }
}

#[test]
fn geo_dups_deform_identically_under_animation() {
    let mut mesh = mirrored_quad_mesh();
    // Weight the quad onto the animated arm joint.
    for w in &mut mesh.weights {
        w.joint = 1;
    }
    let mut model = SkinnedModel::from_parts(
        two_joint_skeleton(),
        vec![swing_track([Aabb::empty(), Aabb::empty()])],
        vec![mesh],
    )
    .unwrap();

    for frame in [0.0, 0.25, 0.5, 1.0] {
        let pose = model.evaluate_pose(Some(0), frame, None);
        let geometry = model.deformed_geometry(pose).unwrap();
        let mesh = &model.meshes()[0];
        for v in 0..mesh.vertex_count() {
            for &d in &mesh.vertices[v].geo_dups {
                assert_eq!(
                    geometry[0].vertices[v].position,
                    geometry[0].vertices[d as usize].position,
                    "frame {frame}: vertex {v} and dup {d} diverged"
                );
            }
        }
    }
}

#[test]
fn tangent_frames_are_unit_length() {
    let mut model =
        SkinnedModel::from_parts(two_joint_skeleton(), vec![], vec![mirrored_quad_mesh()])
            .unwrap();
    let pose = model.evaluate_pose(None, 0.0, None);
    let geometry = model.deformed_geometry(pose).unwrap();

    for v in geometry[0].vertices {
        assert!((v.normal.norm() - 1.0).abs() < 1e-9);
        assert!((v.tangent.norm() - 1.0).abs() < 1e-9);
        assert!((v.binormal.norm() - 1.0).abs() < 1e-9);
    }
}

// =============================================================================
// Super-skeleton attachment
// =============================================================================

#[test]
fn attached_model_follows_carrier_joint() {
    let mut carrier = arm_model();
    let carrier_pose = carrier.evaluate_pose(Some(0), 1.0, None);
    let carrier_matrices = carrier.joint_matrices(carrier_pose).unwrap().to_vec();

    // The attachment's second joint shares the carrier's "arm" name.
    let attachment_skeleton = Skeleton::new(vec![
        Joint::root("origin", JointTransform::identity()),
        Joint::child("arm", 0, JointTransform::identity()),
    ]);
    let joint_map = attachment_skeleton.joint_map_to(carrier.skeleton());
    assert_eq!(joint_map, vec![None, Some(1)]);

    let mut attachment_mesh = arm_mesh();
    for w in &mut attachment_mesh.weights {
        w.joint = 1;
    }
    let mut attachment =
        SkinnedModel::from_parts(attachment_skeleton, vec![], vec![attachment_mesh]).unwrap();

    let super_pose = SuperPose {
        matrices: &carrier_matrices,
        joint_map: &joint_map,
    };
    let pose = attachment.evaluate_pose(None, 0.0, Some(&super_pose));
    let geometry = attachment.deformed_geometry(pose).unwrap();

    // The attachment vertex lands where the carrier's swung arm put it.
    let p = geometry[0].vertices[0].position;
    assert!((p - Point3::new(0.0, -1.0, 10.0)).norm() < 1e-9);
}

#[test]
fn super_pose_is_never_served_from_cache() {
    let mut carrier = arm_model();
    let carrier_pose = carrier.evaluate_pose(Some(0), 0.0, None);
    let matrices = carrier.joint_matrices(carrier_pose).unwrap().to_vec();

    let mut attachment = arm_model();
    let joint_map = vec![Some(0), Some(1)];
    let super_pose = SuperPose {
        matrices: &matrices,
        joint_map: &joint_map,
    };

    let before = attachment.pose_evaluations();
    attachment.evaluate_pose(None, 0.0, Some(&super_pose));
    attachment.evaluate_pose(None, 0.0, Some(&super_pose));
    assert_eq!(attachment.pose_evaluations(), before + 2);
}

// =============================================================================
// Bounding boxes and shadows
// =============================================================================

#[test]
fn bounding_box_unions_bracketing_frames() {
    let b0 = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
    let b1 = Aabb::new(Point3::new(2.0, 0.0, 0.0), Point3::new(3.0, 1.0, 1.0));
    let model = SkinnedModel::from_parts(
        two_joint_skeleton(),
        vec![swing_track([b0, b1])],
        vec![arm_mesh()],
    )
    .unwrap();

    let bounds = model.bounding_box(Some(0), 0.5);
    assert!((bounds.min.x - 0.0).abs() < 1e-12);
    assert!((bounds.max.x - 3.0).abs() < 1e-12);
}

#[test]
fn bind_bounds_cover_the_bind_pose() {
    let model = arm_model();
    let bounds = model.bounding_box(None, 0.0);

    // All three vertices sit near z=11 around the arm tip.
    assert!(bounds.contains(&Point3::new(0.0, 0.0, 11.0)));
    assert!(bounds.contains(&Point3::new(1.0, 0.0, 11.0)));
    assert!((bounds.min.z - 11.0).abs() < 1e-9);
}

#[test]
fn out_of_range_bounding_box_is_bind_bounds() {
    let model = arm_model();
    assert_eq!(model.bounding_box(Some(42), 0.0), model.bounding_box(None, 0.0));
}

#[test]
fn shadow_volume_respects_material_flag() {
    let mut mesh = arm_mesh();
    mesh.material = Material::without_shadow("glow");
    let mut model =
        SkinnedModel::from_parts(two_joint_skeleton(), vec![], vec![mesh]).unwrap();

    let pose = model.evaluate_pose(None, 0.0, None);
    let volume = model
        .shadow_volume(pose, &Point3::new(0.0, 0.0, 20.0))
        .unwrap();
    assert!(volume.is_empty());
}

#[test]
fn shadow_volume_emits_for_lit_mesh() {
    let mut model = arm_model();
    let pose = model.evaluate_pose(None, 0.0, None);

    // The arm triangle lies in the z=11 plane; light it from one side.
    // Whichever side faces the light, one open triangle emits three
    // silhouette quads and two caps.
    let lit = model
        .shadow_volume(pose, &Point3::new(0.2, 0.2, 20.0))
        .unwrap();
    let unlit = model
        .shadow_volume(pose, &Point3::new(0.2, 0.2, -20.0))
        .unwrap();

    let emitted = if lit.is_empty() { &unlit } else { &lit };
    assert_eq!(emitted.quad_count(), 3);
    assert_eq!(emitted.cap_count(), 2);
}
