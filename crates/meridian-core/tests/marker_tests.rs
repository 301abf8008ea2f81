// Host-side tests for city markers, the label projector, and the scene arena.

use glam::{Quat, Vec3};
use meridian_core::constants::{MARKER_DISC_SEGMENTS, MARKER_RADIUS};
use meridian_core::labels::project_labels;
use meridian_core::{City, CityMarker, LabelFrame, NodeKind, OrbitCamera, Scene};

#[test]
fn marker_sits_at_the_projected_anchor() {
    let city = City::new("Equator", 0.0, 0.0);
    let marker = CityMarker::new(0, &city);
    assert!((marker.anchor - Vec3::new(MARKER_RADIUS, 0.0, 0.0)).length() < 1e-3);
}

#[test]
fn disc_normal_points_away_from_the_origin() {
    let city = City::new("Somewhere", 37.5, -122.3);
    let marker = CityMarker::new(0, &city);
    let normal = marker.orientation * Vec3::Z;
    let outward = marker.anchor.normalize();
    assert!(normal.dot(outward) > 0.999);
}

#[test]
fn disc_rim_lies_in_the_tangent_plane() {
    let city = City::new("Oblique", -48.0, 71.0);
    let marker = CityMarker::new(0, &city);
    let outward = marker.anchor.normalize();
    for v in marker.disc_vertices() {
        let offset = *v - marker.anchor;
        assert!(offset.dot(outward).abs() < 1e-3, "rim vertex left the plane");
    }
    assert_eq!(marker.disc_vertices().len(), MARKER_DISC_SEGMENTS * 3);
}

#[test]
fn world_anchor_follows_the_group_rotation() {
    let city = City::new("Equator", 0.0, 0.0);
    let marker = CityMarker::new(0, &city);
    let half_turn = Quat::from_rotation_y(std::f32::consts::PI);
    let rotated = marker.world_anchor(half_turn);
    assert!((rotated - Vec3::new(-MARKER_RADIUS, 0.0, 0.0)).length() < 1e-3);
}

fn markers() -> Vec<CityMarker> {
    vec![
        CityMarker::new(0, &City::new("Front", 0.0, -90.0)),
        CityMarker::new(1, &City::new("Back", 0.0, 90.0)),
    ]
}

fn world_anchors(markers: &[CityMarker], rotation: Quat) -> Vec<Vec3> {
    markers.iter().map(|m| m.world_anchor(rotation)).collect()
}

#[test]
fn front_marker_projects_near_the_surface_center() {
    // lon -90 projects onto +Z, which faces the default camera
    let cam = OrbitCamera::new(1.0);
    let markers = markers();
    let worlds = world_anchors(&markers, Quat::IDENTITY);
    let mut out = LabelFrame::new();
    project_labels(&markers, &worlds, &cam.camera, 800.0, 600.0, &mut out);

    assert_eq!(out.len(), 2);
    let front = out[0];
    assert!(front.visible);
    assert!((front.x - 400.0).abs() < 1.0);
    assert!((front.y - 300.0).abs() < 1.0);
}

#[test]
fn far_side_marker_is_hidden_not_misprojected() {
    let cam = OrbitCamera::new(1.0);
    let markers = markers();
    let worlds = world_anchors(&markers, Quat::IDENTITY);
    let mut out = LabelFrame::new();
    project_labels(&markers, &worlds, &cam.camera, 800.0, 600.0, &mut out);
    assert!(!out[1].visible);
}

#[test]
fn rotation_swaps_which_marker_is_visible() {
    let cam = OrbitCamera::new(1.0);
    let half_turn = Quat::from_rotation_y(std::f32::consts::PI);
    let markers = markers();
    let worlds = world_anchors(&markers, half_turn);
    let mut out = LabelFrame::new();
    project_labels(&markers, &worlds, &cam.camera, 800.0, 600.0, &mut out);
    assert!(!out[0].visible);
    assert!(out[1].visible);
}

#[test]
fn group_rotation_reaches_members_only() {
    let mut scene = Scene::new();
    let cloud = scene.insert(NodeKind::Cloud, true);
    let marker = scene.insert(NodeKind::Marker(0), true);
    let detached = scene.insert(NodeKind::Marker(1), false);

    let q = Quat::from_rotation_y(0.5);
    scene.set_group_rotation(q);

    assert_eq!(scene.group_rotation(), q);
    assert_eq!(scene.get(cloud).unwrap().rotation, q);
    assert_eq!(scene.get(marker).unwrap().rotation, q);
    assert_eq!(scene.get(detached).unwrap().rotation, Quat::IDENTITY);
}
