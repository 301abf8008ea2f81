// Host-side tests for pointer easing and the orbit camera.

use glam::{Vec2, Vec3};
use meridian_core::constants::{
    CAMERA_BREATH_AMP, FRAME_REF_DT, POINTER_EASE, POINTER_SENSITIVITY,
};
use meridian_core::{OrbitCamera, PointerState};

#[test]
fn easing_contracts_the_gap_by_the_damping_factor_each_frame() {
    let mut pointer = PointerState::default();
    pointer.set_target(Vec2::new(100.0, -40.0));
    let target = pointer.target;

    let mut gap = (target - pointer.current).length();
    for _ in 0..200 {
        pointer.ease(FRAME_REF_DT);
        let next_gap = (target - pointer.current).length();
        assert!(
            (next_gap - gap * (1.0 - POINTER_EASE)).abs() < 1e-4,
            "gap did not shrink by the damping factor"
        );
        assert!(next_gap <= gap, "easing overshot the target");
        gap = next_gap;
    }
    assert!(gap < 1e-3, "easing failed to converge");
}

#[test]
fn pointer_target_scales_with_sensitivity_from_surface_center() {
    let mut cam = OrbitCamera::new(1.6);
    cam.pointer_moved(700.0, 200.0, 800.0, 600.0);
    let expected = Vec2::new(300.0, 100.0) * POINTER_SENSITIVITY;
    assert!((cam.pointer().target - expected).length() < 1e-5);
}

#[test]
fn camera_breathes_about_the_base_distance_and_faces_origin() {
    let mut cam = OrbitCamera::new(1.0);
    let base = cam.eye().z;
    let mut min_z = f32::INFINITY;
    let mut max_z = f32::NEG_INFINITY;
    for _ in 0..1200 {
        cam.step(FRAME_REF_DT);
        min_z = min_z.min(cam.eye().z);
        max_z = max_z.max(cam.eye().z);
        assert_eq!(cam.camera.target, Vec3::ZERO);
    }
    assert!(min_z < base && max_z > base, "no depth oscillation observed");
    assert!(max_z - min_z <= 2.0 * CAMERA_BREATH_AMP + 1e-3);
}
