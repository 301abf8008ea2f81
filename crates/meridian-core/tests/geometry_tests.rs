// Host-side tests for the point-cloud generator and the geo projector.

use meridian_core::constants::COLOR_FLOOR;
use meridian_core::geo::project;
use meridian_core::geometry::{pole_factors, PointCloud};
use meridian_core::EngineError;

fn assert_close(a: f32, b: f32, eps: f32) {
    let diff = (a - b).abs();
    assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
}

#[test]
fn rejects_degenerate_point_counts() {
    assert_eq!(
        PointCloud::generate(0, 10.0).err(),
        Some(EngineError::PointCountTooSmall { got: 0 })
    );
    assert_eq!(
        PointCloud::generate(1, 10.0).err(),
        Some(EngineError::PointCountTooSmall { got: 1 })
    );
    assert!(PointCloud::generate(2, 10.0).is_ok());
}

#[test]
fn produces_exact_buffer_lengths() {
    for n in [2usize, 3, 17, 400] {
        let cloud = PointCloud::generate(n, 10.0).unwrap();
        assert_eq!(cloud.len(), n);
        assert_eq!(cloud.current.len(), n);
        assert_eq!(cloud.colors.len(), n);
        assert_eq!(cloud.spherical().len(), n);
    }
}

#[test]
fn height_is_monotonically_non_increasing() {
    let cloud = PointCloud::generate(300, 10.0).unwrap();
    let mut prev = f32::INFINITY;
    for p in cloud.original() {
        assert!(p.y <= prev + 1e-5, "y increased along the spiral");
        prev = p.y;
    }
}

#[test]
fn pole_factor_shrinks_monotonically_past_the_band() {
    let (planar, _) = pole_factors(0.5);
    assert_eq!(planar, 1.0);

    let mut prev = 1.0;
    let mut y = 0.66;
    while y <= 1.0 {
        let (planar, y_scale) = pole_factors(y);
        assert!(planar < 1.0, "planar factor not reduced at |y|={y}");
        assert!(planar < prev, "planar factor not decreasing at |y|={y}");
        assert!(y_scale < 1.0 && y_scale >= 0.9);
        prev = planar;
        y += 0.02;
    }
    // symmetric about the equator
    assert_eq!(pole_factors(0.8), pole_factors(-0.8));
}

#[test]
fn colors_start_at_the_dark_baseline() {
    let cloud = PointCloud::generate(64, 10.0).unwrap();
    for c in &cloud.colors {
        assert_eq!(*c, [COLOR_FLOOR; 3]);
    }
}

#[test]
fn equator_prime_meridian_lands_on_positive_x() {
    let p = project(0.0, 0.0, 10.0);
    assert_close(p.x, 10.0, 1e-4);
    assert_close(p.y, 0.0, 1e-4);
    assert_close(p.z, 0.0, 1e-3);
}

#[test]
fn equator_90e_lands_on_negative_z() {
    let p = project(0.0, 90.0, 10.0);
    assert_close(p.x, 0.0, 1e-3);
    assert_close(p.y, 0.0, 1e-4);
    assert_close(p.z, -10.0, 1e-4);
}

#[test]
fn poles_land_on_y_axis() {
    let n = project(90.0, 0.0, 5.0);
    assert_close(n.y, 5.0, 1e-4);
    let s = project(-90.0, 0.0, 5.0);
    assert_close(s.y, -5.0, 1e-4);
}

#[test]
fn projection_preserves_radius_across_the_domain() {
    for lat in (-90..=90).step_by(15) {
        for lon in (-180..=180).step_by(20) {
            let p = project(lat as f32, lon as f32, 7.5);
            assert_close(p.length(), 7.5, 1e-3);
        }
    }
}
