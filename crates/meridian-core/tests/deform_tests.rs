// Host-side tests for the surface deformation and coloring engine.

use meridian_core::constants::{COLOR_CEIL, COLOR_FLOOR, FRAME_REF_DT};
use meridian_core::SurfaceWaves;

#[test]
fn deform_factor_stays_in_the_rest_band_without_impulse() {
    let mut waves = SurfaceWaves::new();
    for _ in 0..600 {
        waves.advance(FRAME_REF_DT);
        let mut lat = 0.0_f32;
        while lat <= std::f32::consts::PI {
            let mut lon = -std::f32::consts::PI;
            while lon <= std::f32::consts::PI {
                let f = waves.deform_factor(lat, lon);
                assert!(f > 0.80 && f < 1.20, "factor {f} escaped the band");
                lon += 0.7;
            }
            lat += 0.5;
        }
    }
}

#[test]
fn deform_factor_never_goes_non_positive_even_with_impulse() {
    let mut waves = SurfaceWaves::new();
    waves.trigger_impulse();
    for _ in 0..120 {
        waves.advance(FRAME_REF_DT);
        let f = waves.deform_factor(1.0, 0.5);
        assert!(f > 0.0, "factor {f} would self-intersect the sphere");
    }
}

#[test]
fn impulse_decays_below_one_percent_within_bounded_frames() {
    let mut waves = SurfaceWaves::new();
    waves.trigger_impulse();
    assert_eq!(waves.impulse(), 1.0);
    for _ in 0..56 {
        waves.advance(FRAME_REF_DT);
    }
    assert!(waves.impulse() < 0.01, "impulse {} still live", waves.impulse());
    // and it stays down until the next trigger
    for _ in 0..60 {
        waves.advance(FRAME_REF_DT);
    }
    assert_eq!(waves.impulse(), 0.0);
}

#[test]
fn brightness_stays_inside_the_visible_band() {
    let mut waves = SurfaceWaves::new();
    for _ in 0..240 {
        waves.advance(FRAME_REF_DT);
        let b = waves.brightness(0.9, -2.0);
        assert!((COLOR_FLOOR..=COLOR_CEIL).contains(&b), "brightness {b}");
    }
}
