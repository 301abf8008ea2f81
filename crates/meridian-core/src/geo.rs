use glam::Vec3;

/// Project latitude/longitude in degrees onto a sphere of the given radius.
///
/// The convention is polar angle `phi = (90 - lat)` and azimuth
/// `theta = (lon + 180)`, with `x = -r sin(phi) cos(theta)`,
/// `y = r cos(phi)`, `z = r sin(phi) sin(theta)`. Markers and arcs both
/// project through here; they stay geometrically coherent only as long as
/// every caller shares this exact sign/offset convention.
#[inline]
pub fn project(lat_deg: f32, lon_deg: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lon_deg + 180.0).to_radians();
    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}
