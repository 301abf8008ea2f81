use glam::{Quat, Vec3};

use crate::constants::{MARKER_DISC_RADIUS, MARKER_DISC_SEGMENTS, MARKER_RADIUS};
use crate::geo;

/// Reference data for a labelled location on the globe.
#[derive(Clone, Debug)]
pub struct City {
    pub name: String,
    pub lat: f32,
    pub lon: f32,
}

impl City {
    pub fn new(name: impl Into<String>, lat: f32, lon: f32) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }
}

/// A flat disc sitting on the sphere surface at a city's projection,
/// facing outward. Markers rotate rigidly with the sphere group; the local
/// disc mesh is built once and only re-oriented by the group rotation.
pub struct CityMarker {
    pub city: usize,
    /// Projection of the city at marker radius, in the sphere's local frame.
    pub anchor: Vec3,
    /// Rotation taking the disc plane's +Z normal to the outward direction.
    pub orientation: Quat,
    disc: Vec<Vec3>,
}

impl CityMarker {
    pub fn new(city_index: usize, city: &City) -> Self {
        let anchor = geo::project(city.lat, city.lon, MARKER_RADIUS);
        // face away from the sphere center: look at the origin, flipped
        let outward = anchor.normalize_or_zero();
        let orientation = Quat::from_rotation_arc(Vec3::Z, outward);

        let disc = build_disc(anchor, orientation);
        Self {
            city: city_index,
            anchor,
            orientation,
            disc,
        }
    }

    /// Marker anchor in world space under the sphere group rotation.
    #[inline]
    pub fn world_anchor(&self, rotation: Quat) -> Vec3 {
        rotation * self.anchor
    }

    /// Disc triangle list in the sphere's local frame. Renderers apply the
    /// group rotation through their model matrix.
    #[inline]
    pub fn disc_vertices(&self) -> &[Vec3] {
        &self.disc
    }
}

fn build_disc(anchor: Vec3, orientation: Quat) -> Vec<Vec3> {
    let mut verts = Vec::with_capacity(MARKER_DISC_SEGMENTS * 3);
    let tau = std::f32::consts::TAU;
    for seg in 0..MARKER_DISC_SEGMENTS {
        let a0 = seg as f32 / MARKER_DISC_SEGMENTS as f32 * tau;
        let a1 = (seg + 1) as f32 / MARKER_DISC_SEGMENTS as f32 * tau;
        let rim0 = orientation * Vec3::new(a0.cos(), a0.sin(), 0.0) * MARKER_DISC_RADIUS;
        let rim1 = orientation * Vec3::new(a1.cos(), a1.sin(), 0.0) * MARKER_DISC_RADIUS;
        verts.push(anchor);
        verts.push(anchor + rim0);
        verts.push(anchor + rim1);
    }
    verts
}
