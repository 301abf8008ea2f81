use glam::Vec3;

use crate::constants::{
    COLOR_FLOOR, GOLDEN_ANGLE, POLE_FLATTEN_START, POLE_PLANAR_FALLOFF, POLE_Y_FLATTEN,
};
use crate::error::EngineError;

/// Static point-cloud sphere plus the per-frame buffers the deformation
/// engine rewrites. `original` is set once at build time and never touched
/// again; `current` and `colors` are overwritten in place every frame.
pub struct PointCloud {
    original: Vec<Vec3>,
    /// Spherical coordinates (lat, lon) of each original point, cached so
    /// the wave evaluation does not re-derive them every frame.
    spherical: Vec<[f32; 2]>,
    pub current: Vec<Vec3>,
    pub colors: Vec<[f32; 3]>,
}

/// Pole compression for a normalized height `y` in [-1, 1]. Returns the
/// planar-radius scale and the y-extent scale. Both are 1.0 inside the
/// flattening band and fall off cubically past it, so polar points compress
/// visually instead of thinning toward a single point.
#[inline]
pub fn pole_factors(y: f32) -> (f32, f32) {
    let past = y.abs() - POLE_FLATTEN_START;
    if past <= 0.0 {
        return (1.0, 1.0);
    }
    let t = (past / (1.0 - POLE_FLATTEN_START)).min(1.0);
    let falloff = t * t * t;
    let planar = 1.0 - POLE_PLANAR_FALLOFF * falloff;
    let y_scale = 1.0 + (POLE_Y_FLATTEN - 1.0) * falloff;
    (planar, y_scale)
}

impl PointCloud {
    /// Distribute `count` points over a sphere of radius `radius` along the
    /// golden-angle spiral. Deterministic; `count <= 1` is rejected because
    /// the height formula divides by `count - 1`.
    pub fn generate(count: usize, radius: f32) -> Result<Self, EngineError> {
        if count <= 1 {
            return Err(EngineError::PointCountTooSmall { got: count });
        }

        let mut original = Vec::with_capacity(count);
        let mut spherical = Vec::with_capacity(count);
        for i in 0..count {
            // y descends linearly from 1 to -1 over the spiral
            let y = 1.0 - 2.0 * i as f32 / (count - 1) as f32;
            let r_y = (1.0 - y * y).max(0.0).sqrt();
            let theta = i as f32 * GOLDEN_ANGLE;

            let (planar, y_scale) = pole_factors(y);
            let p = Vec3::new(
                theta.cos() * r_y * planar,
                y * y_scale,
                theta.sin() * r_y * planar,
            ) * radius;

            let len = p.length().max(f32::EPSILON);
            spherical.push([(p.y / len).clamp(-1.0, 1.0).acos(), p.z.atan2(p.x)]);
            original.push(p);
        }

        let current = original.clone();
        let colors = vec![[COLOR_FLOOR; 3]; count];
        Ok(Self {
            original,
            spherical,
            current,
            colors,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.original.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    #[inline]
    pub fn original(&self) -> &[Vec3] {
        &self.original
    }

    #[inline]
    pub fn spherical(&self) -> &[[f32; 2]] {
        &self.spherical
    }
}
