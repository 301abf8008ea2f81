use crate::constants::{
    COLOR_CEIL, COLOR_FLOOR, DEFORM_SCALE, FRAME_REF_DT, IMPULSE_DECAY_PER_FRAME,
    IMPULSE_WAVE_GAIN,
};
use crate::geometry::PointCloud;

/// Continuous surface animation: every frame each point's radius and
/// brightness are recomputed from elapsed time and the point's spherical
/// coordinates. The displacement is a sum of many low-amplitude periodic
/// terms at different spatial and temporal frequencies; no single term
/// dominates, the visible richness comes from their interference.
pub struct SurfaceWaves {
    time: f32,
    impulse: f32,
}

impl Default for SurfaceWaves {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceWaves {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            impulse: 0.0,
        }
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn impulse(&self) -> f32 {
        self.impulse
    }

    /// Kick the transient impulse to full strength. Fired on click; the
    /// impulse then decays linearly back to zero and never re-arms itself.
    pub fn trigger_impulse(&mut self) {
        self.impulse = 1.0;
    }

    /// Advance the clock and decay any active impulse. The decay constant
    /// is stated per 60 Hz frame, so it is rescaled by the actual step.
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
        if self.impulse > 0.0 {
            self.impulse = (self.impulse - IMPULSE_DECAY_PER_FRAME * dt / FRAME_REF_DT).max(0.0);
        }
    }

    /// Radial scale for a point at (lat, lon), always close to 1.0.
    pub fn deform_factor(&self, lat: f32, lon: f32) -> f32 {
        let t = self.time;

        // radial waves over latitude at staggered frequencies and phases
        let mut sum = (t * 1.2 + lat * 4.0).sin();
        sum += (t * 1.7 + lat * 7.0 + 1.3).sin();
        sum += (t * 0.8 + lat * 2.5 + 2.1).sin();

        // horizontal waves over longitude, weighted toward the equator/poles
        sum += (t * 1.1 + lon * 3.0).sin() * lat.cos();
        sum += (t * 1.4 + lon * 5.0).cos() * lat.sin();

        // spirals coupling lat and lon with opposite signs
        sum += (lat * 3.0 + lon * 2.0 + t * 0.9).sin();
        sum += (lat * 3.0 - lon * 2.0 + t * 1.3).sin();

        // counter-rotating terms; negated time reads as interference drift
        sum += (lat * 5.0 - t * 1.5).sin();
        sum += (lon * 4.0 - t * 1.05).cos();

        if self.impulse > 0.0 {
            sum += (t * 8.0 + lat * 5.0).sin() * self.impulse * IMPULSE_WAVE_GAIN;
        }

        1.0 + sum * DEFORM_SCALE
    }

    /// Grayscale brightness for a point at (lat, lon), inside the visible
    /// band [COLOR_FLOOR, COLOR_CEIL].
    pub fn brightness(&self, lat: f32, lon: f32) -> f32 {
        let t = self.time;
        let mut v = (t * 0.7 + lat * 3.0).cos();
        v += (t * 1.3 + lon * 2.0).sin();
        v += (t * 0.45 + lat * 2.0 - lon * 1.5).cos();
        v += (t * 1.9 + lat * 4.0).sin();
        let unit = (v / 4.0) * 0.5 + 0.5;
        COLOR_FLOOR + unit * (COLOR_CEIL - COLOR_FLOOR)
    }

    /// Rewrite the cloud's `current` and `colors` buffers in place from the
    /// immutable originals. No allocation happens here.
    pub fn apply(&self, cloud: &mut PointCloud) {
        for i in 0..cloud.len() {
            let [lat, lon] = cloud.spherical()[i];
            let factor = self.deform_factor(lat, lon);
            let original = cloud.original()[i];
            cloud.current[i] = original * factor;
            let level = self.brightness(lat, lon);
            cloud.colors[i] = [level; 3];
        }
    }
}
