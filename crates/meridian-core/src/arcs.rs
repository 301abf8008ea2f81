use glam::Vec3;

use crate::constants::{
    ARC_CYCLE, ARC_DRAW_END, ARC_DRAW_TRAIL, ARC_FADE_END, ARC_FADE_TRAIL, ARC_HOLD_END,
    ARC_LIFT, ARC_OFFSET_STEP, ARC_SAMPLES, ARC_TIME_SCALE, VISIBILITY_DOT_MIN,
};

/// Where in its pulse cycle an arc currently is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArcPhase {
    Draw,
    Hold,
    Fade,
    Off,
}

#[inline]
pub fn phase_of(progress: f32) -> ArcPhase {
    if progress <= ARC_DRAW_END {
        ArcPhase::Draw
    } else if progress <= ARC_HOLD_END {
        ArcPhase::Hold
    } else if progress <= ARC_FADE_END {
        ArcPhase::Fade
    } else {
        ArcPhase::Off
    }
}

/// Brightness of the sample at path fraction `s` for a cycle at `progress`.
///
/// Draw sweeps a head from start to end with a squared fade over the
/// trailing ARC_DRAW_TRAIL of path; hold lights everything; fade sweeps a
/// tail erasing from the start with a squared edge of ARC_FADE_TRAIL; off
/// is dark. The squared exponent is what gives the comet pacing; a linear
/// edge reads visibly different.
pub fn sample_brightness(progress: f32, s: f32) -> f32 {
    match phase_of(progress) {
        ArcPhase::Draw => {
            let head = progress / ARC_DRAW_END;
            if s > head {
                0.0
            } else if s <= head - ARC_DRAW_TRAIL {
                1.0
            } else {
                let edge = (head - s) / ARC_DRAW_TRAIL;
                edge * edge
            }
        }
        ArcPhase::Hold => 1.0,
        ArcPhase::Fade => {
            let tail = (progress - ARC_HOLD_END) / (ARC_FADE_END - ARC_HOLD_END);
            if s <= tail {
                0.0
            } else if s >= tail + ARC_FADE_TRAIL {
                1.0
            } else {
                let edge = (s - tail) / ARC_FADE_TRAIL;
                edge * edge
            }
        }
        ArcPhase::Off => 0.0,
    }
}

/// Camera-facing test shared by arc endpoints and labels. `world` is the
/// marker position under the current group rotation.
#[inline]
pub fn endpoint_visible(world: Vec3, eye: Vec3) -> bool {
    let camera_dir = (eye - world).normalize_or_zero();
    let normal = world.normalize_or_zero();
    camera_dir.dot(normal) > VISIBILITY_DOT_MIN
}

/// An animated great-circle arc between two cities. The sample polyline is
/// built once; only the per-sample brightness and the visibility flag
/// change during the loop.
pub struct FlightArc {
    pub cities: (usize, usize),
    /// Phase stagger so connections do not pulse in lockstep.
    pub offset: f32,
    samples: Vec<Vec3>,
    brightness: Vec<f32>,
    pub visible: bool,
}

impl FlightArc {
    /// Build the arc for the `index`-th connection between the two marker
    /// anchors (sphere-local, at marker radius). The path is a quadratic
    /// Bezier through a midpoint lifted outward to suggest a great circle.
    pub fn new(index: usize, cities: (usize, usize), a: Vec3, b: Vec3, sphere_radius: f32) -> Self {
        let control = ((a + b) * 0.5).normalize_or_zero() * sphere_radius * ARC_LIFT;
        let mut samples = Vec::with_capacity(ARC_SAMPLES);
        for i in 0..ARC_SAMPLES {
            let t = i as f32 / (ARC_SAMPLES - 1) as f32;
            let u = 1.0 - t;
            samples.push(a * (u * u) + control * (2.0 * u * t) + b * (t * t));
        }
        Self {
            cities,
            offset: index as f32 * ARC_OFFSET_STEP,
            samples,
            brightness: vec![0.0; ARC_SAMPLES],
            visible: false,
        }
    }

    #[inline]
    pub fn progress(&self, time: f32) -> f32 {
        ((time * ARC_TIME_SCALE + self.offset) % ARC_CYCLE) / ARC_CYCLE
    }

    /// Recompute every sample's brightness for the current time.
    pub fn update_brightness(&mut self, time: f32) {
        let progress = self.progress(time);
        let last = (self.samples.len() - 1) as f32;
        for (i, level) in self.brightness.iter_mut().enumerate() {
            *level = sample_brightness(progress, i as f32 / last);
        }
    }

    /// Gate the arc on both endpoint markers being camera-facing, given
    /// their positions under the current group rotation. No partial draws:
    /// one hidden endpoint hides the whole arc for the frame.
    pub fn update_visibility(&mut self, world_a: Vec3, world_b: Vec3, eye: Vec3) {
        self.visible = endpoint_visible(world_a, eye) && endpoint_visible(world_b, eye);
    }

    #[inline]
    pub fn samples(&self) -> &[Vec3] {
        &self.samples
    }

    #[inline]
    pub fn brightness(&self) -> &[f32] {
        &self.brightness
    }
}
