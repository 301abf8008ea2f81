//! Camera state and pointer-driven parallax.
//!
//! These types avoid referencing platform APIs and run unchanged on both
//! native and web targets. The front-ends feed raw pointer offsets in; the
//! engine steps the easing each frame.

use glam::{Mat4, Vec2, Vec3};

use crate::constants::{
    CAMERA_BREATH_AMP, CAMERA_BREATH_RATE, CAMERA_DISTANCE, CAMERA_FOVY, CAMERA_ZFAR,
    CAMERA_ZNEAR, FRAME_REF_DT, POINTER_EASE, POINTER_SENSITIVITY,
};

/// Right-handed perspective camera description.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Pointer offset from the surface center, plus the target value the
/// current offset eases toward. Events write `target` instantly; `ease`
/// moves `current` a fixed fraction of the gap each frame, so the camera
/// lags the pointer without ever overshooting.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    pub current: Vec2,
    pub target: Vec2,
}

impl PointerState {
    #[inline]
    pub fn set_target(&mut self, offset_px: Vec2) {
        self.target = offset_px * POINTER_SENSITIVITY;
    }

    #[inline]
    pub fn ease(&mut self, dt: f32) {
        let alpha = (POINTER_EASE * dt / FRAME_REF_DT).min(1.0);
        self.current += (self.target - self.current) * alpha;
    }
}

/// The engine camera: default orbit distance, a slow depth "breathing"
/// oscillation, and the eased pointer parallax. Always looks at the origin.
pub struct OrbitCamera {
    pub camera: Camera,
    pointer: PointerState,
    time: f32,
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            camera: Camera {
                eye: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
                target: Vec3::ZERO,
                up: Vec3::Y,
                aspect,
                fovy_radians: CAMERA_FOVY,
                znear: CAMERA_ZNEAR,
                zfar: CAMERA_ZFAR,
            },
            pointer: PointerState::default(),
            time: 0.0,
        }
    }

    /// Record a pointer position in surface pixels; the offset from the
    /// surface center becomes the new parallax target.
    pub fn pointer_moved(&mut self, x_px: f32, y_px: f32, width: f32, height: f32) {
        let offset = Vec2::new(x_px - width * 0.5, height * 0.5 - y_px);
        self.pointer.set_target(offset);
    }

    #[inline]
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    /// Ease toward the pointer target and breathe in depth.
    pub fn step(&mut self, dt: f32) {
        self.time += dt;
        self.pointer.ease(dt);
        self.camera.eye = Vec3::new(
            self.pointer.current.x,
            self.pointer.current.y,
            CAMERA_DISTANCE + (self.time * CAMERA_BREATH_RATE).sin() * CAMERA_BREATH_AMP,
        );
    }

    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.camera.eye
    }

    #[inline]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }
}
