// Shared globe tuning constants used by both web and native frontends.
// They express intended behavior (wave amplitudes, phase boundaries, easing
// factors) and keep magic numbers out of the frame code.

// Angle between successive points of the golden-angle spiral, PI * (3 - sqrt(5))
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

// Sphere build parameters
pub const SPHERE_RADIUS: f32 = 20.0;
pub const DEFAULT_POINT_COUNT: usize = 2600;

// Latitude band where the spiral starts compressing toward the poles
pub const POLE_FLATTEN_START: f32 = 0.65;
// Planar radius lost at the pole itself (cubic falloff from the band edge)
pub const POLE_PLANAR_FALLOFF: f32 = 0.35;
// Vertical extent of the flattened cap relative to the full radius
pub const POLE_Y_FLATTEN: f32 = 0.92;

// Markers sit just inside the nominal surface so discs read as flush
pub const MARKER_RADIUS: f32 = 19.8;
pub const MARKER_DISC_RADIUS: f32 = 0.35;
pub const MARKER_DISC_SEGMENTS: usize = 16;

// Surface deformation
// Master scale applied to the summed wave terms; keeps the radial band
// within roughly +-11% of the rest radius while no impulse is active
pub const DEFORM_SCALE: f32 = 0.012;
pub const IMPULSE_WAVE_GAIN: f32 = 12.0;
// Linear decay per 60 Hz frame; an impulse is negligible after ~56 frames
pub const IMPULSE_DECAY_PER_FRAME: f32 = 0.018;

// Grayscale brightness band for the point cloud
pub const COLOR_FLOOR: f32 = 0.03;
pub const COLOR_CEIL: f32 = 0.65;

// Rigid sphere rotation (radians, seconds)
pub const YAW_RATE: f32 = 0.1;
pub const PITCH_WOBBLE_AMP: f32 = 0.06;
pub const PITCH_WOBBLE_RATE: f32 = 0.3;

// Flight arcs
pub const ARC_SAMPLES: usize = 60;
// Midpoint lift over the nominal radius that suggests a great-circle path
pub const ARC_LIFT: f32 = 1.15;
pub const ARC_CYCLE: f32 = 6.0;
pub const ARC_TIME_SCALE: f32 = 0.4;
// Per-connection phase stagger so arcs do not pulse in lockstep
pub const ARC_OFFSET_STEP: f32 = 2.5;
// Phase boundaries in normalized cycle progress
pub const ARC_DRAW_END: f32 = 0.25;
pub const ARC_HOLD_END: f32 = 0.30;
pub const ARC_FADE_END: f32 = 0.50;
// Squared-falloff edge lengths, as fractions of the path
pub const ARC_DRAW_TRAIL: f32 = 0.2;
pub const ARC_FADE_TRAIL: f32 = 0.25;
// Markers a little past the visual horizon still count as facing the
// camera, which softens the arc reveal at the limb
pub const VISIBILITY_DOT_MIN: f32 = -0.2;

// Camera
pub const CAMERA_DISTANCE: f32 = 52.0;
pub const CAMERA_BREATH_AMP: f32 = 1.2;
pub const CAMERA_BREATH_RATE: f32 = 0.5;
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
// Pointer offset (pixels from surface center) to world units
pub const POINTER_SENSITIVITY: f32 = 0.012;
// Exponential smoothing factor per reference frame; current chases target
pub const POINTER_EASE: f32 = 0.05;

// Reference step for rates the animation states per frame
pub const FRAME_REF_DT: f32 = 1.0 / 60.0;

// Rendered point size in world units (billboarded quads)
pub const POINT_SPRITE_SCALE: f32 = 0.11;
