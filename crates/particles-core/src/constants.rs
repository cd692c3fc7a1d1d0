// Shared tuning constants for the particle field and its renderer.

// Field size
pub const DEFAULT_PARTICLE_COUNT: usize = 8000;

// Shape scale: scale = SCALE_BASE + SCALE_SPAN * expansion
pub const SCALE_BASE: f32 = 2.0;
pub const SCALE_SPAN: f32 = 3.0;

// Saturn: share of particles on the core sphere, the rest form the ring
pub const SATURN_CORE_FRACTION: f32 = 0.6;

// Per-frame smoothing (fixed per frame, not time-normalized)
pub const RELAX_RATE: f32 = 0.05; // current += (target - current) * rate
pub const COLOR_LERP_RATE: f32 = 0.05;

// "Swimming" shimmer: current[k] += sin(t * NOISE_TIME_FREQ + k) * NOISE_AMPLITUDE
pub const NOISE_AMPLITUDE: f32 = 0.005;
pub const NOISE_TIME_FREQ: f32 = 2.0;

// Whole-field rotation speeds (radians per second)
pub const ROTATION_SPEED_Y: f32 = 0.1;
pub const ROTATION_SPEED_X: f32 = 0.05;

// Classification cadence
pub const CAPTURE_INTERVAL_SECS: f32 = 4.0;

// Point sprites
pub const POINT_SIZE: f32 = 0.035; // world-space sprite edge length
pub const POINT_OPACITY: f32 = 0.8;

// Camera
pub const CAMERA_Z: f32 = 10.0;
pub const CAMERA_FOVY_DEGREES: f32 = 60.0;

// Background clear (#020205)
pub const CLEAR_COLOR: [f32; 3] = [0.008, 0.008, 0.02];

// Post-processing defaults
pub const BLOOM_THRESHOLD: f32 = 0.2;
pub const BLOOM_STRENGTH: f32 = 1.5;
pub const BLOOM_RADIUS: f32 = 0.4;
