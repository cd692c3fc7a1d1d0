//! Visual-side state types shared with the renderer.
//!
//! These types avoid referencing platform-specific APIs. The native frontend
//! consumes them to build camera matrices and to parameterise the bloom pass.

use crate::constants::{
    BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD, CAMERA_FOVY_DEGREES, CAMERA_Z,
};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
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
    /// Looks at the origin from `+z`, framing the whole particle field.
    pub fn looking_at_field(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Bloom post-process tuning.
///
/// `threshold` is the luminance above which pixels bloom, `strength` scales
/// the blurred contribution in the composite, `radius` widens the blur taps.
#[derive(Clone, Debug)]
pub struct BloomParams {
    pub threshold: f32,
    pub strength: f32,
    pub radius: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            threshold: BLOOM_THRESHOLD,
            strength: BLOOM_STRENGTH,
            radius: BLOOM_RADIUS,
        }
    }
}
