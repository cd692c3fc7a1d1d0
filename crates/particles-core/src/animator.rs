//! Per-frame particle animation.
//!
//! The animator owns the rendered positions and color. Each frame it relaxes
//! positions toward the published targets, overlays a small per-index
//! shimmer, blends the color and advances the field rotation. It only ever
//! reads the [`TargetSlot`], so targets may jump between frames while the
//! rendered field still moves continuously.

use crate::color::Rgb;
use crate::constants::{
    COLOR_LERP_RATE, NOISE_AMPLITUDE, NOISE_TIME_FREQ, RELAX_RATE, ROTATION_SPEED_X,
    ROTATION_SPEED_Y,
};
use crate::gesture::Gesture;
use crate::targets::TargetSlot;
use glam::Mat4;
use std::sync::Arc;

/// Per-frame smoothing parameters. Rates are per frame, not per second.
#[derive(Clone, Debug)]
pub struct AnimatorParams {
    pub relax_rate: f32,
    pub color_lerp_rate: f32,
    pub noise_amplitude: f32,
    pub noise_time_freq: f32,
    /// Radians per second around the horizontal (x) axis.
    pub rotation_speed_x: f32,
    /// Radians per second around the vertical (y) axis.
    pub rotation_speed_y: f32,
}

impl Default for AnimatorParams {
    fn default() -> Self {
        Self {
            relax_rate: RELAX_RATE,
            color_lerp_rate: COLOR_LERP_RATE,
            noise_amplitude: NOISE_AMPLITUDE,
            noise_time_freq: NOISE_TIME_FREQ,
            rotation_speed_x: ROTATION_SPEED_X,
            rotation_speed_y: ROTATION_SPEED_Y,
        }
    }
}

/// Accumulated rigid rotation of the whole field, applied at render time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
}

impl Rotation {
    pub fn advance(&mut self, dt: f32, speed_x: f32, speed_y: f32) {
        self.x += dt * speed_x;
        self.y += dt * speed_y;
    }

    /// Model matrix, x applied after y (Euler XYZ).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.x) * Mat4::from_rotation_y(self.y)
    }
}

/// Rendered color and the color it is easing toward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorState {
    pub current: Rgb,
    pub target: Rgb,
}

impl ColorState {
    pub fn new(current: Rgb) -> Self {
        Self {
            current,
            target: current,
        }
    }

    pub fn step(&mut self, rate: f32) {
        self.current = self.current.lerp(self.target, rate);
    }
}

/// `current[k] += (target[k] - current[k]) * rate` for every k.
pub fn relax(current: &mut [f32], target: &[f32], rate: f32) {
    debug_assert_eq!(current.len(), target.len());
    for (c, t) in current.iter_mut().zip(target) {
        let diff = t - *c;
        *c += diff * rate;
    }
}

/// `current[k] += sin(elapsed * time_freq + k) * amplitude` for every k.
pub fn apply_noise(current: &mut [f32], elapsed: f32, time_freq: f32, amplitude: f32) {
    let phase = elapsed * time_freq;
    for (k, c) in current.iter_mut().enumerate() {
        *c += (phase + k as f32).sin() * amplitude;
    }
}

/// Wall-clock seconds folded into one shimmer period (`2π / time_freq`).
///
/// `sin(elapsed * time_freq + k)` is unchanged, but the value stays small
/// enough for f32 after long uptimes.
pub fn shimmer_time(elapsed_secs: f64, time_freq: f32) -> f32 {
    if time_freq == 0.0 || !time_freq.is_finite() {
        return 0.0;
    }
    let period = std::f64::consts::TAU / f64::from(time_freq.abs());
    elapsed_secs.rem_euclid(period) as f32
}

/// What the renderer draws this frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderFrame<'a> {
    /// Packed `x, y, z` per particle, before rotation.
    pub positions: &'a [f32],
    pub color: Rgb,
    pub rotation: Rotation,
    pub gesture: Gesture,
    pub generation: u64,
}

impl RenderFrame<'_> {
    pub fn particle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

pub struct ParticleAnimator {
    slot: Arc<TargetSlot>,
    params: AnimatorParams,
    current: Vec<f32>,
    // reserved for velocity-based motion; kept the same length as `current`
    velocity: Vec<f32>,
    color: ColorState,
    rotation: Rotation,
    gesture: Gesture,
    generation: u64,
}

impl ParticleAnimator {
    /// All particles start at the origin with a white color.
    pub fn new(slot: Arc<TargetSlot>, params: AnimatorParams) -> Self {
        let len = slot.particle_count() * 3;
        Self {
            slot,
            params,
            current: vec![0.0; len],
            velocity: vec![0.0; len],
            color: ColorState::new(Rgb::WHITE),
            rotation: Rotation::default(),
            gesture: Gesture::None,
            generation: 0,
        }
    }

    pub fn params(&self) -> &AnimatorParams {
        &self.params
    }

    pub fn positions(&self) -> &[f32] {
        &self.current
    }

    pub fn velocity(&self) -> &[f32] {
        &self.velocity
    }

    pub fn color(&self) -> ColorState {
        self.color
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn particle_count(&self) -> usize {
        self.current.len() / 3
    }

    /// Advance one display frame. `elapsed` is wall-clock seconds since
    /// start, `dt` the seconds since the previous frame.
    pub fn step(&mut self, elapsed: f32, dt: f32) {
        let targets = self.slot.load();
        let p = &self.params;

        self.color.target = targets.color;
        self.color.step(p.color_lerp_rate);

        relax(&mut self.current, targets.field.positions(), p.relax_rate);
        apply_noise(
            &mut self.current,
            elapsed,
            p.noise_time_freq,
            p.noise_amplitude,
        );

        self.rotation
            .advance(dt, p.rotation_speed_x, p.rotation_speed_y);

        if targets.generation != self.generation {
            log::debug!(
                "[animator] following gen={} ({})",
                targets.generation,
                targets.gesture
            );
            self.generation = targets.generation;
            self.gesture = targets.gesture;
        }
    }

    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            positions: &self.current,
            color: self.color.current,
            rotation: self.rotation,
            gesture: self.gesture,
            generation: self.generation,
        }
    }
}
