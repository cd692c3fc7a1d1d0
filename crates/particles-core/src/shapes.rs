//! Procedural target point clouds for each [`Shape`].
//!
//! Every shape is a per-particle point function selected by an exhaustive
//! match on the shape tag. Sphere and the Saturn core are deterministic
//! lattices; the other shapes draw independent random samples per particle.

use crate::constants::{SATURN_CORE_FRACTION, SCALE_BASE, SCALE_SPAN};
use crate::gesture::Shape;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::{PI, TAU};

/// `scale = 2 + 3 * expansion`. Expansion is not clamped.
#[inline]
pub fn scale_for(expansion: f32) -> f32 {
    SCALE_BASE + SCALE_SPAN * expansion
}

/// Point `index` of an even `count`-point lattice on a sphere of `radius`.
///
/// `phi = acos(-1 + 2i/N)`, `theta = sqrt(N*pi) * phi`.
#[inline]
pub fn sphere_lattice_point(index: f32, count: f32, radius: f32) -> Vec3 {
    let phi = (-1.0 + 2.0 * index / count).clamp(-1.0, 1.0).acos();
    let theta = (count * PI).sqrt() * phi;
    Vec3::new(
        radius * theta.cos() * phi.sin(),
        radius * theta.sin() * phi.sin(),
        radius * phi.cos(),
    )
}

struct PointCtx<'a> {
    index: usize,
    count: usize,
    scale: f32,
    rng: &'a mut StdRng,
}

impl PointCtx<'_> {
    /// Uniform in `[0, 1)`.
    #[inline]
    fn unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform in `[-0.5, 0.5)`.
    #[inline]
    fn centered(&mut self) -> f32 {
        self.rng.gen::<f32>() - 0.5
    }

    #[inline]
    fn angle(&mut self) -> f32 {
        self.rng.gen::<f32>() * TAU
    }
}

type PointFn = fn(&mut PointCtx<'_>) -> Vec3;

fn point_fn(shape: Shape) -> PointFn {
    match shape {
        Shape::Sphere => sphere,
        Shape::Heart => heart,
        Shape::Flower => flower,
        Shape::Saturn => saturn,
        Shape::Fireworks => fireworks,
        Shape::Spiral => spiral,
        Shape::Star => star,
        Shape::Wave => wave,
    }
}

fn sphere(c: &mut PointCtx<'_>) -> Vec3 {
    sphere_lattice_point(c.index as f32, c.count as f32, c.scale)
}

fn heart(c: &mut PointCtx<'_>) -> Vec3 {
    let t = c.angle();
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    let z = c.centered() * 5.0;
    Vec3::new(x, y, z) * (c.scale * 0.15)
}

fn flower(c: &mut PointCtx<'_>) -> Vec3 {
    let t = c.angle();
    let r = (4.0 * t).sin() * c.scale;
    let z = c.centered() * c.scale * 0.5;
    Vec3::new(r * t.cos(), r * t.sin(), z)
}

fn saturn(c: &mut PointCtx<'_>) -> Vec3 {
    let core_count = c.count as f32 * SATURN_CORE_FRACTION;
    if (c.index as f32) < core_count {
        return sphere_lattice_point(c.index as f32, core_count, c.scale * 0.5);
    }
    // flat ring in the XZ plane
    let angle = c.angle();
    let dist = c.scale * (0.8 + c.unit() * 0.4);
    let y = c.centered() * 0.2;
    Vec3::new(dist * angle.cos(), y, dist * angle.sin())
}

fn fireworks(c: &mut PointCtx<'_>) -> Vec3 {
    let mag = c.unit() * c.scale * 2.0;
    let phi = c.angle();
    let theta = c.unit() * PI;
    Vec3::new(
        mag * theta.sin() * phi.cos(),
        mag * theta.sin() * phi.sin(),
        mag * theta.cos(),
    )
}

fn spiral(c: &mut PointCtx<'_>) -> Vec3 {
    let arm = c.rng.gen_range(0..3u32) as f32;
    let t = c.unit() * 4.0;
    let angle = t * PI + arm * TAU / 3.0;
    let r = t * c.scale * 0.5;
    let x = r * angle.cos() + c.centered() * 0.5;
    let y = c.centered() * 0.3 * c.scale;
    let z = r * angle.sin() + c.centered() * 0.5;
    Vec3::new(x, y, z)
}

fn star(c: &mut PointCtx<'_>) -> Vec3 {
    const POINTS: f32 = 5.0;
    let t = c.angle();
    let inner = c.scale * 0.4;
    let outer = c.scale * 1.2;
    // alternate outer/inner bands every pi/5 of angle
    let outer_band = ((t / (PI / POINTS)).floor() as i64) % 2 == 0;
    let band = if outer_band { outer } else { inner };
    let r = band * c.unit();
    let z = c.centered() * c.scale * 0.3;
    Vec3::new(r * t.cos(), r * t.sin(), z)
}

fn wave(c: &mut PointCtx<'_>) -> Vec3 {
    let x = c.centered() * c.scale * 3.0;
    let z = c.centered() * c.scale * 2.0;
    let y = (x * 2.0).sin() * (z * 2.0).cos() * c.scale * 0.5;
    Vec3::new(x, y, z)
}

/// Writes target positions for a shape and expansion.
///
/// Owns the RNG used by the stochastic shapes so a seeded generator yields
/// reproducible clouds.
pub struct ShapeGenerator {
    rng: StdRng,
}

impl ShapeGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fill `out` (packed `x, y, z` triples) with one target point per particle.
    ///
    /// The particle count is `out.len() / 3`; a trailing partial triple is
    /// left untouched.
    pub fn generate(&mut self, shape: Shape, expansion: f32, out: &mut [f32]) {
        let count = out.len() / 3;
        let point = point_fn(shape);
        let mut ctx = PointCtx {
            index: 0,
            count,
            scale: scale_for(expansion),
            rng: &mut self.rng,
        };
        for (i, xyz) in out.chunks_exact_mut(3).enumerate() {
            ctx.index = i;
            let p = point(&mut ctx);
            xyz.copy_from_slice(&p.to_array());
        }
    }

    /// Allocate and fill a fresh `3 * count` target buffer.
    pub fn generate_vec(&mut self, shape: Shape, expansion: f32, count: usize) -> Vec<f32> {
        let mut out = vec![0.0; count * 3];
        self.generate(shape, expansion, &mut out);
        out
    }
}
