// Target point clouds: counts, envelopes and the deterministic lattices.

use particles_core::*;

const EXPANSIONS: [f32; 4] = [0.0, 0.25, 0.5, 1.0];

fn points(buf: &[f32]) -> impl Iterator<Item = glam::Vec3> + '_ {
    buf.chunks_exact(3)
        .map(|p| glam::Vec3::new(p[0], p[1], p[2]))
}

#[test]
fn every_shape_fills_the_whole_buffer_with_finite_points() {
    let mut gen = ShapeGenerator::new(7);
    for shape in Shape::ALL {
        for e in EXPANSIONS {
            let buf = gen.generate_vec(shape, e, 1000);
            assert_eq!(buf.len(), 3000, "{shape} at {e}");
            assert!(buf.iter().all(|v| v.is_finite()), "{shape} at {e}");
        }
    }
}

#[test]
fn every_shape_stays_inside_its_bounding_radius() {
    let mut gen = ShapeGenerator::new(11);
    for shape in Shape::ALL {
        for e in EXPANSIONS {
            let limit = shape.bounding_radius(scale_for(e)) * 1.0001 + 1e-5;
            let buf = gen.generate_vec(shape, e, 2000);
            for p in points(&buf) {
                assert!(
                    p.length() <= limit,
                    "{shape} at {e}: {p:?} outside {limit}"
                );
            }
        }
    }
}

#[test]
fn sphere_points_lie_on_the_scaled_sphere() {
    let mut gen = ShapeGenerator::new(0);
    let buf = gen.generate_vec(Shape::Sphere, 0.5, 500);
    for p in points(&buf) {
        assert!((p.length() - 3.5).abs() < 1e-4, "{p:?}");
    }
}

#[test]
fn palm_at_full_expansion_is_a_radius_five_sphere() {
    let state = GestureState::from_json(
        r##"{"gesture":"palm","expansion":1.0,"color":"#00f2ff","shape":"sphere"}"##,
    );
    assert_eq!(state.scale(), 5.0);
    let mut gen = ShapeGenerator::new(3);
    let buf = gen.generate_vec(state.shape, state.expansion, 800);
    for p in points(&buf) {
        assert!((p.length() - 5.0).abs() < 1e-4, "{p:?}");
    }
}

#[test]
fn sphere_lattice_is_independent_of_the_seed() {
    let a = ShapeGenerator::new(1).generate_vec(Shape::Sphere, 0.3, 64);
    let b = ShapeGenerator::new(99).generate_vec(Shape::Sphere, 0.3, 64);
    assert_eq!(a, b);
}

#[test]
fn unknown_shape_name_renders_as_sphere() {
    let shape = Shape::from_name("bogus");
    assert_eq!(shape, Shape::Sphere);
    let a = ShapeGenerator::new(5).generate_vec(shape, 0.5, 100);
    let b = ShapeGenerator::new(5).generate_vec(Shape::Sphere, 0.5, 100);
    assert_eq!(a, b);
}

#[test]
fn saturn_splits_into_core_and_ring() {
    let count = 1000;
    let scale = scale_for(0.5);
    let buf = ShapeGenerator::new(21).generate_vec(Shape::Saturn, 0.5, count);
    let core = (count as f32 * SATURN_CORE_FRACTION) as usize;

    for (i, p) in points(&buf).enumerate() {
        if i < core {
            assert!((p.length() - scale * 0.5).abs() < 1e-4, "core {i}: {p:?}");
        } else {
            let planar = (p.x * p.x + p.z * p.z).sqrt();
            assert!(p.y.abs() <= 0.1 + 1e-6, "ring {i}: {p:?}");
            assert!(
                planar >= scale * 0.8 - 1e-4 && planar <= scale * 1.2 + 1e-4,
                "ring {i}: {p:?}"
            );
        }
    }
}

#[test]
fn fist_scenario_gives_a_small_core_and_ring() {
    let state = GestureState::from_json(
        r##"{"gesture":"fist","expansion":0.2,"color":"#ffd700","shape":"saturn"}"##,
    );
    assert_eq!(state.shape, Shape::Saturn);
    let count = 8000;
    let buf = ShapeGenerator::new(5).generate_vec(state.shape, state.expansion, count);
    let core = (count as f32 * SATURN_CORE_FRACTION) as usize;

    for (i, p) in points(&buf).enumerate() {
        let on_core = (p.length() - 1.3).abs() < 1e-4;
        let planar = (p.x * p.x + p.z * p.z).sqrt();
        let in_ring = p.y.abs() <= 0.1 + 1e-6 && (2.08 - 1e-4..=3.12 + 1e-4).contains(&planar);
        if i < core {
            assert!(on_core, "core {i}: {p:?}");
        } else {
            assert!(in_ring, "ring {i}: {p:?}");
        }
    }
}

#[test]
fn flower_radius_follows_four_petals() {
    for e in [0.0, 0.8] {
        let scale = scale_for(e);
        let buf = ShapeGenerator::new(31).generate_vec(Shape::Flower, e, 2000);
        for p in points(&buf) {
            assert!(p.z.abs() <= 0.25 * scale + 1e-5, "{p:?}");
            let planar = (p.x * p.x + p.y * p.y).sqrt();
            if planar < 1e-3 {
                continue;
            }
            let expected = scale * (4.0 * p.y.atan2(p.x)).sin().abs();
            assert!((planar - expected).abs() < 1e-3, "{p:?}: {planar} vs {expected}");
        }
    }
}

#[test]
fn star_alternates_outer_and_inner_sectors() {
    use std::f32::consts::{PI, TAU};
    let scale = scale_for(0.6);
    let sector = PI / 5.0;
    let buf = ShapeGenerator::new(37).generate_vec(Shape::Star, 0.6, 4000);
    let mut long_outer = 0;
    for p in points(&buf) {
        assert!(p.z.abs() <= 0.15 * scale + 1e-5, "{p:?}");
        let r = (p.x * p.x + p.y * p.y).sqrt();
        if r < 1e-4 {
            continue;
        }
        let angle = p.y.atan2(p.x).rem_euclid(TAU);
        let pos = angle / sector;
        if (pos - pos.round()).abs() < 1e-3 {
            continue;
        }
        if (pos.floor() as i64) % 2 == 0 {
            assert!(r <= 1.2 * scale + 1e-4, "outer sector {p:?}");
            if r > 0.4 * scale {
                long_outer += 1;
            }
        } else {
            assert!(r <= 0.4 * scale + 1e-4, "inner sector {p:?}");
        }
    }
    assert!(long_outer > 100, "{long_outer}");
}

#[test]
fn heart_points_lie_on_the_heart_curve() {
    let scale = scale_for(0.6) as f64;
    let k = 0.15 * scale;
    let buf = ShapeGenerator::new(41).generate_vec(Shape::Heart, 0.6, 2000);
    for p in points(&buf) {
        assert!((p.z as f64).abs() <= 2.5 * k + 1e-5, "{p:?}");
        let (x, y) = (p.x as f64 / k, p.y as f64 / k);
        // x = 16 sin^3 t, so sin t is recoverable; cos t up to sign
        let sin_t = (x / 16.0).cbrt().clamp(-1.0, 1.0);
        let cos_abs = (1.0 - sin_t * sin_t).max(0.0).sqrt();
        let matches = [cos_abs, -cos_abs].into_iter().any(|cos_t| {
            let t = sin_t.atan2(cos_t);
            let curve = 13.0 * t.cos()
                - 5.0 * (2.0 * t).cos()
                - 2.0 * (3.0 * t).cos()
                - (4.0 * t).cos();
            (curve - y).abs() < 0.05
        });
        assert!(matches, "{p:?} is off the curve");
    }
}

#[test]
fn spiral_points_sit_on_one_of_three_arms() {
    use std::f32::consts::{PI, TAU};
    let scale = scale_for(0.5);
    let buf = ShapeGenerator::new(43).generate_vec(Shape::Spiral, 0.5, 400);
    let jitter = 0.25 + 1e-2;
    for p in points(&buf) {
        assert!(p.y.abs() <= 0.15 * scale + 1e-5, "{p:?}");
        let planar = (p.x * p.x + p.z * p.z).sqrt();
        // r = 0.5 * t * scale, and the jitter moves the point at most 0.25*sqrt(2)
        let t_lo = ((planar - 0.36) * 2.0 / scale).max(0.0);
        let t_hi = ((planar + 0.36) * 2.0 / scale).min(4.0);
        let steps = ((t_hi - t_lo) / 1e-4).ceil() as usize;
        let on_arm = (0..3).any(|arm| {
            (0..=steps).any(|i| {
                let t = t_lo + i as f32 * 1e-4;
                let angle = t * PI + arm as f32 * TAU / 3.0;
                let r = t * scale * 0.5;
                (p.x - r * angle.cos()).abs() <= jitter && (p.z - r * angle.sin()).abs() <= jitter
            })
        });
        assert!(on_arm, "{p:?} is off every arm");
    }
}

#[test]
fn fireworks_radius_is_uniform_up_to_twice_the_scale() {
    let scale = scale_for(0.7);
    let n = 6000;
    let buf = ShapeGenerator::new(47).generate_vec(Shape::Fireworks, 0.7, n);
    let radii: Vec<f32> = points(&buf).map(|p| p.length()).collect();
    assert!(radii.iter().all(|r| *r < 2.0 * scale + 1e-4));
    let mean = radii.iter().sum::<f32>() / n as f32;
    assert!((mean - scale).abs() < 0.05 * scale, "mean {mean}");
    let beyond = radii.iter().filter(|r| **r > 1.5 * scale).count();
    assert!(beyond > n / 8, "{beyond}");
}

#[test]
fn seeded_generators_are_reproducible() {
    let a = ShapeGenerator::new(42).generate_vec(Shape::Heart, 0.6, 256);
    let b = ShapeGenerator::new(42).generate_vec(Shape::Heart, 0.6, 256);
    assert_eq!(a, b);
    let c = ShapeGenerator::new(43).generate_vec(Shape::Heart, 0.6, 256);
    assert_ne!(a, c);
}

#[test]
fn tiny_and_empty_fields_are_handled() {
    let mut gen = ShapeGenerator::new(8);
    for shape in Shape::ALL {
        assert!(gen.generate_vec(shape, 0.5, 0).is_empty());
        let one = gen.generate_vec(shape, 0.5, 1);
        assert_eq!(one.len(), 3);
        assert!(one.iter().all(|v| v.is_finite()), "{shape}");
    }
}

#[test]
fn generate_leaves_a_trailing_partial_triple_alone() {
    let mut out = vec![9.0f32; 7];
    ShapeGenerator::new(1).generate(Shape::Wave, 0.5, &mut out);
    assert_eq!(out[6], 9.0);
}

#[test]
fn wave_height_follows_the_surface() {
    let scale = scale_for(0.4);
    let buf = ShapeGenerator::new(13).generate_vec(Shape::Wave, 0.4, 300);
    for p in points(&buf) {
        let expected = (p.x * 2.0).sin() * (p.z * 2.0).cos() * scale * 0.5;
        assert!((p.y - expected).abs() < 1e-4, "{p:?}");
    }
}

#[test]
fn scale_grows_linearly_with_expansion() {
    assert_eq!(scale_for(0.0), 2.0);
    assert_eq!(scale_for(0.5), 3.5);
    assert_eq!(scale_for(1.0), 5.0);
    // not clamped
    assert_eq!(scale_for(2.0), 8.0);
}
