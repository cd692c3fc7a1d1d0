// Per-frame relaxation, shimmer, rotation and color blending.

use particles_core::*;
use proptest::prelude::*;
use std::sync::Arc;

fn quiet_params() -> AnimatorParams {
    AnimatorParams {
        noise_amplitude: 0.0,
        ..AnimatorParams::default()
    }
}

fn setup(count: usize, state: &GestureState) -> (Arc<TargetSlot>, ParticleAnimator) {
    let slot = Arc::new(TargetSlot::new(count));
    let mut director = TargetDirector::new(Arc::clone(&slot), ShapeGenerator::new(17));
    director.apply(state).unwrap();
    let animator = ParticleAnimator::new(Arc::clone(&slot), quiet_params());
    (slot, animator)
}

#[test]
fn relax_is_a_fixed_point_at_the_target() {
    let target = vec![1.0, -2.0, 3.5, 0.0, 0.25, -7.0];
    let mut current = target.clone();
    relax(&mut current, &target, RELAX_RATE);
    assert_eq!(current, target);
}

#[test]
fn relax_moves_a_fraction_of_the_way() {
    let mut current = vec![0.0, 10.0];
    relax(&mut current, &[10.0, 0.0], 0.05);
    assert!((current[0] - 0.5).abs() < 1e-6);
    assert!((current[1] - 9.5).abs() < 1e-6);
}

proptest! {
    #[test]
    fn relax_never_moves_away_from_the_target(
        c in -100.0f32..100.0,
        t in -100.0f32..100.0,
        rate in 0.001f32..1.0,
    ) {
        let mut current = [c];
        relax(&mut current, &[t], rate);
        let before = (t - c).abs();
        let after = (t - current[0]).abs();
        prop_assert!(after <= before + 1e-4, "{before} -> {after}");
    }
}

#[test]
fn noise_is_bounded_by_its_amplitude() {
    let mut buf = vec![0.0f32; 300];
    apply_noise(&mut buf, 12.3, NOISE_TIME_FREQ, NOISE_AMPLITUDE);
    assert!(buf.iter().all(|v| v.abs() <= NOISE_AMPLITUDE + 1e-7));
    assert!(buf.iter().any(|v| *v != 0.0));

    let mut silent = vec![1.0f32; 30];
    apply_noise(&mut silent, 1.0, NOISE_TIME_FREQ, 0.0);
    assert!(silent.iter().all(|v| *v == 1.0));
}

#[test]
fn particles_start_at_the_origin_in_white() {
    let slot = Arc::new(TargetSlot::new(50));
    let animator = ParticleAnimator::new(slot, AnimatorParams::default());
    assert_eq!(animator.particle_count(), 50);
    assert!(animator.positions().iter().all(|v| *v == 0.0));
    assert_eq!(animator.color().current, Rgb::WHITE);
    assert_eq!(animator.rotation(), Rotation::default());
}

#[test]
fn buffers_keep_their_length_across_steps() {
    let (_slot, mut animator) = setup(120, &GestureState::initial());
    for i in 0..20 {
        animator.step(i as f32 / 60.0, 1.0 / 60.0);
    }
    assert_eq!(animator.positions().len(), 360);
    assert_eq!(animator.velocity().len(), 360);
    assert_eq!(animator.frame().particle_count(), 120);
}

#[test]
fn stepping_never_touches_the_published_targets() {
    let state = demo_sequence()[1].clone();
    let (slot, mut animator) = setup(200, &state);
    let before = slot.snapshot().field.positions().to_vec();
    for i in 0..100 {
        animator.step(i as f32 * 0.016, 0.016);
    }
    assert_eq!(slot.snapshot().field.positions(), before.as_slice());
}

#[test]
fn positions_converge_on_the_targets() {
    let state = demo_sequence()[0].clone();
    let (slot, mut animator) = setup(300, &state);
    for i in 0..600 {
        animator.step(i as f32 * 0.016, 0.016);
    }
    let targets = slot.snapshot();
    for (c, t) in animator.positions().iter().zip(targets.field.positions()) {
        assert!((c - t).abs() < 1e-3, "{c} vs {t}");
    }
}

#[test]
fn color_eases_toward_the_target() {
    let red = GestureState::new(Gesture::One, 0.5, Rgb::new(1.0, 0.0, 0.0), Shape::Heart);
    let (_slot, mut animator) = setup(10, &red);

    animator.step(0.0, 0.016);
    let first = animator.color().current;
    assert!((first.r - 1.0).abs() < 1e-6);
    assert!((first.g - 0.95).abs() < 1e-6);
    assert_eq!(animator.color().target, red.color);

    for _ in 0..500 {
        animator.step(0.0, 0.016);
    }
    let c = animator.frame().color;
    assert!(c.g.abs() < 1e-3 && c.b.abs() < 1e-3, "{c:?}");
}

#[test]
fn rotation_accumulates_with_frame_time() {
    let (_slot, mut animator) = setup(4, &GestureState::initial());
    animator.step(0.5, 0.5);
    animator.step(1.0, 0.5);
    let r = animator.rotation();
    assert!((r.y - ROTATION_SPEED_Y).abs() < 1e-6);
    assert!((r.x - ROTATION_SPEED_X).abs() < 1e-6);
}

#[test]
fn frame_follows_the_latest_generation() {
    let slot = Arc::new(TargetSlot::new(16));
    let mut director = TargetDirector::new(Arc::clone(&slot), ShapeGenerator::new(2));
    let mut animator = ParticleAnimator::new(Arc::clone(&slot), quiet_params());

    animator.step(0.0, 0.016);
    assert_eq!(animator.frame().generation, 0);
    assert_eq!(animator.frame().gesture, Gesture::None);

    let fist = demo_sequence()[2].clone();
    director.apply(&fist).unwrap();
    animator.step(0.016, 0.016);
    let frame = animator.frame();
    assert_eq!(frame.generation, 1);
    assert_eq!(frame.gesture, Gesture::Fist);
}

#[test]
fn rotation_matrix_is_identity_at_rest() {
    let m = Rotation::default().matrix();
    assert!(m.abs_diff_eq(glam::Mat4::IDENTITY, 1e-6));
}

#[test]
fn shimmer_phase_survives_long_uptimes() {
    let day = 86_400.123_f64;
    let t = shimmer_time(day, NOISE_TIME_FREQ);
    assert!((0.0..std::f32::consts::PI + 1e-6).contains(&t), "{t}");

    let mut wrapped = vec![0.0f32; 60];
    apply_noise(&mut wrapped, t, NOISE_TIME_FREQ, 1.0);
    for (k, v) in wrapped.iter().enumerate() {
        let exact = (day * f64::from(NOISE_TIME_FREQ) + k as f64).sin() as f32;
        assert!((v - exact).abs() < 1e-4, "k={k}: {v} vs {exact}");
    }
}

#[test]
fn shimmer_time_is_identity_inside_the_first_period() {
    assert_eq!(shimmer_time(1.25, 2.0), 1.25);
    assert_eq!(shimmer_time(42.0, 0.0), 0.0);
}
