//! Light Animation Tests
//!
//! Tests for:
//! - Per-frame angle advance
//! - Orbit parameters and positions per light slot
//! - Determinism of frame-count-driven animation

use glam::Vec3;

use cornell::scene::light::{ANGLE_STEP, LightAnimator, NUM_LIGHTS, ORBIT_CENTER, Orbit};

const EPSILON: f32 = 1e-4;

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

#[test]
fn new_animator_starts_at_initial_angle() {
    let animator = LightAnimator::new(0.0);
    assert_eq!(animator.angle(), 0.0);
    assert_eq!(animator.frames(), 0);

    // Light 0 at angle 0: (0, 0.5, 0) + (0, 0.8, 3.0)
    assert!(approx_vec(animator.lights()[0].position, Vec3::new(0.0, 1.3, 3.0)));
}

#[test]
fn advance_steps_angle_once_per_frame() {
    let mut animator = LightAnimator::default();
    animator.advance();
    assert!((animator.angle() - ANGLE_STEP).abs() < 1e-7);
    assert_eq!(animator.frames(), 1);
}

#[test]
fn two_hundred_frames_reach_angle_one() {
    let animator = LightAnimator::at_frame(0.0, 200);
    assert!((animator.angle() - 1.0).abs() < EPSILON, "angle = {}", animator.angle());

    let expected = Vec3::new(3.0 * 0.5_f32.sin(), 1.3, 3.0 * 0.5_f32.cos());
    let light = animator.lights()[0];
    assert!(approx_vec(light.position, expected), "got {:?}", light.position);
    assert_eq!(light.color, Vec3::ONE);
}

#[test]
fn second_light_uses_its_own_orbit() {
    let animator = LightAnimator::at_frame(0.0, 200);
    let angle = animator.angle();

    // radius 3.2, height 0.9, speed 0.7, phase 1.2
    let theta = angle * 0.7 + 1.2;
    let expected = ORBIT_CENTER + Vec3::new(3.2 * theta.sin(), 0.9, 3.2 * theta.cos());
    assert!(approx_vec(animator.lights()[1].position, expected));
    assert_eq!(animator.lights()[1].color, Vec3::ONE);
}

#[test]
fn orbit_parameters_grow_with_slot() {
    let first = Orbit::for_light(0);
    let second = Orbit::for_light(1);

    assert_eq!(first.radius, 3.0);
    assert_eq!(first.phase, 0.0);
    assert!((second.radius - 3.2).abs() < 1e-6);
    assert!((second.height - 0.9).abs() < 1e-6);
    assert!((second.speed - 0.7).abs() < 1e-6);
    assert!((second.phase - 1.2).abs() < 1e-6);
}

#[test]
fn animation_is_reproducible() {
    let mut stepped = LightAnimator::new(0.25);
    for _ in 0..500 {
        stepped.advance();
    }
    let replayed = LightAnimator::at_frame(0.25, 500);

    assert_eq!(stepped.angle(), replayed.angle());
    assert_eq!(stepped.lights(), replayed.lights());
}

#[test]
fn lights_stay_on_their_orbit() {
    let animator = LightAnimator::at_frame(0.0, 1234);
    for (i, light) in animator.lights().iter().enumerate().take(NUM_LIGHTS) {
        let orbit = Orbit::for_light(i);
        let offset = light.position - ORBIT_CENTER;
        let horizontal = Vec3::new(offset.x, 0.0, offset.z).length();
        assert!((horizontal - orbit.radius).abs() < EPSILON);
        assert!((offset.y - orbit.height).abs() < EPSILON);
    }
}
