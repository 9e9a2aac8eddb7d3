//! Lighting Model Selection Tests
//!
//! Tests for:
//! - Key-to-model mapping
//! - Level-triggered selection while a key is held
//! - Precedence when several keys are held
//! - Simulation step ordering
//! - Camera aspect after a surface resize

use cornell::app::input::{ButtonState, Input, Key};
use cornell::scene::camera::Camera;
use cornell::scene::lighting::{LightingModel, LightingSelector};
use cornell::scene::state::SimulationState;

fn press(input: &mut Input, key: Key) {
    input.inject_key(key, ButtonState::Pressed);
}

fn release(input: &mut Input, key: Key) {
    input.inject_key(key, ButtonState::Released);
}

#[test]
fn starts_with_phong() {
    let selector = LightingSelector::default();
    assert_eq!(selector.current(), LightingModel::Phong);
    assert_eq!(selector.current().as_i32(), 0);
}

#[test]
fn held_key_selects_model() {
    let mut selector = LightingSelector::default();
    let mut input = Input::new();

    press(&mut input, Key::Key2);
    assert_eq!(selector.apply(&input).as_i32(), 1);

    release(&mut input, Key::Key2);
    press(&mut input, Key::Key1);
    assert_eq!(selector.apply(&input).as_i32(), 0);

    release(&mut input, Key::Key1);
    press(&mut input, Key::Key3);
    assert_eq!(selector.apply(&input), LightingModel::Lambert);
}

#[test]
fn selection_persists_after_release() {
    let mut selector = LightingSelector::default();
    let mut input = Input::new();

    press(&mut input, Key::Key3);
    selector.apply(&input);
    release(&mut input, Key::Key3);

    for _ in 0..10 {
        assert_eq!(selector.apply(&input), LightingModel::Lambert);
    }
}

#[test]
fn held_key_is_reapplied_every_frame() {
    let mut selector = LightingSelector::new(LightingModel::Lambert);
    let mut input = Input::new();
    press(&mut input, Key::Key2);

    for _ in 0..5 {
        assert_eq!(selector.apply(&input), LightingModel::BlinnPhong);
    }
}

#[test]
fn highest_numbered_key_wins() {
    let mut selector = LightingSelector::default();
    let mut input = Input::new();
    press(&mut input, Key::Key1);
    press(&mut input, Key::Key3);

    assert_eq!(selector.apply(&input), LightingModel::Lambert);
}

#[test]
fn unrelated_keys_are_ignored() {
    let mut selector = LightingSelector::new(LightingModel::BlinnPhong);
    let mut input = Input::new();
    press(&mut input, Key::Key4);
    press(&mut input, Key::Key0);

    assert_eq!(selector.apply(&input), LightingModel::BlinnPhong);
}

#[test]
fn release_all_forgets_held_keys() {
    let mut input = Input::new();
    press(&mut input, Key::Key2);
    input.release_all();
    assert!(!input.is_key_down(Key::Key2));
}

#[test]
fn model_discriminants_round_trip() {
    for model in LightingModel::ALL {
        assert_eq!(LightingModel::try_from(model.as_i32()), Ok(model));
    }
    assert_eq!(LightingModel::try_from(3), Err(3));
}

#[test]
fn simulation_step_animates_then_selects() {
    let mut state = SimulationState::new(Camera::cornell(800.0 / 600.0));
    let mut input = Input::new();
    press(&mut input, Key::Key2);

    state.step(&input);

    assert_eq!(state.animator.frames(), 1);
    assert_eq!(state.lighting_model(), LightingModel::BlinnPhong);
}

#[test]
fn resize_updates_camera_aspect() {
    let mut state = SimulationState::new(Camera::cornell(800.0 / 600.0));

    state.resize(1000, 500);
    assert_eq!(state.camera.aspect, 2.0);
    assert_eq!(
        state.camera.projection_matrix(),
        Camera::cornell(2.0).projection_matrix()
    );

    // Minimized windows report a zero size.
    state.resize(0, 500);
    assert_eq!(state.camera.aspect, 2.0);
}
