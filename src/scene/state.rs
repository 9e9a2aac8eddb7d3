use crate::app::input::Input;
use crate::scene::camera::Camera;
use crate::scene::light::{Light, LightAnimator, NUM_LIGHTS};
use crate::scene::lighting::{LightingModel, LightingSelector};

/// Everything that changes (or could change) between frames.
///
/// Owned by the application loop and passed by reference to the per-frame
/// update and to the renderer.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub camera: Camera,
    pub animator: LightAnimator,
    pub selector: LightingSelector,
}

impl SimulationState {
    #[must_use]
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            animator: LightAnimator::default(),
            selector: LightingSelector::default(),
        }
    }

    /// Per-frame update: advance the lights, then sample the selection keys.
    pub fn step(&mut self, input: &Input) {
        self.animator.advance();
        self.selector.apply(input);
    }

    /// Matches the camera to a new surface size. Zero-sized surfaces
    /// (minimized windows) keep the previous aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    #[inline]
    #[must_use]
    pub fn lighting_model(&self) -> LightingModel {
        self.selector.current()
    }

    #[inline]
    #[must_use]
    pub fn lights(&self) -> &[Light; NUM_LIGHTS] {
        self.animator.lights()
    }
}
