//! Orbiting point lights.
//!
//! Each light circles a fixed center on its own radius, height, speed and
//! phase. The shared orbit angle advances by [`ANGLE_STEP`] once per rendered
//! frame, so light positions depend only on how many frames have been drawn.

use glam::Vec3;

/// Number of point lights in the scene.
pub const NUM_LIGHTS: usize = 2;

/// Orbit angle advance per rendered frame.
pub const ANGLE_STEP: f32 = 0.005;

/// Point every orbit is centered on.
pub const ORBIT_CENTER: Vec3 = Vec3::new(0.0, 0.5, 0.0);

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: ORBIT_CENTER,
            color: Vec3::ONE,
        }
    }
}

/// Orbit parameters of the light at a given slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    pub height: f32,
    pub speed: f32,
    pub phase: f32,
}

impl Orbit {
    #[must_use]
    pub fn for_light(index: usize) -> Self {
        let i = index as f32;
        Self {
            radius: 3.0 + i * 0.2,
            height: 0.8 + i * 0.1,
            speed: 0.5 + i * 0.2,
            phase: i * 1.2,
        }
    }

    /// Position on this orbit for the given shared angle.
    #[must_use]
    pub fn position(&self, angle: f32) -> Vec3 {
        let theta = angle * self.speed + self.phase;
        ORBIT_CENTER
            + Vec3::new(
                self.radius * theta.sin(),
                self.height,
                self.radius * theta.cos(),
            )
    }
}

/// Advances the orbit angle and keeps the light array in sync with it.
#[derive(Debug, Clone)]
pub struct LightAnimator {
    angle: f32,
    frames: u64,
    lights: [Light; NUM_LIGHTS],
}

impl Default for LightAnimator {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl LightAnimator {
    /// Creates an animator at `initial_angle` with no frames elapsed.
    ///
    /// The light array holds the positions for `initial_angle` right away.
    #[must_use]
    pub fn new(initial_angle: f32) -> Self {
        let mut animator = Self {
            angle: initial_angle,
            frames: 0,
            lights: [Light::default(); NUM_LIGHTS],
        };
        animator.update_lights();
        animator
    }

    /// Replays `frames` steps from `initial_angle`.
    #[must_use]
    pub fn at_frame(initial_angle: f32, frames: u64) -> Self {
        let mut animator = Self::new(initial_angle);
        for _ in 0..frames {
            animator.advance();
        }
        animator
    }

    /// Steps the angle once and recomputes every light position.
    pub fn advance(&mut self) {
        self.angle += ANGLE_STEP;
        self.frames += 1;
        self.update_lights();
    }

    fn update_lights(&mut self) {
        for (i, light) in self.lights.iter_mut().enumerate() {
            light.position = Orbit::for_light(i).position(self.angle);
            light.color = Vec3::ONE;
        }
    }

    #[inline]
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    #[must_use]
    pub fn lights(&self) -> &[Light; NUM_LIGHTS] {
        &self.lights
    }
}
