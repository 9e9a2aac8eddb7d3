use crate::app::input::{Input, Key};

/// Shading formula evaluated by the fragment stage.
///
/// The discriminant is the `lightingModel` value the shader receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum LightingModel {
    /// Reflection-vector specular.
    #[default]
    Phong = 0,
    /// Half-vector specular.
    BlinnPhong = 1,
    /// Diffuse only.
    Lambert = 2,
}

impl LightingModel {
    pub const ALL: [LightingModel; 3] = [Self::Phong, Self::BlinnPhong, Self::Lambert];

    #[inline]
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// The key that selects this model.
    #[must_use]
    pub fn key(self) -> Key {
        match self {
            Self::Phong => Key::Key1,
            Self::BlinnPhong => Key::Key2,
            Self::Lambert => Key::Key3,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Phong => "Phong",
            Self::BlinnPhong => "Blinn-Phong",
            Self::Lambert => "Lambert",
        }
    }
}

impl TryFrom<i32> for LightingModel {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Phong),
            1 => Ok(Self::BlinnPhong),
            2 => Ok(Self::Lambert),
            other => Err(other),
        }
    }
}

/// Maps held keys to a lighting model, once per frame.
///
/// Level-triggered: a held key re-selects its model on every frame. When
/// several selection keys are held, the highest-numbered one wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightingSelector {
    current: LightingModel,
}

impl LightingSelector {
    #[must_use]
    pub fn new(initial: LightingModel) -> Self {
        Self { current: initial }
    }

    /// Samples `input` and returns the model in effect for this frame.
    pub fn apply(&mut self, input: &Input) -> LightingModel {
        let previous = self.current;
        for model in LightingModel::ALL {
            if input.is_key_down(model.key()) {
                self.current = model;
            }
        }
        if self.current != previous {
            log::info!("Lighting model: {}", self.current.name());
        }
        self.current
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> LightingModel {
        self.current
    }
}
