//! Platform-agnostic keyboard state
//!
//! The windowing backend translates its key events into [`Key`] presses and
//! releases; frame logic then polls [`Input::is_key_down`]. A key counts as
//! down for every frame between its press and its release, which gives
//! level-triggered semantics on top of an event-based platform.

use std::collections::HashSet;

/// Number-row keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
}

/// Button state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Keyboard state container
#[derive(Debug, Clone, Default)]
pub struct Input {
    pressed_keys: HashSet<Key>,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== System API (called by the window adapter) ==========

    /// Injects a keyboard event. Repeated presses of a held key are harmless.
    pub fn inject_key(&mut self, key: Key, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                self.pressed_keys.insert(key);
            }
            ButtonState::Released => {
                self.pressed_keys.remove(&key);
            }
        }
    }

    /// Forgets every held key. Used when the window loses focus, since no
    /// release events arrive for keys let go while unfocused.
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
    }

    // ========== Frame logic API ==========

    /// Checks whether a key is currently held down
    #[must_use]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }
}
