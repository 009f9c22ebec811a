//! Keyboard input handling
//!
//! The window delivers key transitions as events; the demo polls "is this
//! key held right now". `KeyboardState` bridges the two.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Keys the demo reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    P,
    S,
    C,
    M,
    Up,
    Down,
    Left,
    Right,
    Escape,
}

impl Key {
    /// Map a physical key code to a demo key
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyP => Some(Key::P),
            KeyCode::KeyS => Some(Key::S),
            KeyCode::KeyC => Some(Key::C),
            KeyCode::KeyM => Some(Key::M),
            KeyCode::ArrowUp => Some(Key::Up),
            KeyCode::ArrowDown => Some(Key::Down),
            KeyCode::ArrowLeft => Some(Key::Left),
            KeyCode::ArrowRight => Some(Key::Right),
            KeyCode::Escape => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Polled keyboard state
pub trait InputState {
    fn is_key_held(&self, key: Key) -> bool;
}

/// Set of currently held keys, maintained from window events
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Apply a winit key transition; unmapped keys are ignored
    pub fn apply(&mut self, code: KeyCode, state: ElementState) {
        let Some(key) = Key::from_key_code(code) else {
            return;
        };
        match state {
            ElementState::Pressed => self.press(key),
            ElementState::Released => self.release(key),
        }
    }

    /// Drop all held keys (focus lost: releases will never arrive)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl InputState for KeyboardState {
    fn is_key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
