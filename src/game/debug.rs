//! Debug overlay: hold-to-pause and hold-for-slow-motion

use std::fmt;

use glam::Vec2;

use crate::format_snapshot;
use crate::platform::input::{InputState, Key};

/// Overlay mode for the step about to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugMode {
    #[default]
    Normal,
    /// Simulation halted, snapshot printed on entry
    Paused,
    /// Steps shortened by the slow-motion factor
    SlowMotion,
}

/// Ball state as printed by the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_snapshot(self.position, self.velocity))
    }
}

/// Tracks the overlay mode from the pause and slow keys
///
/// Pause wins over slow motion. Once paused, the overlay stays paused until
/// [`DebugOverlay::resume`] is called.
#[derive(Debug, Clone)]
pub struct DebugOverlay {
    mode: DebugMode,
    pause_key: Key,
    slow_key: Key,
}

impl DebugOverlay {
    pub fn new(pause_key: Key, slow_key: Key) -> Self {
        Self {
            mode: DebugMode::Normal,
            pause_key,
            slow_key,
        }
    }

    pub fn mode(&self) -> DebugMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.mode == DebugMode::Paused
    }

    pub fn pause_held(&self, input: &impl InputState) -> bool {
        input.is_key_held(self.pause_key)
    }

    /// Pick the mode for the next pending step
    pub fn evaluate(&mut self, input: &impl InputState) -> DebugMode {
        self.mode = if input.is_key_held(self.pause_key) {
            DebugMode::Paused
        } else if input.is_key_held(self.slow_key) {
            DebugMode::SlowMotion
        } else {
            DebugMode::Normal
        };
        self.mode
    }

    /// Leave the paused state
    pub fn resume(&mut self) {
        self.mode = DebugMode::Normal;
    }
}
