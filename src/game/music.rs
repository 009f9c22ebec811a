//! Background music on/off toggle

use super::edge::EdgeTrigger;
use crate::audio::{MusicStatus, MusicStream};
use crate::platform::input::{InputState, Key};

/// Flips the music stream on each press of the toggle key
#[derive(Debug)]
pub struct MusicToggle<M> {
    stream: M,
    key: Key,
    pressed: EdgeTrigger,
}

impl<M: MusicStream> MusicToggle<M> {
    pub fn new(stream: M, key: Key) -> Self {
        Self {
            stream,
            key,
            pressed: EdgeTrigger::new(),
        }
    }

    pub fn status(&self) -> MusicStatus {
        self.stream.status()
    }

    pub fn stream(&self) -> &M {
        &self.stream
    }

    /// Start playback unconditionally
    pub fn start(&mut self) {
        if self.stream.status() == MusicStatus::Stopped {
            self.stream.play();
        }
    }

    /// Poll the key; returns the new status when it changed
    pub fn update(&mut self, input: &impl InputState) -> Option<MusicStatus> {
        if !self.pressed.update(input.is_key_held(self.key)) {
            return None;
        }
        match self.stream.status() {
            MusicStatus::Playing => self.stream.stop(),
            MusicStatus::Stopped => self.stream.play(),
        }
        let status = self.stream.status();
        log::info!("Music {status:?}");
        Some(status)
    }
}
