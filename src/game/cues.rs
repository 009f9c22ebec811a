//! Collision sound dispatch

use super::edge::EdgeTrigger;
use crate::audio::SoundEffect;
use crate::error::ConfigError;

/// Fixed list of sounds played in rotation
#[derive(Debug)]
pub struct SoundCueCycle<S> {
    cues: Vec<S>,
    next_index: usize,
}

impl<S: SoundEffect> SoundCueCycle<S> {
    pub fn new(cues: Vec<S>) -> Result<Self, ConfigError> {
        if cues.is_empty() {
            return Err(ConfigError::EmptyCueList);
        }
        Ok(Self {
            cues,
            next_index: 0,
        })
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn cues(&self) -> &[S] {
        &self.cues
    }

    /// Play the current cue and move to the next; returns the index played
    pub fn play_next(&mut self) -> usize {
        let index = self.next_index;
        self.cues[index].play();
        self.next_index = (index + 1) % self.cues.len();
        index
    }
}

/// Plays one cue when the ball starts touching something
#[derive(Debug)]
pub struct CollisionAudio<S> {
    cycle: SoundCueCycle<S>,
    contact: EdgeTrigger,
}

impl<S: SoundEffect> CollisionAudio<S> {
    pub fn new(cycle: SoundCueCycle<S>) -> Self {
        Self {
            cycle,
            contact: EdgeTrigger::new(),
        }
    }

    pub fn cycle(&self) -> &SoundCueCycle<S> {
        &self.cycle
    }

    /// Feed the frame's contact state; returns the cue index if one played
    pub fn update(&mut self, in_contact: bool) -> Option<usize> {
        self.contact
            .update(in_contact)
            .then(|| self.cycle.play_next())
    }
}
