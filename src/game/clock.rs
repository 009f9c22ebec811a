//! Fixed-timestep accumulator
//!
//! Wall-clock frame time goes in, whole fixed steps come out. The residual
//! carries over to the next frame; there is no interpolation.

use crate::error::ConfigError;

/// What the step callback wants the drain loop to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
    /// The step ran; consume it and keep draining
    Continue,
    /// Stop draining and leave the pending step in the accumulator
    Halt,
}

/// Accumulates frame time and hands it out in fixed steps
#[derive(Debug, Clone)]
pub struct SimulationClock {
    fixed_step: f32,
    accumulated_time: f32,
    last_sampled_time: f64,
}

impl SimulationClock {
    /// Start a clock at `now` (seconds)
    pub fn new(fixed_step: f32, now: f64) -> Result<Self, ConfigError> {
        if !(fixed_step.is_finite() && fixed_step > 0.0) {
            return Err(ConfigError::NonPositiveStep(fixed_step));
        }
        Ok(Self {
            fixed_step,
            accumulated_time: 0.0,
            last_sampled_time: now,
        })
    }

    pub fn fixed_step(&self) -> f32 {
        self.fixed_step
    }

    pub fn accumulated_time(&self) -> f32 {
        self.accumulated_time
    }

    pub fn last_sampled_time(&self) -> f64 {
        self.last_sampled_time
    }

    /// Time since the previous sample; never negative
    pub fn sample(&mut self, now: f64) -> f32 {
        let delta = (now - self.last_sampled_time).max(0.0) as f32;
        self.last_sampled_time = now;
        delta
    }

    /// Forget time elapsed since the last sample
    pub fn resync(&mut self, now: f64) {
        self.last_sampled_time = now;
    }

    /// Add `frame_delta`, then run `step` once per whole fixed step pending
    ///
    /// Returns the number of steps consumed.
    pub fn advance(&mut self, frame_delta: f32, mut step: impl FnMut() -> StepControl) -> u32 {
        self.accumulated_time += frame_delta.max(0.0);
        self.drain(&mut step)
    }

    /// Run `step` for steps already pending, without adding time
    pub fn drain(&mut self, mut step: impl FnMut() -> StepControl) -> u32 {
        let mut steps = 0;
        while self.accumulated_time >= self.fixed_step {
            if step() == StepControl::Halt {
                break;
            }
            self.accumulated_time -= self.fixed_step;
            steps += 1;
        }
        steps
    }
}
