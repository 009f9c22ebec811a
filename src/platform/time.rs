//! Wall-clock time source

use std::time::Instant;

/// Monotonic seconds since creation
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    origin: Instant,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Seconds elapsed since the stopwatch started
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}
