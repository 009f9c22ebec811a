//! Platform layer
//!
//! Handles native window-system details for:
//! - Input events (held-key state)
//! - Time (monotonic seconds)

pub mod input;
pub mod time;

pub use input::{InputState, Key, KeyboardState};
pub use time::Stopwatch;
