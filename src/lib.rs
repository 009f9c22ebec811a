//! Physual - a ball bouncing inside a walled arena
//!
//! Core modules:
//! - `sim`: Rigid-body world (bodies, contacts, stepping) and the entity registry
//! - `game`: Real-time loop pieces (fixed-step clock, debug overlay, edge-triggered controllers)
//! - `renderer`: wgpu rendering of flat-coloured shapes
//! - `audio`: Procedural cue sounds and background music over rodio
//! - `platform`: Keyboard state and wall-clock time
//! - `settings`: Compiled-in configuration

pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, PhysualError};
pub use settings::Settings;

use glam::Vec2;

/// Demo configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const WORLD_TIME_RESOLUTION: f32 = 1.0 / 60.0;
    /// Slow-motion steps are this many times shorter than a fixed step
    pub const WORLD_SLOW_MOTION_FACTOR: f32 = 10.0;

    /// World dimensions (meters)
    pub const WORLD_UNIT: f32 = 2.0;
    pub const WORLD_WIDTH: f32 = 80.0;
    pub const WORLD_HEIGHT: f32 = 60.0;

    /// Display
    pub const SCREEN_WIDTH: u32 = 1600;
    pub const SCREEN_HEIGHT: u32 = 1200;
    pub const SCREEN_TITLE: &str =
        "Physual: Demonstration of a 2D Game Development Stack for Rust (winit, wgpu and rodio)";
    pub const CONTROLS_LEGEND: &str =
        "(S)low Debug      (P)ause      (C)ircular Puck      (M)usic Toggle      Arrows Nudge";

    /// Terminal green, as 8-bit sRGB
    pub const TERMINAL_GREEN: [u8; 3] = [64, 255, 64];

    /// Banner and legend text, drawn over the top and bottom walls
    pub const TEXT_FONT_SIZE: f32 = 23.0;
    pub const TEXT_MARGIN_TOP: f32 = 4.0;
    pub const TEXT_COLOR: [u8; 3] = [0, 0, 0];

    /// Body material defaults
    pub const BODY_DENSITY_PERFECT_SOLID: f32 = 1.0;
    pub const BODY_RESTITUTION_PERFECT_BOUNCE: f32 = 1.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = WORLD_UNIT * 0.5;
    pub const BALL_START_POSITION_X: f32 = 3.0;
    pub const BALL_START_POSITION_Y: f32 = -30.0;
    pub const BALL_START_VELOCITY_X: f32 = 80.0;
    pub const BALL_START_VELOCITY_Y: f32 = 0.0;
    /// Per-frame velocity change for each held arrow key (m/s)
    pub const BALL_NUDGE_AMOUNT: f32 = 0.01;

    /// Walls are one world unit thick
    pub const WALL_THICKNESS: f32 = WORLD_UNIT;

    /// Music volume (0.0 - 1.0)
    pub const MUSIC_VOLUME: f32 = 0.75;
}

/// Convert a world position (y up) to screen pixels (y down)
#[inline]
pub fn world_to_screen(pos: Vec2, pixels_per_meter: Vec2) -> Vec2 {
    Vec2::new(pos.x * pixels_per_meter.x, -pos.y * pixels_per_meter.y)
}

/// Format a ball snapshot the way the debug overlay prints it: `(x,y) (vx,vy)`
pub fn format_snapshot(position: Vec2, velocity: Vec2) -> String {
    format!(
        "({},{}) ({},{})",
        position.x, position.y, velocity.x, velocity.y
    )
}
