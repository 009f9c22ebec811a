//! Demo settings
//!
//! Everything the demo needs at startup, grouped by concern. There is no
//! settings file: the defaults below are the configuration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::platform::input::Key;

/// Physics world parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// World size in meters
    pub width: f32,
    pub height: f32,
    pub gravity: Vec2,
    /// Fixed step (seconds)
    pub fixed_step: f32,
    /// Slow-motion step is `fixed_step / slow_motion_factor`
    pub slow_motion_factor: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            gravity: Vec2::ZERO,
            fixed_step: WORLD_TIME_RESOLUTION,
            slow_motion_factor: WORLD_SLOW_MOTION_FACTOR,
        }
    }
}

/// Ball and wall parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    pub ball_radius: f32,
    pub ball_start_position: Vec2,
    pub ball_start_velocity: Vec2,
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub wall_thickness: f32,
    /// Velocity change per held arrow key per frame
    pub nudge_amount: f32,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            ball_start_position: Vec2::new(BALL_START_POSITION_X, BALL_START_POSITION_Y),
            ball_start_velocity: Vec2::new(BALL_START_VELOCITY_X, BALL_START_VELOCITY_Y),
            density: BODY_DENSITY_PERFECT_SOLID,
            restitution: BODY_RESTITUTION_PERFECT_BOUNCE,
            friction: 0.0,
            linear_damping: 0.0,
            wall_thickness: WALL_THICKNESS,
            nudge_amount: BALL_NUDGE_AMOUNT,
        }
    }
}

/// Audio parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Cue volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Start the background track at launch
    pub music_autoplay: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_volume: MUSIC_VOLUME,
            sfx_volume: 1.0,
            music_autoplay: true,
        }
    }
}

/// Window and projection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    /// Window title, also drawn over the top wall
    pub title: String,
    /// Drawn over the bottom wall
    pub legend: String,
    /// Foreground colour (8-bit sRGB)
    pub foreground: [u8; 3],
    /// Clear colour (8-bit sRGB)
    pub background: [u8; 3],
    /// Glyph height in pixels
    pub font_size: f32,
    /// Gap between a wall's top edge and its text (pixels)
    pub text_margin: f32,
    pub text_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            title: SCREEN_TITLE.to_string(),
            legend: CONTROLS_LEGEND.to_string(),
            foreground: TERMINAL_GREEN,
            background: [0, 0, 0],
            font_size: TEXT_FONT_SIZE,
            text_margin: TEXT_MARGIN_TOP,
            text_color: TEXT_COLOR,
        }
    }
}

/// Key bindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlConfig {
    pub pause: Key,
    pub slow_motion: Key,
    pub round_puck: Key,
    pub music_toggle: Key,
    pub nudge_up: Key,
    pub nudge_down: Key,
    pub nudge_left: Key,
    pub nudge_right: Key,
    pub quit: Key,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            pause: Key::P,
            slow_motion: Key::S,
            round_puck: Key::C,
            music_toggle: Key::M,
            nudge_up: Key::Up,
            nudge_down: Key::Down,
            nudge_left: Key::Left,
            nudge_right: Key::Right,
            quit: Key::Escape,
        }
    }
}

/// All demo settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldConfig,
    pub entities: EntityConfig,
    pub audio: AudioConfig,
    pub display: DisplayConfig,
    pub controls: ControlConfig,
}

impl Settings {
    /// Pixels per world meter on each axis
    pub fn pixels_per_meter(&self) -> Vec2 {
        Vec2::new(
            self.display.width as f32 / self.world.width,
            self.display.height as f32 / self.world.height,
        )
    }

    /// Top-left pixel of the banner and of the legend
    ///
    /// Both start one wall thickness in from the left; the banner sits on
    /// the top wall and the legend on the bottom one.
    pub fn text_origins(&self) -> [Vec2; 2] {
        let ppm = self.pixels_per_meter();
        let wall = self.entities.wall_thickness;
        let margin = self.display.text_margin;
        let x = wall * ppm.x;
        [
            Vec2::new(x, margin),
            Vec2::new(x, (self.world.height - wall) * ppm.y + margin),
        ]
    }

    /// Slow-motion step length (seconds)
    pub fn slow_motion_step(&self) -> f32 {
        self.world.fixed_step / self.world.slow_motion_factor
    }

    /// Check startup invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.world.fixed_step;
        if !(step.is_finite() && step > 0.0) {
            return Err(ConfigError::NonPositiveStep(step));
        }
        let factor = self.world.slow_motion_factor;
        if !(factor.is_finite() && factor > 0.0) {
            return Err(ConfigError::NonPositiveSlowFactor(factor));
        }
        let ppm = self.pixels_per_meter();
        if !(ppm.x > 0.0 && ppm.y > 0.0) {
            return Err(ConfigError::NonPositiveScale(ppm.x, ppm.y));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pixels_per_meter() {
        let settings = Settings::default();
        assert_eq!(settings.pixels_per_meter(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_text_sits_on_top_and_bottom_walls() {
        let [banner, legend] = Settings::default().text_origins();
        assert_eq!(banner, Vec2::new(40.0, 4.0));
        assert_eq!(legend, Vec2::new(40.0, 1164.0));
    }

    #[test]
    fn test_default_settings_validate() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_step_rejected() {
        let mut settings = Settings::default();
        settings.world.fixed_step = 0.0;
        assert_eq!(settings.validate(), Err(ConfigError::NonPositiveStep(0.0)));
    }

    #[test]
    fn test_negative_slow_factor_rejected() {
        let mut settings = Settings::default();
        settings.world.slow_motion_factor = -2.0;
        assert_eq!(
            settings.validate(),
            Err(ConfigError::NonPositiveSlowFactor(-2.0))
        );
    }

    #[test]
    fn test_slow_motion_step_is_tenth() {
        let settings = Settings::default();
        assert_eq!(settings.slow_motion_step(), WORLD_TIME_RESOLUTION / 10.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"audio":{"music_volume":0.5,"sfx_volume":1.0,"music_autoplay":false}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.audio.music_volume, 0.5);
        assert!(!settings.audio.music_autoplay);
        assert_eq!(settings.world, WorldConfig::default());
    }
}
