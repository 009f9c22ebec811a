//! wgpu rendering module
//!
//! The demo hands the renderer flat-coloured rectangles and circles in
//! screen pixels (origin top-left, y down). `pipeline` turns them into one
//! triangle list per frame; `text` breaks the overlays down into the same
//! rectangles.

pub mod pipeline;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use pipeline::RenderState;
pub use text::{TextBitmap, load_font, overlay_drawables};
pub use vertex::{Vertex, srgb_to_linear};

use glam::Vec2;

use crate::sim::{BallSprite, SceneGeometry};

/// Segments used to tessellate a round ball
pub const CIRCLE_SEGMENTS: u32 = 48;

/// A primitive in screen pixels, colour in linear RGBA
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drawable {
    Rect {
        top_left: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// `top_left` is the corner of the circle's bounding box
    Circle {
        top_left: Vec2,
        radius: f32,
        color: [f32; 4],
    },
}

/// Where frames are drawn
pub trait RenderSurface {
    type Error;

    /// Start a frame filled with `color`
    fn clear(&mut self, color: [f32; 4]);
    fn draw(&mut self, drawable: &Drawable);
    /// Show the frame
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Walls then ball, all in one colour
pub fn scene_drawables(scene: &SceneGeometry, color: [f32; 4]) -> Vec<Drawable> {
    let mut drawables: Vec<Drawable> = scene
        .walls
        .iter()
        .map(|wall| Drawable::Rect {
            top_left: wall.position,
            size: wall.size,
            color,
        })
        .collect();

    drawables.push(match scene.ball {
        BallSprite::Round { position, radius } => Drawable::Circle {
            top_left: position,
            radius,
            color,
        },
        BallSprite::Square(sprite) => Drawable::Rect {
            top_left: sprite.position,
            size: sprite.size,
            color,
        },
    });
    drawables
}
