//! Text overlays
//!
//! Strings are rasterised once with rusttype into a coverage bitmap, then
//! turned into one-pixel-high rectangles the pipeline draws with alpha
//! blending. The banner and legend never change, so this happens at startup.

use glam::Vec2;
use rusttype::{Font, Scale, point};

use super::Drawable;
use crate::error::PhysualError;

/// Embedded font data (DejaVu Sans - Bitstream Vera / DejaVu license)
const FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Coverage is snapped to this many levels so neighbouring pixels merge
const COVERAGE_LEVELS: f32 = 16.0;

pub fn load_font() -> Result<Font<'static>, PhysualError> {
    Font::try_from_bytes(FONT_DATA).ok_or(PhysualError::Font)
}

/// Glyph coverage for one line of text, row-major, values in `0.0..=1.0`
#[derive(Debug, Clone, PartialEq)]
pub struct TextBitmap {
    pub width: usize,
    pub height: usize,
    coverage: Vec<f32>,
}

impl TextBitmap {
    /// Lay out `text` with its top-left corner at the bitmap origin
    pub fn rasterize(font: &Font<'_>, text: &str, size: f32) -> Self {
        let scale = Scale::uniform(size);
        let ascent = font.v_metrics(scale).ascent;
        let glyphs: Vec<_> = font.layout(text, scale, point(0.0, ascent)).collect();

        let boxes: Vec<_> = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).collect();
        let width = boxes.iter().map(|b| b.max.x.max(0)).max().unwrap_or(0) as usize;
        let height = boxes.iter().map(|b| b.max.y.max(0)).max().unwrap_or(0) as usize;
        let mut coverage = vec![0.0f32; width * height];

        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                let x = bb.min.x + gx as i32;
                let y = bb.min.y + gy as i32;
                if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                    let cell = &mut coverage[y as usize * width + x as usize];
                    *cell = cell.max(v.clamp(0.0, 1.0));
                }
            });
        }

        Self {
            width,
            height,
            coverage,
        }
    }

    pub fn coverage(&self, x: usize, y: usize) -> f32 {
        self.coverage[y * self.width + x]
    }

    /// Horizontal runs of equal coverage as rectangles at `origin`
    ///
    /// `color` is linear RGB; coverage becomes the alpha channel.
    pub fn drawables(&self, origin: Vec2, color: [f32; 3]) -> Vec<Drawable> {
        let mut drawables = Vec::new();
        for y in 0..self.height {
            let mut x = 0;
            while x < self.width {
                let level = quantize(self.coverage(x, y));
                let start = x;
                while x < self.width && quantize(self.coverage(x, y)) == level {
                    x += 1;
                }
                if level == 0 {
                    continue;
                }
                drawables.push(Drawable::Rect {
                    top_left: origin + Vec2::new(start as f32, y as f32),
                    size: Vec2::new((x - start) as f32, 1.0),
                    color: [color[0], color[1], color[2], level as f32 / COVERAGE_LEVELS],
                });
            }
        }
        drawables
    }
}

fn quantize(coverage: f32) -> u32 {
    (coverage * COVERAGE_LEVELS).round() as u32
}

/// Rectangles for several lines of text, each at its own top-left pixel
pub fn overlay_drawables(
    font: &Font<'_>,
    lines: &[(&str, Vec2)],
    size: f32,
    color: [f32; 3],
) -> Vec<Drawable> {
    lines
        .iter()
        .flat_map(|(text, origin)| {
            TextBitmap::rasterize(font, text, size).drawables(*origin, color)
        })
        .collect()
}
