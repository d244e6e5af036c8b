// Core buffer types shared by the sampler and the window.

use crate::color::Color;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the window is on screen (pixels)
    pub height: usize,     // how tall the window is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer filled with one color.
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill.to_u32(); width * height],
        }
    }

    pub fn clear(&mut self, fill: Color) {
        self.pixels.fill(fill.to_u32());
    }
}

/// Axis-aligned rectangle in canvas pixels.
/// Visual: the square a single field cell covers when drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}
