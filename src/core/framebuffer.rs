use crate::core::color::to_rgb8;
use nalgebra::Vector3;

/// The write side of a display surface, as seen by the rasterizer.
pub trait RenderTarget {
    /// Current size in pixels as `(width, height)`.
    fn size(&self) -> (usize, usize);

    /// Writes one pixel. Called once per covered, depth-accepted pixel.
    fn set_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8);
}

/// A 2D RGB8 color buffer, row 0 at the top.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pixels: Vec<[u8; 3]>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width * height],
        }
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Fills the whole buffer with one color.
    pub fn clear(&mut self, color: Vector3<f32>) {
        self.pixels.fill(to_rgb8(color));
    }

    /// Changes the size. Contents are reset to black when the size changes.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, [0; 3]);
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Tightly packed RGB bytes, row-major.
    pub fn as_raw(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }
}

impl RenderTarget for FrameBuffer {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.pixels[idx] = [r, g, b];
        }
    }
}
