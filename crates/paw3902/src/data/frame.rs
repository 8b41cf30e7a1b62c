//! Raw frame capture buffer.

use core::slice::ChunksExact;

use crate::register::raw_data_grab;

/// Frame width in pixels.
pub const FRAME_WIDTH: usize = 35;
/// Frame height in pixels.
pub const FRAME_HEIGHT: usize = 35;
/// Pixels per frame.
pub const FRAME_PIXELS: usize = FRAME_WIDTH * FRAME_HEIGHT;

/// 35x35 raw image, row-major, 8 bits per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pixels: [u8; FRAME_PIXELS],
}

impl Frame {
    /// Creates an all-zero frame.
    pub const fn new() -> Self {
        Self {
            pixels: [0u8; FRAME_PIXELS],
        }
    }

    /// Returns the pixel at `row`, `col`, or `None` when out of range.
    pub fn pixel(&self, row: usize, col: usize) -> Option<u8> {
        if row >= FRAME_HEIGHT || col >= FRAME_WIDTH {
            return None;
        }
        Some(self.pixels[row * FRAME_WIDTH + col])
    }

    /// Iterates over rows.
    pub fn rows(&self) -> ChunksExact<'_, u8> {
        self.pixels.chunks_exact(FRAME_WIDTH)
    }

    /// Returns all pixels in row-major order.
    pub const fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8; FRAME_PIXELS] {
        &mut self.pixels
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

/// Assembles an 8-bit pixel from the upper and lower RAW_DATA_GRAB reads.
pub(crate) const fn pixel_from_halves(upper: u8, lower: u8) -> u8 {
    ((upper & raw_data_grab::UPPER_DATA) << 2) | ((lower & raw_data_grab::LOWER_DATA) >> 2)
}
