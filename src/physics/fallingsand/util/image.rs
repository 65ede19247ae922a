//! Image utilities
//! Our own image type keeps host specific texture types out of the physics engine.
//! The host uploads the bytes to whatever texture it draws with, using nearest neighbor
//! sampling so the grains keep their hard pixel edges.

use super::color::GrainColor;
use super::vectors::XyVector;

/// Representing a raw packed-pixel image, one 32 bit RGBA word per grid cell
/// Engine agnostic, full ownership, no lifetimes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawImage {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl RawImage {
    /// A fully transparent image
    pub fn new_blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major packed pixels
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// The same pixels as RGBA8 bytes, without copying
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn get_pixel(&self, pos: XyVector) -> Option<GrainColor> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        Some(GrainColor::unpack(self.pixels[pos.y * self.width + pos.x]))
    }

    /// Overwrite this image with a new frame of the same size
    pub(crate) fn copy_from(&mut self, pixels: &[u32]) {
        self.pixels.copy_from_slice(pixels);
    }
}
