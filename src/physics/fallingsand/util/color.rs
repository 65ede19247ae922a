//! Colors of grains, and how they are packed into the 32 bit pixel words.

use bytemuck::{Pod, Zeroable};
use rand::Rng;

/// An 8 bit per channel RGBA color
/// Laid out in memory as R, G, B, A so that a slice of packed pixels is directly
/// an RGBA8 byte buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct GrainColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl GrainColor {
    /// The color of dry sand
    pub const SAND: Self = Self::rgb(194, 178, 128);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    /// The packed pixel word, byte-for-byte the same as the struct
    pub fn pack(self) -> u32 {
        bytemuck::cast(self)
    }

    pub fn unpack(pixel: u32) -> Self {
        bytemuck::cast(pixel)
    }

    /// Shift every color channel by its own random amount in `-jitter..=jitter`.
    /// Alpha is kept, so an opaque color stays opaque and never packs to 0.
    pub fn jittered<R: Rng + ?Sized>(self, jitter: u8, rng: &mut R) -> Self {
        if jitter == 0 {
            return self;
        }
        let jitter = i16::from(jitter);
        let mut channel = |c: u8| -> u8 {
            let shifted = i16::from(c) + rng.gen_range(-jitter..=jitter);
            shifted.clamp(0, 255) as u8
        };
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: self.a,
        }
    }
}
