//! ARGB color type shared by the framebuffer, textures, and shading.
//!
//! Lighting math runs in "channel space": RGB channels as `f32` in the
//! 0..255 range packed into a [`Vec3`], which keeps the shading evaluators
//! free of byte juggling until the final conversion back.

use crate::math::vec3::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::argb(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    /// Pack into a `u32` in ARGB8888 layout for display surfaces.
    pub const fn pack(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    pub const fn from_packed(value: u32) -> Self {
        Self::argb(
            (value >> 24) as u8,
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        )
    }

    /// RGB channels as a channel-space vector (components in 0..255).
    pub fn channels(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32)
    }

    /// Opaque color from a channel-space vector, clamping each component
    /// into the byte range and rounding.
    pub fn from_channels(channels: Vec3) -> Self {
        Self::rgb(
            channels.x.clamp(0.0, 255.0).round() as u8,
            channels.y.clamp(0.0, 255.0).round() as u8,
            channels.z.clamp(0.0, 255.0).round() as u8,
        )
    }

    /// Scale the RGB channels by a factor in [0, 1], truncating to bytes.
    /// Alpha is preserved.
    pub fn scale(self, factor: f32) -> Self {
        Self::argb(
            self.a,
            (self.r as f32 * factor) as u8,
            (self.g as f32 * factor) as u8,
            (self.b as f32 * factor) as u8,
        )
    }

    /// Component-wise arithmetic mean of a set of colors, rounded to bytes.
    ///
    /// Returns `TRANSPARENT` for an empty slice.
    pub fn average(colors: &[Color]) -> Self {
        if colors.is_empty() {
            return Self::TRANSPARENT;
        }
        let n = colors.len() as f32;
        let (mut a, mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
        for color in colors {
            a += color.a as f32;
            r += color.r as f32;
            g += color.g as f32;
            b += color.b as f32;
        }
        Self::argb(
            (a / n).round() as u8,
            (r / n).round() as u8,
            (g / n).round() as u8,
            (b / n).round() as u8,
        )
    }
}
