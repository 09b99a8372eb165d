//! Depth-tested render target and the finished framebuffer.
//!
//! The target is written concurrently by the per-face workers, so each
//! pixel row sits behind its own mutex and [`RenderTarget::test_and_write`]
//! is the only mutation point. The depth test and the color write happen
//! under the same lock, so a fragment can never pass the test against one
//! depth value and land on a pixel another fragment has since claimed.

use std::sync::Mutex;

use crate::color::Color;

struct Row {
    colors: Vec<Color>,
    depths: Vec<f32>,
}

pub struct RenderTarget {
    width: u32,
    height: u32,
    rows: Vec<Mutex<Row>>,
}

impl RenderTarget {
    /// A target cleared to `background` with all depths at `f32::MAX`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let rows = (0..height)
            .map(|_| {
                Mutex::new(Row {
                    colors: vec![background; width as usize],
                    depths: vec![f32::MAX; width as usize],
                })
            })
            .collect();
        Self {
            width,
            height,
            rows,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every pixel to `background` and every depth to `f32::MAX`.
    pub fn clear(&mut self, background: Color) {
        for row in &mut self.rows {
            let row = row.get_mut().unwrap_or_else(|e| e.into_inner());
            row.colors.fill(background);
            row.depths.fill(f32::MAX);
        }
    }

    /// Depth-test a fragment and write its color when it wins.
    ///
    /// The write happens when `z <= stored`; on an exact depth tie the
    /// incoming fragment replaces the stored one, so the last writer wins
    /// and tie order between concurrent faces is not deterministic.
    /// Coordinates must already be in range.
    pub fn test_and_write(&self, x: i32, y: i32, z: f32, color: Color) -> bool {
        debug_assert!(x >= 0 && (x as u32) < self.width);
        debug_assert!(y >= 0 && (y as u32) < self.height);

        let mut row = self.rows[y as usize].lock().unwrap_or_else(|e| e.into_inner());
        let slot = x as usize;
        if z <= row.depths[slot] {
            row.depths[slot] = z;
            row.colors[slot] = color;
            true
        } else {
            false
        }
    }

    /// Stored depth at a pixel, `f32::MAX` when nothing has been written.
    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        let row = self.rows[y as usize].lock().unwrap_or_else(|e| e.into_inner());
        row.depths[x as usize]
    }

    /// Snapshot the color plane into an immutable [`Framebuffer`].
    pub fn into_framebuffer(self) -> Framebuffer {
        let mut pixels = Vec::with_capacity((self.width * self.height) as usize);
        for row in self.rows {
            let row = row.into_inner().unwrap_or_else(|e| e.into_inner());
            pixels.extend_from_slice(&row.colors);
        }
        Framebuffer {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// A finished frame: row-major pixels, origin at the top-left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Pixels packed as ARGB8888 words in native byte order, ready for a
    /// display surface upload.
    pub fn to_argb_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color.pack().to_ne_bytes())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearer_fragment_wins() {
        let target = RenderTarget::new(4, 4, Color::BLACK);
        assert!(target.test_and_write(1, 1, 0.8, Color::rgb(10, 0, 0)));
        assert!(target.test_and_write(1, 1, 0.3, Color::rgb(20, 0, 0)));
        assert!(!target.test_and_write(1, 1, 0.5, Color::rgb(30, 0, 0)));

        let frame = target.into_framebuffer();
        assert_eq!(frame.pixel(1, 1), Color::rgb(20, 0, 0));
    }

    #[test]
    fn test_equal_depth_overwrites() {
        let target = RenderTarget::new(2, 2, Color::BLACK);
        assert!(target.test_and_write(0, 0, 0.5, Color::rgb(1, 1, 1)));
        assert!(target.test_and_write(0, 0, 0.5, Color::rgb(2, 2, 2)));
        assert_eq!(target.into_framebuffer().pixel(0, 0), Color::rgb(2, 2, 2));
    }

    #[test]
    fn test_clear_resets_depth_and_color() {
        let mut target = RenderTarget::new(2, 2, Color::BLACK);
        target.test_and_write(0, 0, 0.1, Color::WHITE);
        target.clear(Color::GRAY);
        assert_eq!(target.depth_at(0, 0), f32::MAX);
        assert_eq!(target.into_framebuffer().pixel(0, 0), Color::GRAY);
    }

    #[test]
    fn test_framebuffer_layout_is_row_major() {
        let target = RenderTarget::new(3, 2, Color::BLACK);
        target.test_and_write(2, 1, 0.5, Color::WHITE);
        let frame = target.into_framebuffer();
        assert_eq!(frame.pixels()[5], Color::WHITE);
    }

    #[test]
    fn test_argb_bytes_length() {
        let frame = RenderTarget::new(3, 2, Color::BLACK).into_framebuffer();
        assert_eq!(frame.to_argb_bytes().len(), 3 * 2 * 4);
    }
}
