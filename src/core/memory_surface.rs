use anyhow::{ensure, Context, Result};

use super::raster::REACH;
use crate::traits::PixelSurface;

/// Largest panel side: every pixel must be addressable by the rasterizer.
pub const MAX_SIDE: i32 = REACH + 1;

/// In-memory panel: one `u16` color per pixel, row-major in panel order.
///
/// Logical coordinates are clipped against the rotated extent and then
/// mapped onto the panel the way a display driver does it. Spans and
/// rectangles are written directly instead of going through the line
/// rasterizer.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    pixels: Vec<u16>,
    width: i32,
    height: i32,
    rotation: u8,
    inverted: bool,
}

impl MemorySurface {
    /// Create a blank panel (every pixel 0). Sides are clamped to
    /// `0..=MAX_SIDE`.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.clamp(0, MAX_SIDE);
        let height = height.clamp(0, MAX_SIDE);
        Self::blank(width, height, width as usize * height as usize)
    }

    /// Like [`new`](Self::new), but sizes outside `1..=MAX_SIDE` are an
    /// error instead of being clamped.
    pub fn try_new(width: i32, height: i32) -> Result<Self> {
        ensure!(
            (1..=MAX_SIDE).contains(&width) && (1..=MAX_SIDE).contains(&height),
            "panel size {width}x{height} outside 1..={MAX_SIDE} per side"
        );
        let len = usize::try_from(width)?
            .checked_mul(usize::try_from(height)?)
            .with_context(|| format!("panel size {width}x{height} overflows the pixel buffer"))?;
        Ok(Self::blank(width, height, len))
    }

    fn blank(width: i32, height: i32, len: usize) -> Self {
        Self {
            pixels: vec![0; len],
            width,
            height,
            rotation: 0,
            inverted: false,
        }
    }

    /// Raw panel dimensions.
    pub fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Dimensions as seen through the current rotation.
    pub fn logical_size(&self) -> (i32, i32) {
        if self.rotation & 1 == 0 {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        }
    }

    /// Raw pixel buffer.
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Color at panel coordinates (unrotated).
    pub fn pixel(&self, x: i32, y: i32) -> Option<u16> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Color at logical coordinates (through the current rotation).
    pub fn logical_pixel(&self, x: i32, y: i32) -> Option<u16> {
        let (px, py) = self.to_panel(x, y)?;
        self.pixel(px, py)
    }

    /// Number of pixels currently holding `color`.
    pub fn count(&self, color: u16) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    /// Whether the panel was last told to invert.
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    /// Render the panel as text: `#` for lit pixels, `.` for dark ones.
    /// Any non-zero color is lit; inversion flips the result.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for row in self.pixels.chunks(self.width.max(1) as usize) {
            for &c in row {
                out.push(if (c != 0) != self.inverted { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    fn to_panel(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        let (w, h) = self.logical_size();
        if x < 0 || y < 0 || x >= w || y >= h {
            return None;
        }
        let mapped = match self.rotation {
            1 => (self.width - y - 1, x),
            2 => (self.width - x - 1, self.height - y - 1),
            3 => (y, self.height - x - 1),
            _ => (x, y),
        };
        Some(mapped)
    }

    fn plot(&mut self, x: i32, y: i32, color: u16) {
        if let Some((px, py)) = self.to_panel(x, y) {
            let index = (py * self.width + px) as usize;
            self.pixels[index] = color;
        }
    }
}

impl PixelSurface for MemorySurface {
    fn set_pixel(&mut self, x: i32, y: i32, color: u16) {
        self.plot(x, y, color);
    }

    fn raw_width(&self) -> i32 {
        self.width
    }

    fn raw_height(&self) -> i32 {
        self.height
    }

    fn fast_vline(&mut self, x: i32, y: i32, h: i32, color: u16) {
        let (_, height) = self.logical_size();
        for j in y.max(0)..clip_end(y, h, height) {
            self.plot(x, j, color);
        }
    }

    fn fast_hline(&mut self, x: i32, y: i32, w: i32, color: u16) {
        let (width, _) = self.logical_size();
        for i in x.max(0)..clip_end(x, w, width) {
            self.plot(i, y, color);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        if h <= 0 {
            return;
        }
        let (width, _) = self.logical_size();
        for i in x.max(0)..clip_end(x, w, width) {
            self.fast_vline(i, y, h, color);
        }
    }

    fn fill_screen(&mut self, width: i32, height: i32, color: u16) {
        if (width, height) == self.logical_size() {
            self.pixels.fill(color);
        } else {
            self.fill_rect(0, 0, width, height, color);
        }
    }

    fn invert_display(&mut self, invert: bool) {
        self.inverted = invert;
    }

    fn rotation_changed(&mut self, rotation: u8) {
        self.rotation = rotation & 3;
    }
}

/// Exclusive end of `start..start + len` clipped to `0..limit`.
fn clip_end(start: i32, len: i32, limit: i32) -> i32 {
    (i64::from(start) + i64::from(len)).clamp(0, i64::from(limit)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_creation() {
        let surface = MemorySurface::new(16, 8);
        assert_eq!(surface.dimensions(), (16, 8));
        assert_eq!(surface.pixels().len(), 16 * 8);
        assert_eq!(surface.count(0), 128);
    }

    #[test]
    fn set_pixel_out_of_bounds_is_ignored() {
        let mut surface = MemorySurface::new(4, 4);
        surface.set_pixel(-1, 0, 1);
        surface.set_pixel(0, -1, 1);
        surface.set_pixel(4, 0, 1);
        surface.set_pixel(0, 4, 1);
        assert_eq!(surface.count(0), 16);
    }

    #[test]
    fn rotation_maps_logical_origin() {
        let mut surface = MemorySurface::new(4, 2);
        for (rotation, expected) in [(0, (0, 0)), (1, (3, 0)), (2, (3, 1)), (3, (0, 1))] {
            surface.rotation_changed(rotation);
            surface.fill_screen(4, 4, 0);
            surface.set_pixel(0, 0, 7);
            assert_eq!(surface.pixel(expected.0, expected.1), Some(7), "rotation {rotation}");
            assert_eq!(surface.logical_pixel(0, 0), Some(7));
        }
    }

    #[test]
    fn rotated_clip_uses_swapped_extent() {
        let mut surface = MemorySurface::new(4, 2);
        surface.rotation_changed(1);
        assert_eq!(surface.logical_size(), (2, 4));
        surface.set_pixel(1, 3, 5);
        surface.set_pixel(3, 1, 5);
        assert_eq!(surface.count(5), 1);
    }

    #[test]
    fn fill_screen_fast_path() {
        let mut surface = MemorySurface::new(3, 3);
        surface.fill_screen(3, 3, 9);
        assert_eq!(surface.count(9), 9);
    }

    #[test]
    fn ascii_dump_honours_inversion() {
        let mut surface = MemorySurface::new(2, 1);
        surface.set_pixel(0, 0, 1);
        assert_eq!(surface.to_ascii(), "#.\n");
        surface.invert_display(true);
        assert_eq!(surface.to_ascii(), ".#\n");
    }

    #[test]
    fn try_new_rejects_unaddressable_sizes() {
        assert!(MemorySurface::try_new(70_000, 70_000).is_err());
        assert!(MemorySurface::try_new(0, 8).is_err());
        assert!(MemorySurface::try_new(8, -1).is_err());
        let surface = MemorySurface::try_new(MAX_SIDE, 2).unwrap();
        assert_eq!(surface.pixels().len(), MAX_SIDE as usize * 2);
    }

    #[test]
    fn new_clamps_sides() {
        let surface = MemorySurface::new(-3, 4);
        assert_eq!(surface.dimensions(), (0, 4));
        assert!(surface.pixels().is_empty());
    }

    #[test]
    fn spans_at_the_coordinate_limits() {
        let mut surface = MemorySurface::new(4, 4);
        surface.fast_hline(i32::MIN, 1, i32::MAX, 1);
        surface.fast_vline(2, i32::MAX, i32::MAX, 2);
        surface.fill_rect(i32::MAX, i32::MIN, i32::MAX, i32::MAX, 3);
        surface.fill_rect(-2, -2, i32::MAX, 3, 4);
        assert_eq!(surface.count(1), 0);
        assert_eq!(surface.count(2), 0);
        assert_eq!(surface.count(3), 0);
        assert_eq!(surface.count(4), 4);
    }
}
