use std::collections::BTreeSet;

use crate::traits::PixelSurface;

/// Surface that logs every pixel write without clipping.
///
/// Useful for comparing exact pixel sets and write order, including writes
/// that land outside the nominal panel.
#[derive(Debug, Clone, Default)]
pub struct PixelRecorder {
    width: i32,
    height: i32,
    writes: Vec<(i32, i32, u16)>,
    inverted: bool,
    rotation: u8,
}

impl PixelRecorder {
    /// Create a recorder reporting the given raw geometry.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Every write in call order as (x, y, color).
    pub fn writes(&self) -> &[(i32, i32, u16)] {
        &self.writes
    }

    /// Written coordinates in call order, duplicates kept.
    pub fn points(&self) -> Vec<(i32, i32)> {
        self.writes.iter().map(|&(x, y, _)| (x, y)).collect()
    }

    /// Distinct written coordinates.
    pub fn pixel_set(&self) -> BTreeSet<(i32, i32)> {
        self.writes.iter().map(|&(x, y, _)| (x, y)).collect()
    }

    /// Distinct coordinates whose last write used `color`.
    pub fn pixels_with_color(&self, color: u16) -> BTreeSet<(i32, i32)> {
        self.pixel_set()
            .into_iter()
            .filter(|&(x, y)| self.color_at(x, y) == Some(color))
            .collect()
    }

    /// Color of the most recent write to (x, y).
    pub fn color_at(&self, x: i32, y: i32) -> Option<u16> {
        self.writes
            .iter()
            .rev()
            .find(|w| w.0 == x && w.1 == y)
            .map(|w| w.2)
    }

    /// Last value passed to `invert_display`.
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    /// Last rotation reported by the canvas.
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Forget all recorded writes.
    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl PixelSurface for PixelRecorder {
    fn set_pixel(&mut self, x: i32, y: i32, color: u16) {
        self.writes.push((x, y, color));
    }

    fn raw_width(&self) -> i32 {
        self.width
    }

    fn raw_height(&self) -> i32 {
        self.height
    }

    fn invert_display(&mut self, invert: bool) {
        self.inverted = invert;
    }

    fn rotation_changed(&mut self, rotation: u8) {
        self.rotation = rotation;
    }
}
