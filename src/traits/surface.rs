use crate::core::raster;

/// Hardware capability a display backend provides to the rasterizer.
///
/// Only [`set_pixel`](PixelSurface::set_pixel) and the raw geometry are
/// required. Everything else has a generic implementation built on top of
/// `set_pixel`; backends override those purely for throughput and must
/// touch exactly the same pixels as the defaults.
pub trait PixelSurface {
    /// Write one pixel. Writes outside the addressable area must be ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: u16);

    /// Panel width before rotation. Never changes.
    fn raw_width(&self) -> i32;

    /// Panel height before rotation. Never changes.
    fn raw_height(&self) -> i32;

    /// Vertical span of `h` pixels starting at (x, y) going down.
    fn fast_vline(&mut self, x: i32, y: i32, h: i32, color: u16) {
        if h > 0 {
            raster::line(self, x, y, x, y.saturating_add(h - 1), color);
        }
    }

    /// Horizontal span of `w` pixels starting at (x, y) going right.
    fn fast_hline(&mut self, x: i32, y: i32, w: i32, color: u16) {
        if w > 0 {
            raster::line(self, x, y, x.saturating_add(w - 1), y, color);
        }
    }

    /// Filled rectangle as `w` adjacent vertical spans.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        raster::fill_rect(self, x, y, w, h, color);
    }

    /// Fill the whole logical extent (`width` x `height` after rotation).
    fn fill_screen(&mut self, width: i32, height: i32, color: u16) {
        self.fill_rect(0, 0, width, height, color);
    }

    /// Toggle hardware inversion. Panels without support ignore it.
    fn invert_display(&mut self, _invert: bool) {}

    /// Called by the canvas whenever its rotation changes, so the backend
    /// can map logical coordinates onto the panel.
    fn rotation_changed(&mut self, _rotation: u8) {}
}
