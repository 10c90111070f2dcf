//! Drawing front end: a surface plus rotation and text state.

use std::fmt;

use log::debug;

use super::format::Printable;
use super::raster::{self, BitOrder, Corners, Halves};
use super::text::{self, TextState};
use crate::traits::{ByteSink, PixelSurface};

/// Logical drawing extent after rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

/// Everything a canvas tracks besides its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasState {
    raw: Extent,
    extent: Extent,
    rotation: u8,
    pub text: TextState,
}

impl CanvasState {
    /// Fresh state for a panel of the given raw size.
    pub fn new(raw_width: i32, raw_height: i32) -> Self {
        let raw = Extent {
            width: raw_width,
            height: raw_height,
        };
        Self {
            raw,
            extent: raw,
            rotation: 0,
            text: TextState::default(),
        }
    }

    pub fn raw(&self) -> Extent {
        self.raw
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Set rotation (masked to 0..=3) and recompute the logical extent.
    pub fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation & 3;
        self.extent = if self.rotation & 1 == 0 {
            self.raw
        } else {
            Extent {
                width: self.raw.height,
                height: self.raw.width,
            }
        };
    }
}

/// Drawing front end over a [`PixelSurface`].
///
/// Owns the surface together with rotation and text state; shapes go
/// straight to the rasterizer, bytes go through the text engine.
#[derive(Debug, Clone)]
pub struct Canvas<S: PixelSurface> {
    surface: S,
    state: CanvasState,
}

impl<S: PixelSurface> Canvas<S> {
    /// Wrap a surface. Geometry is read once from the surface.
    pub fn new(surface: S) -> Self {
        let state = CanvasState::new(surface.raw_width(), surface.raw_height());
        debug!(
            "canvas created: {}x{}",
            state.raw.width, state.raw.height
        );
        Self { surface, state }
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Width under the current rotation.
    pub fn width(&self) -> i32 {
        self.state.extent.width
    }

    /// Height under the current rotation.
    pub fn height(&self) -> i32 {
        self.state.extent.height
    }

    pub fn raw_width(&self) -> i32 {
        self.state.raw.width
    }

    pub fn raw_height(&self) -> i32 {
        self.state.raw.height
    }

    pub fn rotation(&self) -> u8 {
        self.state.rotation
    }

    pub fn set_rotation(&mut self, rotation: u8) {
        self.state.set_rotation(rotation);
        self.surface.rotation_changed(self.state.rotation);
        debug!(
            "rotation {} -> extent {}x{}",
            self.state.rotation,
            self.width(),
            self.height()
        );
    }

    // Text state

    pub fn cursor(&self) -> (i32, i32) {
        (self.state.text.cursor_x, self.state.text.cursor_y)
    }

    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.state.text.cursor_x = x;
        self.state.text.cursor_y = y;
    }

    /// Text color with a transparent background.
    pub fn set_text_color(&mut self, color: u16) {
        self.state.text.set_color(color);
    }

    pub fn set_text_color_with_background(&mut self, color: u16, background: u16) {
        self.state.text.set_colors(color, background);
    }

    pub fn text_size(&self) -> u8 {
        self.state.text.size()
    }

    pub fn set_text_size(&mut self, size: u8) {
        self.state.text.set_size(size);
    }

    pub fn text_wrap(&self) -> bool {
        self.state.text.wrap
    }

    pub fn set_text_wrap(&mut self, wrap: bool) {
        self.state.text.wrap = wrap;
    }

    // Shapes

    pub fn draw_pixel(&mut self, x: i32, y: i32, color: u16) {
        self.surface.set_pixel(x, y, color);
    }

    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16) {
        raster::line(&mut self.surface, x0, y0, x1, y1, color);
    }

    pub fn draw_fast_vline(&mut self, x: i32, y: i32, h: i32, color: u16) {
        self.surface.fast_vline(x, y, h, color);
    }

    pub fn draw_fast_hline(&mut self, x: i32, y: i32, w: i32, color: u16) {
        self.surface.fast_hline(x, y, w, color);
    }

    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        raster::rect(&mut self.surface, x, y, w, h, color);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        self.surface.fill_rect(x, y, w, h, color);
    }

    /// Fill the full logical extent.
    pub fn fill_screen(&mut self, color: u16) {
        let Extent { width, height } = self.state.extent;
        self.surface.fill_screen(width, height, color);
    }

    pub fn draw_circle(&mut self, x0: i32, y0: i32, r: i32, color: u16) {
        raster::circle(&mut self.surface, x0, y0, r, color);
    }

    pub fn draw_circle_helper(&mut self, x0: i32, y0: i32, r: i32, corners: Corners, color: u16) {
        raster::circle_helper(&mut self.surface, x0, y0, r, corners, color);
    }

    pub fn fill_circle(&mut self, x0: i32, y0: i32, r: i32, color: u16) {
        raster::fill_circle(&mut self.surface, x0, y0, r, color);
    }

    pub fn fill_circle_helper(
        &mut self,
        x0: i32,
        y0: i32,
        r: i32,
        halves: Halves,
        delta: i32,
        color: u16,
    ) {
        raster::fill_circle_helper(&mut self.surface, x0, y0, r, halves, delta, color);
    }

    pub fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: u16) {
        raster::round_rect(&mut self.surface, x, y, w, h, r, color);
    }

    pub fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: u16) {
        raster::fill_round_rect(&mut self.surface, x, y, w, h, r, color);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32, color: u16) {
        raster::triangle(&mut self.surface, x0, y0, x1, y1, x2, y2, color);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn fill_triangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32, color: u16) {
        raster::fill_triangle(&mut self.surface, x0, y0, x1, y1, x2, y2, color);
    }

    /// MSB-first 1-bpp bitmap; `background` paints clear bits when given.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_bitmap(
        &mut self,
        x: i32,
        y: i32,
        data: &[u8],
        w: i32,
        h: i32,
        color: u16,
        background: Option<u16>,
    ) {
        raster::bitmap(&mut self.surface, x, y, data, w, h, BitOrder::MsbFirst, color, background);
    }

    /// LSB-first (XBM) 1-bpp bitmap; `None` leaves clear bits untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_x_bitmap(
        &mut self,
        x: i32,
        y: i32,
        data: &[u8],
        w: i32,
        h: i32,
        color: u16,
        background: Option<u16>,
    ) {
        raster::bitmap(&mut self.surface, x, y, data, w, h, BitOrder::LsbFirst, color, background);
    }

    /// Render one glyph without touching the cursor.
    pub fn draw_char(&mut self, x: i32, y: i32, c: u8, color: u16, background: u16, size: u8) {
        text::draw_char(&mut self.surface, self.state.extent, x, y, c, color, background, size);
    }

    pub fn invert_display(&mut self, invert: bool) {
        self.surface.invert_display(invert);
    }

    // Printing

    /// Print any value at the cursor, returning the bytes consumed.
    pub fn print<T: Printable + ?Sized>(&mut self, value: &T) -> usize {
        value.print_to(self)
    }

    /// Print a value followed by `"\r\n"`.
    pub fn println<T: Printable + ?Sized>(&mut self, value: &T) -> usize {
        let n = self.print(value);
        n + self.newline()
    }

    /// Emit `"\r\n"`.
    pub fn newline(&mut self) -> usize {
        self.write_bytes(b"\r\n")
    }
}

impl<S: PixelSurface> ByteSink for Canvas<S> {
    fn write_byte(&mut self, byte: u8) -> usize {
        text::write_byte(&mut self.surface, self.state.extent, &mut self.state.text, byte)
    }
}

impl<S: PixelSurface> fmt::Write for Canvas<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}
