//! Cursor-driven text rendering with the built-in glyph set.

use log::debug;

use super::canvas::Extent;
use super::font::{glyph, CHAR_ADVANCE, LINE_ADVANCE};
use super::raster;
use crate::traits::PixelSurface;

/// Cursor position and text style.
///
/// A background equal to the foreground means "transparent": clear glyph
/// bits are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextState {
    pub cursor_x: i32,
    pub cursor_y: i32,
    pub color: u16,
    pub background: u16,
    pub wrap: bool,
    size: u8,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            color: 0xFFFF,
            background: 0xFFFF,
            wrap: true,
            size: 1,
        }
    }
}

impl TextState {
    /// Integer glyph scale, always at least 1.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Set the glyph scale; 0 is treated as 1.
    pub fn set_size(&mut self, size: u8) {
        if size == 0 {
            debug!("text size 0 coerced to 1");
        }
        self.size = size.max(1);
    }

    /// Foreground only, transparent background.
    pub fn set_color(&mut self, color: u16) {
        self.color = color;
        self.background = color;
    }

    /// Foreground with an opaque background.
    pub fn set_colors(&mut self, color: u16, background: u16) {
        self.color = color;
        self.background = background;
    }

    pub fn is_transparent(&self) -> bool {
        self.color == self.background
    }

    /// Move to the start of the next text line. The cursor saturates at
    /// the edge of the coordinate range.
    pub fn newline(&mut self) {
        self.cursor_y = self.cursor_y.saturating_add(i32::from(self.size) * LINE_ADVANCE);
        self.cursor_x = 0;
    }
}

/// Feed one byte through the text state machine. Always consumes it.
pub fn write_byte<S: PixelSurface + ?Sized>(
    surface: &mut S,
    extent: Extent,
    state: &mut TextState,
    c: u8,
) -> usize {
    match c {
        b'\n' => state.newline(),
        b'\r' => {}
        _ => {
            let size = i32::from(state.size);
            draw_char(
                surface,
                extent,
                state.cursor_x,
                state.cursor_y,
                c,
                state.color,
                state.background,
                state.size,
            );
            state.cursor_x = state.cursor_x.saturating_add(size * CHAR_ADVANCE);
            if state.wrap && state.cursor_x > extent.width.saturating_sub(size * CHAR_ADVANCE) {
                state.newline();
            }
        }
    }
    1
}

/// Render one glyph cell with its top-left corner at (x, y).
///
/// Cells entirely off the canvas are skipped. Partially visible cells are
/// drawn and the surface drops what falls outside.
#[allow(clippy::too_many_arguments)]
pub fn draw_char<S: PixelSurface + ?Sized>(
    surface: &mut S,
    extent: Extent,
    x: i32,
    y: i32,
    c: u8,
    color: u16,
    background: u16,
    size: u8,
) {
    let [x, y, width, height] = [x, y, extent.width, extent.height].map(i64::from);
    let size = i64::from(size.max(1));
    let (advance, line_advance) = (i64::from(CHAR_ADVANCE), i64::from(LINE_ADVANCE));

    if x >= width || y >= height || x + advance * size - 1 < 0 || y + line_advance * size - 1 < 0 {
        return;
    }

    let columns = glyph(c);
    for i in 0..advance {
        // Column 5 is the blank spacer between characters.
        let mut line = columns.get(i as usize).copied().unwrap_or(0);
        for j in 0..line_advance {
            if line & 0x1 != 0 {
                cell(surface, x, y, i, j, size, color);
            } else if background != color {
                cell(surface, x, y, i, j, size, background);
            }
            line >>= 1;
        }
    }
}

fn cell<S: PixelSurface + ?Sized>(surface: &mut S, x: i64, y: i64, i: i64, j: i64, size: i64, color: u16) {
    if size == 1 {
        raster::plot(surface, x + i, y + j, color);
    } else {
        raster::area(surface, x + i * size, y + j * size, size, size, color);
    }
}
