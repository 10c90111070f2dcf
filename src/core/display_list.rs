//! Serializable draw operations and their replay onto a canvas.

use log::trace;
use serde::{Deserialize, Serialize};

use super::canvas::Canvas;
use super::format::{Fixed, Radix};
use super::raster::{Corners, Halves};
use crate::traits::PixelSurface;

/// One canvas operation, in a form that can be stored and replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Fill the whole logical extent.
    Clear { color: u16 },

    Pixel { x: i32, y: i32, color: u16 },

    Line { x0: i32, y0: i32, x1: i32, y1: i32, color: u16 },

    #[serde(rename = "hline")]
    HLine { x: i32, y: i32, length: i32, color: u16 },

    #[serde(rename = "vline")]
    VLine { x: i32, y: i32, length: i32, color: u16 },

    Rect { x: i32, y: i32, width: i32, height: i32, color: u16 },

    FillRect { x: i32, y: i32, width: i32, height: i32, color: u16 },

    Circle { x: i32, y: i32, radius: i32, color: u16 },

    FillCircle { x: i32, y: i32, radius: i32, color: u16 },

    /// Quarter arcs; `corners` is the raw quadrant mask (1, 2, 4, 8).
    CircleCorners { x: i32, y: i32, radius: i32, corners: u8, color: u16 },

    /// Half-disk spans; `halves` is 1 (right), 2 (left) or 3.
    FillCircleHalves { x: i32, y: i32, radius: i32, halves: u8, delta: i32, color: u16 },

    RoundRect { x: i32, y: i32, width: i32, height: i32, radius: i32, color: u16 },

    FillRoundRect { x: i32, y: i32, width: i32, height: i32, radius: i32, color: u16 },

    Triangle { x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32, color: u16 },

    FillTriangle { x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32, color: u16 },

    /// MSB-first 1-bpp bitmap.
    Bitmap {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        data: Vec<u8>,
        color: u16,
        #[serde(default)]
        background: Option<u16>,
    },

    /// LSB-first (XBM) 1-bpp bitmap.
    XBitmap {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        data: Vec<u8>,
        color: u16,
        #[serde(default)]
        background: Option<u16>,
    },

    Char { x: i32, y: i32, code: u8, color: u16, background: u16, size: u8 },

    Cursor { x: i32, y: i32 },

    /// Without a background the text is transparent.
    TextColor {
        color: u16,
        #[serde(default)]
        background: Option<u16>,
    },

    TextSize { size: u8 },

    TextWrap { wrap: bool },

    Rotation { rotation: u8 },

    Invert { invert: bool },

    Text { text: String },

    Integer { value: i64, #[serde(default = "decimal")] base: u8 },

    Float { value: f64, #[serde(default = "two_digits")] digits: u8 },

    Newline,
}

fn decimal() -> u8 {
    10
}

fn two_digits() -> u8 {
    2
}

impl DrawOp {
    /// Apply to a canvas, returning the number of text bytes emitted.
    pub fn apply<S: PixelSurface>(&self, canvas: &mut Canvas<S>) -> usize {
        match self {
            DrawOp::Clear { color } => canvas.fill_screen(*color),
            DrawOp::Pixel { x, y, color } => canvas.draw_pixel(*x, *y, *color),
            DrawOp::Line { x0, y0, x1, y1, color } => canvas.draw_line(*x0, *y0, *x1, *y1, *color),
            DrawOp::HLine { x, y, length, color } => canvas.draw_fast_hline(*x, *y, *length, *color),
            DrawOp::VLine { x, y, length, color } => canvas.draw_fast_vline(*x, *y, *length, *color),
            DrawOp::Rect { x, y, width, height, color } => {
                canvas.draw_rect(*x, *y, *width, *height, *color)
            }
            DrawOp::FillRect { x, y, width, height, color } => {
                canvas.fill_rect(*x, *y, *width, *height, *color)
            }
            DrawOp::Circle { x, y, radius, color } => canvas.draw_circle(*x, *y, *radius, *color),
            DrawOp::FillCircle { x, y, radius, color } => {
                canvas.fill_circle(*x, *y, *radius, *color)
            }
            DrawOp::CircleCorners { x, y, radius, corners, color } => canvas.draw_circle_helper(
                *x,
                *y,
                *radius,
                Corners::from_bits_truncate(*corners),
                *color,
            ),
            DrawOp::FillCircleHalves { x, y, radius, halves, delta, color } => canvas
                .fill_circle_helper(
                    *x,
                    *y,
                    *radius,
                    Halves::from_bits_truncate(*halves),
                    *delta,
                    *color,
                ),
            DrawOp::RoundRect { x, y, width, height, radius, color } => {
                canvas.draw_round_rect(*x, *y, *width, *height, *radius, *color)
            }
            DrawOp::FillRoundRect { x, y, width, height, radius, color } => {
                canvas.fill_round_rect(*x, *y, *width, *height, *radius, *color)
            }
            DrawOp::Triangle { x0, y0, x1, y1, x2, y2, color } => {
                canvas.draw_triangle(*x0, *y0, *x1, *y1, *x2, *y2, *color)
            }
            DrawOp::FillTriangle { x0, y0, x1, y1, x2, y2, color } => {
                canvas.fill_triangle(*x0, *y0, *x1, *y1, *x2, *y2, *color)
            }
            DrawOp::Bitmap { x, y, width, height, data, color, background } => {
                canvas.draw_bitmap(*x, *y, data, *width, *height, *color, *background)
            }
            DrawOp::XBitmap { x, y, width, height, data, color, background } => {
                canvas.draw_x_bitmap(*x, *y, data, *width, *height, *color, *background)
            }
            DrawOp::Char { x, y, code, color, background, size } => {
                canvas.draw_char(*x, *y, *code, *color, *background, *size)
            }
            DrawOp::Cursor { x, y } => canvas.set_cursor(*x, *y),
            DrawOp::TextColor { color, background } => match background {
                Some(bg) => canvas.set_text_color_with_background(*color, *bg),
                None => canvas.set_text_color(*color),
            },
            DrawOp::TextSize { size } => canvas.set_text_size(*size),
            DrawOp::TextWrap { wrap } => canvas.set_text_wrap(*wrap),
            DrawOp::Rotation { rotation } => canvas.set_rotation(*rotation),
            DrawOp::Invert { invert } => canvas.invert_display(*invert),
            DrawOp::Text { text } => return canvas.print(text.as_str()),
            DrawOp::Integer { value, base } => return canvas.print(&Radix(*value, *base)),
            DrawOp::Float { value, digits } => return canvas.print(&Fixed(*value, *digits)),
            DrawOp::Newline => return canvas.newline(),
        }
        0
    }
}

/// Ordered list of draw operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation - builder style.
    pub fn draw(mut self, op: DrawOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Replay every operation in order, returning the text bytes emitted.
    pub fn execute<S: PixelSurface>(&self, canvas: &mut Canvas<S>) -> usize {
        self.ops
            .iter()
            .map(|op| {
                trace!("{op:?}");
                op.apply(canvas)
            })
            .sum()
    }
}

impl From<Vec<DrawOp>> for DisplayList {
    fn from(ops: Vec<DrawOp>) -> Self {
        Self { ops }
    }
}
