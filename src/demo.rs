//! Built-in scenes exercising the primitives on a small monochrome panel.
//!
//! # Examples
//!
//! ```
//! use pixel_gfx::{Canvas, MemorySurface};
//! use pixel_gfx::demo::showcase;
//!
//! let mut canvas = Canvas::new(MemorySurface::new(128, 64));
//! showcase().execute(&mut canvas);
//! assert!(canvas.surface().count(1) > 0);
//! ```

use crate::core::{DisplayList, DrawOp};

// ============================================================================
// Assets
// ============================================================================

/// 8x8 smiley, MSB-first rows.
pub const SMILEY: [u8; 8] = [
    0b0011_1100,
    0b0100_0010,
    0b1010_0101,
    0b1000_0001,
    0b1010_0101,
    0b1001_1001,
    0b0100_0010,
    0b0011_1100,
];

pub const ON: u16 = 1;
pub const OFF: u16 = 0;

// ============================================================================
// Scenes
// ============================================================================

/// Outline shapes, filled shapes, a bitmap and some printed values.
pub fn showcase() -> DisplayList {
    DisplayList::new()
        .draw(DrawOp::Clear { color: OFF })
        .draw(DrawOp::Rect { x: 0, y: 0, width: 128, height: 64, color: ON })
        .draw(DrawOp::RoundRect { x: 4, y: 4, width: 40, height: 24, radius: 6, color: ON })
        .draw(DrawOp::FillRoundRect { x: 8, y: 8, width: 32, height: 16, radius: 4, color: ON })
        .draw(DrawOp::Circle { x: 62, y: 16, radius: 11, color: ON })
        .draw(DrawOp::FillCircle { x: 62, y: 16, radius: 5, color: ON })
        .draw(DrawOp::FillTriangle { x0: 82, y0: 27, x1: 98, y1: 4, x2: 114, y2: 27, color: ON })
        .draw(DrawOp::Line { x0: 80, y0: 30, x1: 124, y1: 30, color: ON })
        .draw(DrawOp::Bitmap {
            x: 116,
            y: 4,
            width: 8,
            height: 8,
            data: SMILEY.to_vec(),
            color: ON,
            background: None,
        })
        .draw(DrawOp::TextColor { color: ON, background: None })
        .draw(DrawOp::Cursor { x: 4, y: 34 })
        .draw(DrawOp::Text { text: "pixel-gfx ".into() })
        .draw(DrawOp::Integer { value: 0xBEEF, base: 16 })
        .draw(DrawOp::Cursor { x: 4, y: 44 })
        .draw(DrawOp::Text { text: "pi=".into() })
        .draw(DrawOp::Float { value: std::f64::consts::PI, digits: 3 })
        .draw(DrawOp::Text { text: " n=".into() })
        .draw(DrawOp::Integer { value: -42, base: 10 })
        .draw(DrawOp::Cursor { x: 4, y: 54 })
        .draw(DrawOp::TextColor { color: OFF, background: Some(ON) })
        .draw(DrawOp::Text { text: " inverse ".into() })
}

/// A long line of text on a small panel, to show wrapping.
pub fn wrapping() -> DisplayList {
    DisplayList::new()
        .draw(DrawOp::Clear { color: OFF })
        .draw(DrawOp::TextColor { color: ON, background: None })
        .draw(DrawOp::Text { text: "the quick brown fox jumps over the lazy dog".into() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Canvas, MemorySurface};

    #[test]
    fn showcase_lights_pixels() {
        let mut canvas = Canvas::new(MemorySurface::new(128, 64));
        let emitted = showcase().execute(&mut canvas);
        assert!(emitted > 0);
        assert!(canvas.surface().count(ON) > 0);
        assert!(canvas.surface().count(OFF) > 0);
    }

    #[test]
    fn wrapping_moves_below_first_line() {
        let mut canvas = Canvas::new(MemorySurface::new(64, 32));
        wrapping().execute(&mut canvas);
        assert!(canvas.cursor().1 >= 8);
    }
}
