use pixel_gfx::core::font::{glyph, CHAR_ADVANCE, LINE_ADVANCE};
use pixel_gfx::{ByteSink, Canvas, MemorySurface, PixelRecorder};

fn recorder_canvas() -> Canvas<PixelRecorder> {
    Canvas::new(PixelRecorder::new(128, 64))
}

// ============================================================================
// Cursor movement
// ============================================================================

#[test]
fn test_each_glyph_advances_six_columns() {
    let mut canvas = recorder_canvas();
    assert_eq!(canvas.print("abc"), 3);
    assert_eq!(canvas.cursor(), (3 * CHAR_ADVANCE, 0));
}

#[test]
fn test_wrap_happens_when_next_glyph_would_not_fit() {
    let mut canvas = recorder_canvas();
    // 128 / 6 = 21 glyphs: the 21st ends at x = 126 > 122.
    for i in 0..20 {
        canvas.write_byte(b'x');
        assert_eq!(canvas.cursor(), ((i + 1) * 6, 0), "glyph {i}");
    }
    canvas.write_byte(b'x');
    assert_eq!(canvas.cursor(), (0, LINE_ADVANCE));
}

#[test]
fn test_wrap_scales_with_text_size() {
    for size in 1..=4u8 {
        let mut canvas = recorder_canvas();
        canvas.set_text_size(size);
        let step = 6 * i32::from(size);
        let before = canvas.cursor().1;
        let mut written = 0;
        while canvas.cursor().1 == before {
            canvas.write_byte(b'W');
            written += 1;
        }
        assert_eq!(canvas.cursor(), (0, 8 * i32::from(size)), "size {size}");
        assert_eq!(written, 128 / step, "size {size}");
    }
}

#[test]
fn test_wrap_disabled_runs_off_the_right_edge() {
    let mut canvas = recorder_canvas();
    canvas.set_text_wrap(false);
    canvas.print("0123456789012345678901234567890");
    assert_eq!(canvas.cursor(), (31 * 6, 0));
    // Glyphs starting past the edge draw nothing; the recorder does not clip
    // the one straddling it.
    assert!(canvas.surface().points().iter().all(|&(x, _)| x < 126 + CHAR_ADVANCE));
}

#[test]
fn test_newline_and_carriage_return() {
    let mut canvas = recorder_canvas();
    canvas.set_text_size(3);
    canvas.print("ab\ncd\r");
    assert_eq!(canvas.cursor(), (2 * 18, 24));
    assert_eq!(canvas.newline(), 2);
    assert_eq!(canvas.cursor(), (0, 48));
}

#[test]
fn test_println_ends_on_fresh_line() {
    let mut canvas = recorder_canvas();
    canvas.set_cursor(30, 5);
    assert_eq!(canvas.println(&-12i32), 5);
    assert_eq!(canvas.cursor(), (0, 13));
}

// ============================================================================
// Glyph rendering
// ============================================================================

#[test]
fn test_transparent_text_paints_ink_only() {
    let mut canvas = recorder_canvas();
    canvas.set_text_color(9);
    canvas.print("H");
    // 'H' columns 0x7F 0x08 0x08 0x08 0x7F.
    assert_eq!(canvas.surface().writes().len(), 17);
    assert!(canvas.surface().writes().iter().all(|w| w.2 == 9));
}

#[test]
fn test_opaque_text_fills_whole_cell() {
    let mut canvas = recorder_canvas();
    canvas.set_text_color_with_background(9, 2);
    canvas.print("H");
    let surface = canvas.surface();
    assert_eq!(surface.pixel_set().len(), 48);
    assert_eq!(surface.pixels_with_color(9).len(), 17);
    assert_eq!(surface.pixels_with_color(2).len(), 31);
    // Spacer column and bottom row are background.
    assert_eq!(surface.color_at(5, 3), Some(2));
    assert_eq!(surface.color_at(0, 7), Some(2));
}

#[test]
fn test_glyph_bits_map_lsb_to_top_row() {
    let mut canvas = Canvas::new(MemorySurface::new(16, 8));
    canvas.set_text_color(1);
    canvas.print("A");
    let columns = glyph(b'A');
    for (i, column) in columns.iter().enumerate() {
        for j in 0..8 {
            let lit = (*column >> j) & 1 == 1;
            let expected = if lit { 1 } else { 0 };
            assert_eq!(canvas.surface().logical_pixel(i as i32, j), Some(expected), "({i},{j})");
        }
    }
}

#[test]
fn test_scaled_glyph_uses_square_blocks() {
    let mut small = Canvas::new(MemorySurface::new(32, 32));
    small.set_text_color(1);
    small.print("K");

    let mut big = Canvas::new(MemorySurface::new(32, 32));
    big.set_text_color(1);
    big.set_text_size(2);
    big.print("K");

    assert_eq!(big.surface().count(1), 4 * small.surface().count(1));
    for x in 0..12 {
        for y in 0..16 {
            assert_eq!(
                big.surface().logical_pixel(x, y),
                small.surface().logical_pixel(x / 2, y / 2),
                "({x},{y})"
            );
        }
    }
}

#[test_log::test]
fn test_size_zero_behaves_as_one() {
    let mut canvas = recorder_canvas();
    canvas.set_text_size(0);
    canvas.print("ab");
    assert_eq!(canvas.text_size(), 1);
    assert_eq!(canvas.cursor(), (12, 0));
}

// ============================================================================
// Clipping
// ============================================================================

#[test]
fn test_text_below_the_panel_moves_cursor_but_draws_nothing() {
    let mut canvas = recorder_canvas();
    canvas.set_text_color_with_background(1, 0);
    canvas.set_cursor(0, 64);
    canvas.print("hello");
    assert!(canvas.surface().writes().is_empty());
    assert_eq!(canvas.cursor(), (30, 64));
}

#[test]
fn test_partially_visible_glyph_is_clipped_by_surface() {
    let mut canvas = Canvas::new(MemorySurface::new(8, 8));
    canvas.set_text_color_with_background(1, 2);
    canvas.set_cursor(4, 4);
    canvas.print("H");
    // Visible part of the cell is 4x4.
    assert_eq!(canvas.surface().count(0), 64 - 16);
}

#[test]
fn test_cursor_saturates_at_coordinate_limits() {
    let mut canvas = recorder_canvas();
    canvas.set_text_color_with_background(1, 0);
    canvas.set_text_wrap(false);
    canvas.set_cursor(i32::MAX - 3, 0);
    canvas.print("ab");
    assert_eq!(canvas.cursor(), (i32::MAX, 0));

    canvas.set_text_size(4);
    canvas.set_cursor(5, i32::MAX - 2);
    canvas.newline();
    assert_eq!(canvas.cursor(), (0, i32::MAX));

    canvas.set_text_size(255);
    canvas.set_cursor(i32::MIN, i32::MIN);
    canvas.print("x");
    assert_eq!(canvas.cursor(), (i32::MIN + 255 * CHAR_ADVANCE, i32::MIN));
    assert!(canvas.surface().writes().is_empty());

    // With wrap on, the saturated column still counts as past the edge.
    canvas.set_text_size(1);
    canvas.set_text_wrap(true);
    canvas.set_cursor(i32::MAX - 3, 0);
    canvas.print("a");
    assert_eq!(canvas.cursor(), (0, LINE_ADVANCE));
    assert!(canvas.surface().writes().is_empty());
}

#[test]
fn test_draw_char_leaves_cursor_alone() {
    let mut canvas = recorder_canvas();
    canvas.set_cursor(7, 9);
    canvas.draw_char(40, 20, b'Q', 1, 0, 2);
    assert_eq!(canvas.cursor(), (7, 9));
    assert_eq!(canvas.surface().pixel_set().len(), 12 * 16);
}

#[test]
fn test_rotated_canvas_wraps_on_rotated_width() {
    let mut canvas = recorder_canvas();
    canvas.set_rotation(1);
    // Width is now 64: 10 glyphs fit, the 10th ends at x = 60 > 58.
    canvas.print("012345678");
    assert_eq!(canvas.cursor(), (54, 0));
    canvas.print("9");
    assert_eq!(canvas.cursor(), (0, 8));
}
