use pixel_gfx::config::SceneConfig;
use pixel_gfx::core::raster::Corners;
use pixel_gfx::{Canvas, DisplayList, DrawOp, MemorySurface, PixelRecorder};

// ============================================================================
// Canvas core
// ============================================================================

#[test]
fn test_canvas_new() {
    let canvas = Canvas::new(MemorySurface::new(128, 64));
    assert_eq!((canvas.width(), canvas.height()), (128, 64));
    assert_eq!((canvas.raw_width(), canvas.raw_height()), (128, 64));
    assert_eq!(canvas.surface().pixels().len(), 128 * 64);
    assert_eq!(canvas.surface().count(0), 128 * 64);
}

#[test_log::test]
fn test_rotation_round_trip() {
    let mut canvas = Canvas::new(PixelRecorder::new(96, 40));
    for rotation in 0..8u8 {
        canvas.set_rotation(rotation);
        let expected = if rotation & 1 == 0 { (96, 40) } else { (40, 96) };
        assert_eq!((canvas.width(), canvas.height()), expected, "rotation {rotation}");
        assert_eq!(canvas.surface().rotation(), rotation & 3);
    }
}

#[test]
fn test_rotated_drawing_lands_on_panel() {
    let mut canvas = Canvas::new(MemorySurface::new(8, 4));

    canvas.set_rotation(1);
    canvas.draw_pixel(0, 0, 1);
    assert_eq!(canvas.surface().pixel(7, 0), Some(1));

    canvas.set_rotation(2);
    canvas.draw_pixel(0, 0, 2);
    assert_eq!(canvas.surface().pixel(7, 3), Some(2));

    canvas.set_rotation(3);
    canvas.draw_pixel(0, 0, 3);
    assert_eq!(canvas.surface().pixel(0, 3), Some(3));
}

#[test]
fn test_rotated_clip_bounds() {
    let mut canvas = Canvas::new(MemorySurface::new(8, 4));
    canvas.set_rotation(1);
    // Logical extent is 4x8: x = 5 is off the panel.
    canvas.draw_fast_hline(0, 7, 6, 1);
    assert_eq!(canvas.surface().count(1), 4);
}

#[test]
fn test_fill_screen_then_shapes() {
    let mut canvas = Canvas::new(MemorySurface::new(32, 32));
    canvas.fill_screen(1);
    canvas.fill_circle(16, 16, 4, 0);
    canvas.draw_circle_helper(16, 16, 10, Corners::TOP_LEFT | Corners::BOTTOM_RIGHT, 0);
    let lit = canvas.surface().count(1);
    assert!(lit < 32 * 32);
    assert_eq!(canvas.surface().logical_pixel(16, 16), Some(0));
    assert_eq!(canvas.surface().logical_pixel(0, 0), Some(1));
}

#[test]
fn test_invert_does_not_touch_pixels() {
    let mut canvas = Canvas::new(MemorySurface::new(4, 2));
    canvas.draw_pixel(0, 0, 1);
    canvas.invert_display(true);
    assert_eq!(canvas.surface().count(1), 1);
    assert_eq!(canvas.surface().to_ascii(), ".###\n####\n");
}

// ============================================================================
// Display lists
// ============================================================================

#[test_log::test]
fn test_display_list_matches_direct_calls() {
    let list = DisplayList::new()
        .draw(DrawOp::Clear { color: 0 })
        .draw(DrawOp::Line { x0: 0, y0: 0, x1: 31, y1: 15, color: 1 })
        .draw(DrawOp::FillRoundRect { x: 2, y: 2, width: 12, height: 8, radius: 3, color: 1 })
        .draw(DrawOp::Triangle { x0: 20, y0: 1, x1: 30, y1: 14, x2: 16, y2: 12, color: 1 })
        .draw(DrawOp::Cursor { x: 0, y: 8 })
        .draw(DrawOp::Text { text: "ok".into() });

    let mut replayed = Canvas::new(MemorySurface::new(32, 16));
    list.execute(&mut replayed);

    let mut direct = Canvas::new(MemorySurface::new(32, 16));
    direct.fill_screen(0);
    direct.draw_line(0, 0, 31, 15, 1);
    direct.fill_round_rect(2, 2, 12, 8, 3, 1);
    direct.draw_triangle(20, 1, 30, 14, 16, 12, 1);
    direct.set_cursor(0, 8);
    direct.print("ok");

    assert_eq!(replayed.surface().pixels(), direct.surface().pixels());
    assert_eq!(replayed.cursor(), direct.cursor());
}

#[test]
fn test_display_list_serializes_round_trip() {
    let list = DisplayList::from(vec![
        DrawOp::XBitmap {
            x: 1,
            y: 2,
            width: 3,
            height: 4,
            data: vec![1, 2, 3, 4],
            color: 5,
            background: Some(6),
        },
        DrawOp::Float { value: 1.5, digits: 1 },
        DrawOp::Newline,
    ]);
    let json = serde_json::to_string(&list).unwrap();
    assert!(json.contains(r#""op":"x_bitmap""#));
    let back: DisplayList = serde_json::from_str(&json).unwrap();
    assert_eq!(back, list);
}

#[test]
fn test_unknown_op_is_rejected() {
    let result: Result<DisplayList, _> = serde_json::from_str(r#"[{"op": "spiral"}]"#);
    assert!(result.is_err());
}

// ============================================================================
// Scenes
// ============================================================================

#[test]
fn test_scene_renders_rotated_text() {
    let scene = SceneConfig::from_json(
        r#"{
            "width": 16,
            "height": 32,
            "rotation": 1,
            "text": {"color": 1, "background": 0},
            "ops": [
                {"op": "clear", "color": 0},
                {"op": "text", "text": "Hi"},
                {"op": "integer", "value": 7, "base": 2}
            ]
        }"#,
    )
    .unwrap();

    let mut canvas = Canvas::new(MemorySurface::new(scene.width, scene.height));
    scene.prepare(&mut canvas);
    assert_eq!((canvas.width(), canvas.height()), (32, 16));

    let emitted = scene.ops.execute(&mut canvas);
    assert_eq!(emitted, 5);
    // The fifth glyph leaves the cursor at x = 30 > 26, so the line wraps.
    assert_eq!(canvas.cursor(), (0, 8));
    assert!(canvas.surface().count(1) > 0);
}

#[test]
fn test_scene_load_reports_missing_file() {
    let err = SceneConfig::load(std::path::Path::new("/nonexistent/scene.json")).unwrap_err();
    assert!(format!("{err:#}").contains("reading scene file"));
}
