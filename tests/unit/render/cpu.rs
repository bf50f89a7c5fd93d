use super::*;

const FONT_CANDIDATES: &[&str] = &[
    "assets/fonts/clock.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

fn test_font() -> Option<FontRef> {
    FONT_CANDIDATES.iter().find_map(|p| {
        std::fs::read(p)
            .ok()
            .map(|bytes| FontRef::new("test-font", bytes))
    })
}

fn covered(canvas: &PixmapCanvas) -> usize {
    canvas
        .snapshot()
        .data
        .chunks_exact(4)
        .filter(|px| px[3] > 0)
        .count()
}

#[test]
fn rejects_sizes_pixmaps_cannot_hold() {
    assert!(PixmapCanvas::new(SurfaceSize { width: 70_000, height: 10 }).is_err());
    assert!(PixmapCanvas::new(SurfaceSize { width: 0, height: 10 }).is_err());
}

#[test]
fn new_canvas_is_transparent() {
    let canvas = PixmapCanvas::new(SurfaceSize::new(4, 3).unwrap()).unwrap();
    assert_eq!(canvas.size(), SurfaceSize::new(4, 3).unwrap());
    assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(canvas.pixel(4, 0), None);
    assert_eq!(covered(&canvas), 0);
}

#[test]
fn clear_fills_premultiplied() {
    let mut canvas = PixmapCanvas::new(SurfaceSize::new(2, 2).unwrap()).unwrap();
    canvas.clear(Rgba8::new(255, 0, 0, 128));
    assert_eq!(canvas.pixel(1, 1), Some([128, 0, 0, 128]));
}

#[test]
fn background_blit_fills_surface_and_keeps_save_balance() {
    let mut canvas = PixmapCanvas::new(SurfaceSize::new(16, 16).unwrap()).unwrap();
    let bg = BackgroundImage::solid(4, 4, [255, 0, 0, 255]).unwrap();

    let depth = canvas.save();
    canvas
        .draw_image(&bg, bg.inclusive_bounds(), canvas.size().inclusive_bounds())
        .unwrap();
    canvas.restore();
    assert_eq!(canvas.save_count(), depth);

    for (x, y) in [(0, 0), (7, 7), (14, 14), (0, 14)] {
        let px = canvas.pixel(x, y).unwrap();
        assert!(px[0] >= 250 && px[1] <= 5 && px[3] >= 250, "({x},{y}) = {px:?}");
    }
    // Inclusive bounds leave the last column and row uncovered.
    assert!(canvas.pixel(15, 15).unwrap()[3] < 8);
}

#[test]
fn blit_follows_canvas_transform() {
    let mut canvas = PixmapCanvas::new(SurfaceSize::new(16, 16).unwrap()).unwrap();
    let bg = BackgroundImage::solid(2, 2, [0, 0, 255, 255]).unwrap();
    canvas.save();
    canvas.concat(Affine::translate(Vec2::new(8.0, 8.0)));
    canvas
        .draw_image(&bg, Rect::new(0.0, 0.0, 2.0, 2.0), Rect::new(0.0, 0.0, 4.0, 4.0))
        .unwrap();
    canvas.restore();

    assert_eq!(canvas.pixel(2, 2).unwrap()[3], 0);
    assert!(canvas.pixel(10, 10).unwrap()[3] >= 250);
}

#[test]
fn degenerate_blit_is_a_no_op() {
    let mut canvas = PixmapCanvas::new(SurfaceSize::new(4, 4).unwrap()).unwrap();
    let bg = BackgroundImage::solid(1, 1, [255, 255, 255, 255]).unwrap();
    canvas
        .draw_image(&bg, bg.inclusive_bounds(), canvas.size().inclusive_bounds())
        .unwrap();
    assert_eq!(covered(&canvas), 0);
}

#[test]
fn resize_reallocates_and_resets_stack() {
    let mut canvas = PixmapCanvas::new(SurfaceSize::new(4, 4).unwrap()).unwrap();
    canvas.save();
    canvas.resize(SurfaceSize::new(8, 2).unwrap()).unwrap();
    assert_eq!(canvas.size(), SurfaceSize::new(8, 2).unwrap());
    assert_eq!(canvas.save_count(), 0);
    assert_eq!(canvas.snapshot().data.len(), 8 * 2 * 4);
}

#[test]
fn unbalanced_restore_is_ignored() {
    let mut canvas = PixmapCanvas::new(SurfaceSize::new(2, 2).unwrap()).unwrap();
    canvas.restore();
    assert_eq!(canvas.save_count(), 0);
    assert_eq!(canvas.transform(), Affine::IDENTITY);
}

#[test]
fn into_straight_unpremultiplies() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    }
    .into_straight();
    assert!(!frame.premultiplied);
    assert_eq!(frame.data, vec![128, 0, 0, 128]);
}

#[test]
fn text_fill_draws_near_origin() {
    let Some(font) = test_font() else {
        eprintln!("skipping: no test font available");
        return;
    };
    let mut canvas = PixmapCanvas::new(SurfaceSize::new(200, 100).unwrap()).unwrap();
    canvas.concat(Affine::translate(Vec2::new(100.0, 70.0)));
    let style = PaintStyle::new(Rgba8::WHITE, font)
        .with_text_size(40.0)
        .with_align(TextAlign::Center);
    canvas.draw_text("12:00", Point::ORIGIN, &style).unwrap();

    let frame = canvas.snapshot();
    let mut min_x = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    for (i, px) in frame.data.chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let (x, y) = ((i as u32) % frame.width, (i as u32) / frame.width);
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    assert!(min_x < max_x, "nothing was drawn");
    // Centered on x = 100, sitting on the baseline at y = 70.
    let mid = (min_x + max_x) / 2;
    assert!((90..=110).contains(&mid), "mid = {mid}");
    assert!((60..=75).contains(&max_y), "max_y = {max_y}");
}

#[test]
fn stroke_and_glow_grow_coverage() {
    let Some(font) = test_font() else {
        eprintln!("skipping: no test font available");
        return;
    };
    let size = SurfaceSize::new(240, 120).unwrap();
    let base = PaintStyle::new(Rgba8::WHITE, font)
        .with_text_size(48.0)
        .with_align(TextAlign::Center);

    let draw = |style: &PaintStyle| {
        let mut canvas = PixmapCanvas::new(size).unwrap();
        canvas.concat(Affine::translate(Vec2::new(120.0, 80.0)));
        canvas.draw_text("8:08", Point::ORIGIN, style).unwrap();
        covered(&canvas)
    };

    let fill = draw(&base);
    let stroke = draw(&base.clone().with_mode(PaintMode::Stroke { width: 5.0 }));
    let glow = draw(&base.clone().with_glow(Glow::Outer { radius: 10.0 }));
    assert!(fill > 0);
    assert!(stroke > fill, "stroke {stroke} <= fill {fill}");
    assert!(glow > fill, "glow {glow} <= fill {fill}");
}

#[test]
fn empty_text_draws_nothing() {
    let Some(font) = test_font() else {
        return;
    };
    let mut canvas = PixmapCanvas::new(SurfaceSize::new(10, 10).unwrap()).unwrap();
    let style = PaintStyle::new(Rgba8::WHITE, font).with_text_size(12.0);
    canvas.draw_text("", Point::ORIGIN, &style).unwrap();
    assert_eq!(covered(&canvas), 0);
}

#[test]
fn zero_text_size_is_rejected() {
    let mut canvas = PixmapCanvas::new(SurfaceSize::new(10, 10).unwrap()).unwrap();
    let style = PaintStyle::new(Rgba8::WHITE, FontRef::new("none", vec![0u8; 4]));
    let err = canvas.draw_text("1:00", Point::ORIGIN, &style).unwrap_err();
    assert!(matches!(err, ClockError::Validation(_)));
}
