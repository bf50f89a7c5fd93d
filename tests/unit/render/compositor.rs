use super::*;
use crate::clock::locale::ClockLocale;
use crate::foundation::core::{Affine, Point, Rect, Rgba8, SurfaceSize, Vec2};
use crate::foundation::error::ClockError;
use crate::render::paint::{FontRef, PaintStyle};
use crate::render::recording::{DrawOp, RecordingCanvas};

fn compositor() -> FrameCompositor {
    FrameCompositor::new(TimeFormatter::new(
        time::UtcOffset::UTC,
        ClockLocale::english(),
    ))
}

fn stack() -> TextStack {
    let font = FontRef::new("clock", vec![0u8; 4]);
    TextStack {
        glow: PaintStyle::new(Rgba8::new(0, 255, 255, 80), font.clone()),
        stroke: PaintStyle::new(Rgba8::new(0, 255, 255, 255), font.clone()),
        fill: PaintStyle::new(Rgba8::WHITE, font),
    }
}

fn scene() -> (BackgroundImage, SceneGeometry) {
    let bg = BackgroundImage::solid(720, 1280, [10, 10, 40, 255]).unwrap();
    let geometry = SceneGeometry::from_surface(SurfaceSize::new(1080, 1920).unwrap());
    (bg, geometry)
}

#[test]
fn frame_draws_background_then_text_under_anchor_transform() {
    let (bg, geometry) = scene();
    let mut canvas = RecordingCanvas::new();
    // 13:05 UTC
    let ts = (13 * 3600 + 5 * 60) * 1000;
    compositor()
        .composite_frame(Some(&mut canvas), &bg, &geometry, &stack(), 160.0, ts)
        .unwrap();

    let ops = canvas.ops();
    assert_eq!(ops.len(), 7);
    assert_eq!(ops[0], DrawOp::Save);
    assert_eq!(
        ops[1],
        DrawOp::Image {
            width: 720,
            height: 1280,
            src: Rect::new(0.0, 0.0, 719.0, 1279.0),
            dst: Rect::new(0.0, 0.0, 1079.0, 1919.0),
        }
    );
    let anchor = Affine::translate(Vec2::new(540.0, 480.0));
    assert_eq!(ops[2], DrawOp::Concat(anchor));
    for op in &ops[3..6] {
        let DrawOp::Text {
            text,
            origin,
            transform,
            style,
        } = op
        else {
            panic!("expected text op, got {op:?}");
        };
        assert_eq!(text, "1:05 PM");
        assert_eq!(*origin, Point::ORIGIN);
        assert_eq!(*transform, anchor);
        assert_eq!(style.text_size, 160.0);
    }
    assert_eq!(ops[6], DrawOp::Restore);
    assert_eq!(canvas.save_count(), 0);
    assert_eq!(canvas.transform(), Affine::IDENTITY);
}

#[test]
fn save_count_balanced_when_drawing_fails() {
    let (bg, geometry) = scene();
    let mut canvas = RecordingCanvas::failing_text();
    canvas.save();
    let err = compositor()
        .composite_frame(Some(&mut canvas), &bg, &geometry, &stack(), 160.0, 0)
        .unwrap_err();
    assert!(matches!(err, ClockError::Render(_)));
    assert_eq!(canvas.save_count(), 1);
    assert_eq!(canvas.ops().last(), Some(&DrawOp::Restore));
}

#[test]
fn repeated_frames_do_not_accumulate_transforms() {
    let (bg, geometry) = scene();
    let mut compositor = compositor();
    let mut canvas = RecordingCanvas::new();
    for ts in [0, 40, 80] {
        compositor
            .composite_frame(Some(&mut canvas), &bg, &geometry, &stack(), 160.0, ts)
            .unwrap();
    }
    let transforms: Vec<Affine> = canvas
        .text_ops()
        .map(|op| match op {
            DrawOp::Text { transform, .. } => *transform,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(transforms.len(), 9);
    assert!(transforms.iter().all(|t| *t == transforms[0]));
    assert_eq!(canvas.save_count(), 0);
}
