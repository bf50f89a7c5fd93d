use super::*;
use crate::engine::host::SurfaceLock;
use crate::render::canvas::Canvas;

#[test]
fn pixmap_host_hands_out_and_takes_back_its_canvas() {
    let mut host = PixmapHost::new(SurfaceSize::new(8, 8).unwrap()).unwrap();
    let canvas = host.lock_canvas().unwrap();
    assert!(host.lock_canvas().is_none());
    host.unlock_canvas_and_post(canvas);
    assert_eq!(host.presented(), 1);
    assert!(host.snapshot().is_some());
}

#[test]
fn pixmap_host_resize_updates_display_size() {
    let mut host = PixmapHost::new(SurfaceSize::new(8, 8).unwrap()).unwrap();
    host.resize(SurfaceSize::new(4, 2).unwrap()).unwrap();
    assert_eq!(host.display_size(), SurfaceSize::new(4, 2).unwrap());
    let frame = host.snapshot().unwrap();
    assert_eq!((frame.width, frame.height), (4, 2));
}

#[test]
fn pixmap_host_can_be_unavailable() {
    let mut host = PixmapHost::new(SurfaceSize::new(8, 8).unwrap()).unwrap();
    host.set_available(false);
    assert!(host.lock_canvas().is_none());
    assert_eq!(host.presented(), 0);
}

#[test]
fn recording_host_keeps_one_entry_per_present() {
    let mut host = RecordingHost::new(SurfaceSize::new(8, 8).unwrap());
    for _ in 0..3 {
        let mut lock = SurfaceLock::acquire(&mut host);
        let canvas = lock.canvas_mut().unwrap();
        canvas.save();
        canvas.restore();
    }
    assert_eq!(host.locks(), 3);
    assert_eq!(host.presented(), 3);
    assert!(host.frames().iter().all(|f| f == &vec![DrawOp::Save, DrawOp::Restore]));
    host.clear();
    assert_eq!(host.presented(), 0);
}

#[test]
fn recording_host_counts_unavailable_lock_attempts() {
    let mut host = RecordingHost::new(SurfaceSize::new(8, 8).unwrap());
    host.set_available(false);
    assert!(host.lock_canvas().is_none());
    assert_eq!(host.lock_attempts(), 1);
    assert_eq!(host.locks(), 0);
}

#[test]
fn recording_host_history_is_bounded() {
    let mut host = RecordingHost::new(SurfaceSize::new(8, 8).unwrap()).with_history(2);
    for i in 0..5 {
        let mut canvas = host.lock_canvas().unwrap();
        for _ in 0..i {
            canvas.save();
        }
        host.unlock_canvas_and_post(canvas);
    }
    assert_eq!(host.presented(), 5);
    assert_eq!(host.frames().len(), 2);
    assert_eq!(host.frames()[0].len(), 3);
    assert_eq!(host.frames()[1].len(), 4);
}

#[test]
fn default_history_caps_long_runs() {
    let mut host = RecordingHost::new(SurfaceSize::new(8, 8).unwrap());
    for _ in 0..(DEFAULT_FRAME_HISTORY + 10) {
        let canvas = host.lock_canvas().unwrap();
        host.unlock_canvas_and_post(canvas);
    }
    assert_eq!(host.frames().len(), DEFAULT_FRAME_HISTORY);
    assert_eq!(host.presented(), (DEFAULT_FRAME_HISTORY + 10) as u64);
}
