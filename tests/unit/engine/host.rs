use super::*;
use crate::engine::headless::RecordingHost;
use crate::render::recording::DrawOp;

#[test]
fn dropping_the_lock_presents() {
    let mut host = RecordingHost::new(SurfaceSize::new(10, 20).unwrap());
    {
        let mut lock = SurfaceLock::acquire(&mut host);
        assert!(lock.is_locked());
        lock.canvas_mut().unwrap().save();
    }
    assert_eq!(host.presented(), 1);
    assert_eq!(host.frames()[0], vec![DrawOp::Save]);
}

#[test]
fn unavailable_surface_presents_nothing() {
    let mut host = RecordingHost::new(SurfaceSize::new(10, 20).unwrap());
    host.set_available(false);
    {
        let mut lock = SurfaceLock::acquire(&mut host);
        assert!(!lock.is_locked());
        assert!(lock.canvas_mut().is_none());
    }
    assert_eq!(host.presented(), 0);
}

#[test]
fn early_return_with_error_still_presents() {
    fn frame(host: &mut RecordingHost) -> Result<(), &'static str> {
        let _lock = SurfaceLock::acquire(host);
        Err("boom")
    }
    let mut host = RecordingHost::new(SurfaceSize::new(10, 20).unwrap());
    assert!(frame(&mut host).is_err());
    assert_eq!(host.presented(), 1);
}
