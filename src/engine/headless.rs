use crate::engine::host::SurfaceHost;
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::ClockResult;
use crate::render::cpu::{FrameRGBA, PixmapCanvas};
use crate::render::recording::{DrawOp, RecordingCanvas};

/// Host rendering into an in-memory pixmap.
pub struct PixmapHost {
    canvas: Option<PixmapCanvas>,
    size: SurfaceSize,
    available: bool,
    presented: u64,
}

impl PixmapHost {
    /// Host with a transparent surface of `size`.
    pub fn new(size: SurfaceSize) -> ClockResult<Self> {
        Ok(Self {
            canvas: Some(PixmapCanvas::new(size)?),
            size,
            available: true,
            presented: 0,
        })
    }

    /// Resize the surface. The engine should be told via `on_surface_changed`.
    pub fn resize(&mut self, size: SurfaceSize) -> ClockResult<()> {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.resize(size)?;
        }
        self.size = size;
        Ok(())
    }

    /// Make `lock_canvas` fail (`false`) or succeed (`true`).
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Number of presented frames.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Copy of the last presented pixels.
    pub fn snapshot(&self) -> Option<FrameRGBA> {
        self.canvas.as_ref().map(PixmapCanvas::snapshot)
    }
}

impl SurfaceHost for PixmapHost {
    type Canvas = PixmapCanvas;

    fn lock_canvas(&mut self) -> Option<PixmapCanvas> {
        if !self.available {
            return None;
        }
        self.canvas.take()
    }

    fn unlock_canvas_and_post(&mut self, canvas: PixmapCanvas) {
        self.canvas = Some(canvas);
        self.presented += 1;
    }

    fn display_size(&self) -> SurfaceSize {
        self.size
    }
}

/// Presented frames a [`RecordingHost`] keeps by default.
pub const DEFAULT_FRAME_HISTORY: usize = 64;

/// Host that keeps the draw calls of its most recent presented frames.
///
/// Older frames are dropped once the history is full; [`RecordingHost::presented`] still
/// counts every present.
#[derive(Debug)]
pub struct RecordingHost {
    size: SurfaceSize,
    available: bool,
    fail_text: bool,
    lock_attempts: u64,
    locks: u64,
    presented: u64,
    history: usize,
    frames: Vec<Vec<DrawOp>>,
}

impl RecordingHost {
    /// Host reporting `size` as its display size, keeping [`DEFAULT_FRAME_HISTORY`] frames.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            available: true,
            fail_text: false,
            lock_attempts: 0,
            locks: 0,
            presented: 0,
            history: DEFAULT_FRAME_HISTORY,
            frames: Vec::new(),
        }
    }

    /// Keep at most `frames` presented frames (at least one).
    pub fn with_history(mut self, frames: usize) -> Self {
        self.history = frames.max(1);
        self
    }

    /// Make `lock_canvas` fail (`false`) or succeed (`true`).
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Hand out canvases whose text draws fail.
    pub fn set_fail_text(&mut self, fail: bool) {
        self.fail_text = fail;
    }

    /// Calls to `lock_canvas`, including ones that found the surface unavailable.
    pub fn lock_attempts(&self) -> u64 {
        self.lock_attempts
    }

    /// Successful lock attempts.
    pub fn locks(&self) -> u64 {
        self.locks
    }

    /// Retained frames, oldest first.
    pub fn frames(&self) -> &[Vec<DrawOp>] {
        &self.frames
    }

    /// Number of presented frames, including ones no longer retained.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Forget recorded frames and reset the counters.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.presented = 0;
        self.lock_attempts = 0;
        self.locks = 0;
    }
}

impl SurfaceHost for RecordingHost {
    type Canvas = RecordingCanvas;

    fn lock_canvas(&mut self) -> Option<RecordingCanvas> {
        self.lock_attempts += 1;
        if !self.available {
            return None;
        }
        self.locks += 1;
        Some(if self.fail_text {
            RecordingCanvas::failing_text()
        } else {
            RecordingCanvas::new()
        })
    }

    fn unlock_canvas_and_post(&mut self, canvas: RecordingCanvas) {
        if self.frames.len() >= self.history {
            let excess = self.frames.len() + 1 - self.history;
            self.frames.drain(..excess);
        }
        self.frames.push(canvas.into_ops());
        self.presented += 1;
    }

    fn display_size(&self) -> SurfaceSize {
        self.size
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/headless.rs"]
mod tests;
