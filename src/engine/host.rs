use crate::foundation::core::SurfaceSize;
use crate::render::canvas::Canvas;

/// The display surface an engine draws into.
///
/// A host hands out its canvas for one frame at a time. The canvas must come back through
/// [`SurfaceHost::unlock_canvas_and_post`], which presents it.
pub trait SurfaceHost {
    /// Canvas type handed out while the surface is locked.
    type Canvas: Canvas;

    /// Lock the surface for drawing. `None` when the surface is unavailable.
    fn lock_canvas(&mut self) -> Option<Self::Canvas>;

    /// Return a locked canvas and present its contents.
    fn unlock_canvas_and_post(&mut self, canvas: Self::Canvas);

    /// Size of the display, used for the initial scene geometry.
    fn display_size(&self) -> SurfaceSize;
}

/// Scoped surface lock. Dropping it unlocks and presents, also on early return or error.
pub struct SurfaceLock<'h, H: SurfaceHost + ?Sized> {
    host: &'h mut H,
    canvas: Option<H::Canvas>,
}

impl<'h, H: SurfaceHost + ?Sized> SurfaceLock<'h, H> {
    /// Lock `host`'s surface.
    pub fn acquire(host: &'h mut H) -> Self {
        let canvas = host.lock_canvas();
        Self { host, canvas }
    }

    /// Whether a canvas was obtained.
    pub fn is_locked(&self) -> bool {
        self.canvas.is_some()
    }

    /// The locked canvas, if the surface was available.
    pub fn canvas_mut(&mut self) -> Option<&mut H::Canvas> {
        self.canvas.as_mut()
    }
}

impl<H: SurfaceHost + ?Sized> Drop for SurfaceLock<'_, H> {
    fn drop(&mut self) {
        if let Some(canvas) = self.canvas.take() {
            self.host.unlock_canvas_and_post(canvas);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/host.rs"]
mod tests;
