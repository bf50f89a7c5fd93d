use std::sync::Arc;
use std::time::Duration;

use crate::assets::decode::BackgroundImage;
use crate::assets::resources::ResourceProvider;
use crate::clock::format::TimeFormatter;
use crate::clock::source::WallClock;
use crate::engine::config::EngineConfig;
use crate::engine::host::{SurfaceHost, SurfaceLock};
use crate::engine::scheduler::{RedrawScheduler, SchedulerState};
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::ClockResult;
use crate::render::compositor::FrameCompositor;
use crate::render::paint::TextStack;
use crate::scene::geometry::SceneGeometry;

/// One wallpaper instance bound to one surface host.
///
/// The host delivers notifications through the `on_*` methods and drives time through
/// [`ClockEngine::advance_to`]. All calls are expected on a single thread.
pub struct ClockEngine<H: SurfaceHost> {
    host: H,
    background: BackgroundImage,
    resources: Arc<dyn ResourceProvider>,
    text_size_token: String,
    stack: TextStack,
    geometry: SceneGeometry,
    compositor: FrameCompositor,
    scheduler: RedrawScheduler,
    clock: Box<dyn WallClock>,
    frames: u64,
}

impl<H: SurfaceHost> std::fmt::Debug for ClockEngine<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockEngine")
            .field("geometry", &self.geometry)
            .field("state", &self.scheduler.state())
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl<H: SurfaceHost> ClockEngine<H> {
    /// Build an engine, resolving paint styles from `resources`.
    ///
    /// Fails with `ClockError::Resource` when a color, font or the text size token is missing.
    pub fn new(
        host: H,
        background: BackgroundImage,
        resources: Arc<dyn ResourceProvider>,
        config: &EngineConfig,
        formatter: TimeFormatter,
        clock: Box<dyn WallClock>,
    ) -> ClockResult<Self> {
        config.validate()?;
        let stack = config.resolve_text_stack(resources.as_ref())?;
        resources.resolve_dimension(&config.text_size)?;

        let size = host.display_size();
        SurfaceSize::new(size.width, size.height)?;
        let geometry = SceneGeometry::from_surface(size);
        tracing::debug!(width = size.width, height = size.height, "engine created");

        Ok(Self {
            host,
            background,
            resources,
            text_size_token: config.text_size.clone(),
            stack,
            geometry,
            compositor: FrameCompositor::new(formatter),
            scheduler: RedrawScheduler::new(config.redraw_interval()),
            clock,
            frames: 0,
        })
    }

    /// The host is now shown or hidden.
    #[tracing::instrument(skip(self))]
    pub fn on_visibility_changed(&mut self, visible: bool) {
        if self.scheduler.is_destroyed() {
            return;
        }
        if visible {
            self.redraw_and_rearm();
        } else {
            self.scheduler.disarm();
        }
    }

    /// The surface was resized. Redraws immediately while visible.
    #[tracing::instrument(skip(self))]
    pub fn on_surface_changed(&mut self, size: SurfaceSize) {
        if self.scheduler.is_destroyed() {
            return;
        }
        if size.width == 0 || size.height == 0 {
            tracing::warn!(?size, "ignoring empty surface size");
            return;
        }
        self.geometry = SceneGeometry::from_surface(size);
        if self.scheduler.is_visible() {
            self.redraw_and_rearm();
        }
    }

    /// The host scrolled the wallpaper. Redraws immediately while visible.
    #[tracing::instrument(skip(self))]
    pub fn on_offsets_changed(&mut self) {
        if self.scheduler.is_visible() {
            self.redraw_and_rearm();
        }
    }

    /// The drawable went away. The engine idles until it is shown again.
    #[tracing::instrument(skip(self))]
    pub fn on_surface_destroyed(&mut self) {
        self.scheduler.disarm();
    }

    /// Final teardown. No frame is drawn afterwards.
    #[tracing::instrument(skip(self))]
    pub fn on_destroy(&mut self) {
        self.scheduler.destroy();
    }

    /// Report host time `now` (monotonic) and fire the pending tick if it is due.
    ///
    /// A tick that is overdue by several intervals still draws a single frame; the next one is
    /// scheduled an interval after `now`. Notifications arm relative to the last reported time.
    /// Returns whether a frame was drawn.
    pub fn advance_to(&mut self, now: Duration) -> bool {
        if self.scheduler.take_due(now).is_none() {
            return false;
        }
        self.draw_frame();
        if self.scheduler.is_visible() {
            self.scheduler.arm();
        }
        true
    }

    /// When the next tick is due, if one is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Current scene geometry.
    pub fn geometry(&self) -> &SceneGeometry {
        &self.geometry
    }

    /// Scheduler state.
    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Pending ticks.
    pub fn pending_ticks(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Frames composited so far, including ones whose surface was unavailable.
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Resolved paint styles.
    pub fn text_stack(&self) -> &TextStack {
        &self.stack
    }

    /// The surface host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The surface host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Compositor, for camera adjustments.
    pub fn compositor_mut(&mut self) -> &mut FrameCompositor {
        &mut self.compositor
    }

    fn redraw_and_rearm(&mut self) {
        self.draw_frame();
        self.scheduler.arm();
    }

    fn draw_frame(&mut self) {
        self.frames += 1;
        let timestamp = self.clock.now_millis();
        let mut lock = SurfaceLock::acquire(&mut self.host);
        if !lock.is_locked() {
            tracing::debug!("surface unavailable, frame skipped");
            return;
        }

        let drawn = self
            .resources
            .resolve_dimension(&self.text_size_token)
            .and_then(|text_size| {
                self.compositor.composite_frame(
                    lock.canvas_mut(),
                    &self.background,
                    &self.geometry,
                    &self.stack,
                    text_size,
                    timestamp,
                )
            });
        drop(lock);

        if let Err(err) = drawn {
            tracing::warn!(error = %err, "frame failed; surface presented anyway");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/clock_engine.rs"]
mod tests;
