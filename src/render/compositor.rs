use crate::assets::decode::BackgroundImage;
use crate::clock::format::TimeFormatter;
use crate::foundation::error::ClockResult;
use crate::render::canvas::Canvas;
use crate::render::layers::LayeredTextRenderer;
use crate::render::paint::TextStack;
use crate::scene::geometry::SceneGeometry;
use crate::transform::builder::TransformBuilder;

/// Draws one complete frame: background, then the clock text at the scene anchor.
#[derive(Debug)]
pub struct FrameCompositor {
    formatter: TimeFormatter,
    transforms: TransformBuilder,
    layers: LayeredTextRenderer,
}

impl FrameCompositor {
    /// Compositor formatting time with `formatter` and an identity camera.
    pub fn new(formatter: TimeFormatter) -> Self {
        Self {
            formatter,
            transforms: TransformBuilder::new(),
            layers: LayeredTextRenderer,
        }
    }

    /// Formatter used for the clock string.
    pub fn formatter(&self) -> &TimeFormatter {
        &self.formatter
    }

    /// Transform builder, for camera adjustments.
    pub fn transforms_mut(&mut self) -> &mut TransformBuilder {
        &mut self.transforms
    }

    /// Composite one frame into `canvas`.
    ///
    /// `None` means the surface was unavailable; the frame is skipped. The canvas save count is
    /// the same on return as on entry, whether or not drawing failed.
    pub fn composite_frame<C: Canvas + ?Sized>(
        &mut self,
        canvas: Option<&mut C>,
        background: &BackgroundImage,
        geometry: &SceneGeometry,
        stack: &TextStack,
        text_size: f32,
        timestamp_millis: i64,
    ) -> ClockResult<()> {
        let Some(canvas) = canvas else {
            tracing::trace!("no canvas, frame skipped");
            return Ok(());
        };

        let depth = canvas.save();
        let drawn = self.draw(canvas, background, geometry, stack, text_size, timestamp_millis);
        canvas.restore();
        debug_assert_eq!(canvas.save_count(), depth);
        drawn
    }

    fn draw<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        background: &BackgroundImage,
        geometry: &SceneGeometry,
        stack: &TextStack,
        text_size: f32,
        timestamp_millis: i64,
    ) -> ClockResult<()> {
        canvas.draw_image(
            background,
            background.inclusive_bounds(),
            geometry.size().inclusive_bounds(),
        )?;

        let frame = self.transforms.build(geometry.anchor());
        canvas.concat(frame);

        let text = self.formatter.format(timestamp_millis);
        self.layers.render(canvas, &text, stack, text_size)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
