use crate::foundation::core::Point;
use crate::foundation::error::ClockResult;
use crate::render::canvas::Canvas;
use crate::render::paint::{TextAlign, TextStack};

/// Paints the neon text effect: the same string drawn glow, then stroke, then fill.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayeredTextRenderer;

impl LayeredTextRenderer {
    /// Draw `text` at the local origin once per layer of `stack`, sized to `text_size` and
    /// centered. Stops at the first failing draw.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        text: &str,
        stack: &TextStack,
        text_size: f32,
    ) -> ClockResult<()> {
        for (layer, style) in stack.layers() {
            tracing::trace!(?layer, text_size, "draw text layer");
            let style = style.with_text_size(text_size).with_align(TextAlign::Center);
            canvas.draw_text(text, Point::ORIGIN, &style)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layers.rs"]
mod tests;
