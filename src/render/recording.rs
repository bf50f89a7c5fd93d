use crate::assets::decode::BackgroundImage;
use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::{ClockError, ClockResult};
use crate::render::canvas::{Canvas, TransformStack};
use crate::render::paint::PaintStyle;

/// A captured canvas call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// `save` was called.
    Save,
    /// `restore` was called.
    Restore,
    /// `concat` was called with this matrix.
    Concat(Affine),
    /// An image blit.
    Image {
        /// Source image width.
        width: u32,
        /// Source image height.
        height: u32,
        /// Source rectangle in image pixels.
        src: Rect,
        /// Destination rectangle in canvas space.
        dst: Rect,
    },
    /// A text draw.
    Text {
        /// Drawn string.
        text: String,
        /// Local origin passed to the call.
        origin: Point,
        /// Style passed to the call.
        style: PaintStyle,
        /// Canvas transform at the time of the call.
        transform: Affine,
    },
}

/// Canvas that records calls instead of rasterizing.
///
/// Useful for hosts without pixels and for asserting draw order.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    stack: TransformStack,
    ops: Vec<DrawOp>,
    fail_text: bool,
}

impl RecordingCanvas {
    /// Empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// A canvas whose text draws fail with a render error.
    pub fn failing_text() -> Self {
        Self {
            fail_text: true,
            ..Self::default()
        }
    }

    /// Calls recorded so far.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Consume the canvas, returning its calls.
    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Text draws only, in call order.
    pub fn text_ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Text { .. }))
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) -> usize {
        self.ops.push(DrawOp::Save);
        self.stack.save()
    }

    fn restore(&mut self) {
        if self.stack.restore() {
            self.ops.push(DrawOp::Restore);
        }
    }

    fn save_count(&self) -> usize {
        self.stack.depth()
    }

    fn concat(&mut self, matrix: Affine) {
        self.ops.push(DrawOp::Concat(matrix));
        self.stack.concat(matrix);
    }

    fn transform(&self) -> Affine {
        self.stack.current()
    }

    fn draw_image(&mut self, image: &BackgroundImage, src: Rect, dst: Rect) -> ClockResult<()> {
        self.ops.push(DrawOp::Image {
            width: image.width(),
            height: image.height(),
            src,
            dst,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &PaintStyle) -> ClockResult<()> {
        if self.fail_text {
            return Err(ClockError::render("recording canvas configured to fail text"));
        }
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            origin,
            style: style.clone(),
            transform: self.stack.current(),
        });
        Ok(())
    }
}
