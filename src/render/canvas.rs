use crate::assets::decode::BackgroundImage;
use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::ClockResult;
use crate::render::paint::PaintStyle;

/// Drawing surface handed out by a surface host for one frame.
///
/// Canvases keep a current transform plus a save stack; every draw call is mapped through the
/// current transform.
pub trait Canvas {
    /// Push the current transform. Returns the save count before the push.
    fn save(&mut self) -> usize;

    /// Pop the last saved transform. Unbalanced restores are ignored.
    fn restore(&mut self);

    /// Number of outstanding saves.
    fn save_count(&self) -> usize;

    /// Pre-multiply `matrix` onto the current transform, so it applies before it.
    fn concat(&mut self, matrix: Affine);

    /// Current transform.
    fn transform(&self) -> Affine;

    /// Draw the `src` region of `image` scaled into `dst`.
    fn draw_image(&mut self, image: &BackgroundImage, src: Rect, dst: Rect) -> ClockResult<()>;

    /// Draw a single line of text with its baseline origin at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, style: &PaintStyle) -> ClockResult<()>;
}

/// Transform plus save stack shared by canvas implementations.
#[derive(Clone, Debug, Default)]
pub(crate) struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl TransformStack {
    pub(crate) fn save(&mut self) -> usize {
        let depth = self.saved.len();
        self.saved.push(self.current);
        depth
    }

    pub(crate) fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(t) => {
                self.current = t;
                true
            }
            None => false,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.saved.len()
    }

    pub(crate) fn concat(&mut self, matrix: Affine) {
        self.current *= matrix;
    }

    pub(crate) fn current(&self) -> Affine {
        self.current
    }

    pub(crate) fn reset(&mut self) {
        self.current = Affine::IDENTITY;
        self.saved.clear();
    }
}
