use std::fmt;
use std::sync::Arc;

use crate::foundation::core::Rgba8;

/// Shared handle to raw font bytes (TrueType/OpenType).
///
/// Fonts are identified by name; two handles with the same name are expected to carry the same
/// bytes.
#[derive(Clone)]
pub struct FontRef {
    name: Arc<str>,
    data: Arc<Vec<u8>>,
}

impl FontRef {
    /// Wrap font bytes under a resource name.
    pub fn new(name: impl Into<Arc<str>>, data: impl Into<Arc<Vec<u8>>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Resource name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Font file bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        self.name.clone()
    }
}

impl fmt::Debug for FontRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontRef")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl PartialEq for FontRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && (Arc::ptr_eq(&self.data, &other.data) || self.data == other.data)
    }
}

/// How glyph outlines are painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaintMode {
    /// Fill the glyph interior.
    Fill,
    /// Stroke the glyph outline with round joins and caps.
    Stroke {
        /// Stroke width in pixels.
        width: f32,
    },
}

/// Blur applied to a painted layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Glow {
    /// Crisp output.
    None,
    /// Blurred halo kept only outside the painted shape.
    Outer {
        /// Blur radius in pixels.
        radius: f32,
    },
}

/// Horizontal placement of text relative to its origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Origin at the left edge.
    #[default]
    Left,
    /// Origin at the horizontal center.
    Center,
    /// Origin at the right edge.
    Right,
}

/// Immutable description of how one text layer is painted.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintStyle {
    /// Straight-alpha paint color.
    pub color: Rgba8,
    /// Fill or stroke.
    pub mode: PaintMode,
    /// Optional outer glow.
    pub glow: Glow,
    /// Font used for shaping and rasterizing.
    pub font: FontRef,
    /// Font size in pixels.
    pub text_size: f32,
    /// Horizontal alignment around the draw origin.
    pub align: TextAlign,
}

impl PaintStyle {
    /// Filled, unblurred, left-aligned style with no size set yet.
    pub fn new(color: Rgba8, font: FontRef) -> Self {
        Self {
            color,
            mode: PaintMode::Fill,
            glow: Glow::None,
            font,
            text_size: 0.0,
            align: TextAlign::Left,
        }
    }

    /// Same style, different paint mode.
    pub fn with_mode(mut self, mode: PaintMode) -> Self {
        self.mode = mode;
        self
    }

    /// Same style, different glow.
    pub fn with_glow(mut self, glow: Glow) -> Self {
        self.glow = glow;
        self
    }

    /// Same style, different alignment.
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Derived copy carrying `text_size`.
    pub fn with_text_size(&self, text_size: f32) -> Self {
        Self {
            text_size,
            ..self.clone()
        }
    }
}

/// One of the three painted text layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Wide blurred halo, painted first.
    Glow,
    /// Outline, painted second.
    Stroke,
    /// Solid glyphs, painted last.
    Fill,
}

/// The three styles making up the neon text effect.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStack {
    /// Halo style.
    pub glow: PaintStyle,
    /// Outline style.
    pub stroke: PaintStyle,
    /// Body style.
    pub fill: PaintStyle,
}

impl TextStack {
    /// Styles in back-to-front paint order.
    pub fn layers(&self) -> [(Layer, &PaintStyle); 3] {
        [
            (Layer::Glow, &self.glow),
            (Layer::Stroke, &self.stroke),
            (Layer::Fill, &self.fill),
        ]
    }

    /// Style for a given layer.
    pub fn style(&self, layer: Layer) -> &PaintStyle {
        match layer {
            Layer::Glow => &self.glow,
            Layer::Stroke => &self.stroke,
            Layer::Fill => &self.fill,
        }
    }
}
