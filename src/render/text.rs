use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ClockError, ClockResult};
use crate::render::paint::FontRef;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
///
/// Each distinct font name is registered with the font collection once and reused afterwards.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<Arc<str>, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, font: &FontRef) -> ClockResult<String> {
        if let Some(name) = self.families.get(font.name()) {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.data().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ClockError::resource(format!("font '{}' registered no families", font.name()))
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| {
                ClockError::resource(format!("font '{}' family has no name", font.name()))
            })?
            .to_string();

        tracing::debug!(font = font.name(), family = %family_name, "registered font");
        self.families
            .insert(font.shared_name(), family_name.clone());
        Ok(family_name)
    }

    /// Shape and lay out a single unwrapped line of text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &FontRef,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> ClockResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ClockError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}
