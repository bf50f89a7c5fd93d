use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::assets::resources::ResourceProvider;
use crate::foundation::error::{ClockError, ClockResult};
use crate::render::paint::{Glow, PaintMode, PaintStyle, TextStack};

/// Resource tokens and effect parameters for one text layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    /// Color token.
    pub color: String,
    /// Font token.
    pub font: String,
    /// Stroke width in pixels; `None` fills the glyphs.
    #[serde(default)]
    pub stroke_width: Option<f32>,
    /// Outer glow radius in pixels; `None` or `0` disables the glow.
    #[serde(default)]
    pub glow_radius: Option<f32>,
}

impl LayerConfig {
    fn validate(&self, name: &str) -> ClockResult<()> {
        for (what, v) in [("stroke_width", self.stroke_width), ("glow_radius", self.glow_radius)] {
            if let Some(v) = v
                && (!v.is_finite() || v < 0.0)
            {
                return Err(ClockError::validation(format!(
                    "{name}.{what} must be finite and >= 0, got {v}"
                )));
            }
        }
        if self.color.is_empty() || self.font.is_empty() {
            return Err(ClockError::validation(format!(
                "{name} color and font tokens must be non-empty"
            )));
        }
        Ok(())
    }

    fn resolve(&self, resources: &dyn ResourceProvider) -> ClockResult<PaintStyle> {
        let color = resources.resolve_color(&self.color)?;
        let font = resources.resolve_font(&self.font)?;
        let mut style = PaintStyle::new(color, font);
        if let Some(width) = self.stroke_width {
            style = style.with_mode(PaintMode::Stroke { width });
        }
        if let Some(radius) = self.glow_radius.filter(|r| *r > 0.0) {
            style = style.with_glow(Glow::Outer { radius });
        }
        Ok(style)
    }
}

/// Engine configuration: cadence and the resource tokens behind each text layer.
///
/// Missing fields take the defaults of the stock neon clock wallpaper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Milliseconds between redraws while visible.
    #[serde(default = "default_interval_ms")]
    pub redraw_interval_ms: u64,
    /// Image id of the background.
    #[serde(default = "default_background")]
    pub background: String,
    /// Dimension token for the text size, resolved every frame.
    #[serde(default = "default_text_size")]
    pub text_size: String,
    /// Solid glyph layer, painted last.
    #[serde(default = "default_fill")]
    pub fill: LayerConfig,
    /// Outline layer.
    #[serde(default = "default_stroke")]
    pub stroke: LayerConfig,
    /// Halo layer, painted first.
    #[serde(default = "default_glow")]
    pub glow: LayerConfig,
}

const FONT_REGULAR: &str = "champagne_limousines";
const FONT_BOLD: &str = "champagne_limousines_bold";

fn default_interval_ms() -> u64 {
    40
}

fn default_background() -> String {
    "back_wall".to_owned()
}

fn default_text_size() -> String {
    "text_size".to_owned()
}

fn default_fill() -> LayerConfig {
    LayerConfig {
        color: "text_color".to_owned(),
        font: FONT_REGULAR.to_owned(),
        stroke_width: None,
        glow_radius: None,
    }
}

fn default_stroke() -> LayerConfig {
    LayerConfig {
        color: "text_color_stroke".to_owned(),
        font: FONT_BOLD.to_owned(),
        stroke_width: Some(5.0),
        glow_radius: Some(15.0),
    }
}

fn default_glow() -> LayerConfig {
    LayerConfig {
        color: "text_color_trans".to_owned(),
        font: FONT_BOLD.to_owned(),
        stroke_width: None,
        glow_radius: Some(45.0),
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            redraw_interval_ms: default_interval_ms(),
            background: default_background(),
            text_size: default_text_size(),
            fill: default_fill(),
            stroke: default_stroke(),
            glow: default_glow(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate JSON.
    pub fn from_json_str(json: &str) -> ClockResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| ClockError::serde(format!("parse engine config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ClockResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ClockError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ClockError::serde(format!("parse engine config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges.
    pub fn validate(&self) -> ClockResult<()> {
        if self.redraw_interval_ms == 0 {
            return Err(ClockError::validation("redraw_interval_ms must be > 0"));
        }
        if self.background.is_empty() || self.text_size.is_empty() {
            return Err(ClockError::validation(
                "background and text_size tokens must be non-empty",
            ));
        }
        self.fill.validate("fill")?;
        self.stroke.validate("stroke")?;
        self.glow.validate("glow")
    }

    /// Redraw cadence as a duration.
    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms)
    }

    /// Look up colors and fonts for all three layers.
    pub fn resolve_text_stack(&self, resources: &dyn ResourceProvider) -> ClockResult<TextStack> {
        Ok(TextStack {
            glow: self.glow.resolve(resources)?,
            stroke: self.stroke.resolve(resources)?,
            fill: self.fill.resolve(resources)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
