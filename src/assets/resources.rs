use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::assets::color::ColorDef;
use crate::assets::decode::{BackgroundImage, decode_image};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{ClockError, ClockResult};
use crate::render::paint::FontRef;

/// Lookup of named resources: images, fonts, colors and dimensions.
///
/// Lookups happen at service/engine construction; a missing token is a [`ClockError::Resource`].
pub trait ResourceProvider: Send + Sync {
    /// Decode the image registered under `id`.
    fn decode_image(&self, id: &str) -> ClockResult<BackgroundImage>;
    /// Color registered under `token`.
    fn resolve_color(&self, token: &str) -> ClockResult<Rgba8>;
    /// Font registered under `token`.
    fn resolve_font(&self, token: &str) -> ClockResult<FontRef>;
    /// Dimension in pixels registered under `token`.
    fn resolve_dimension(&self, token: &str) -> ClockResult<f32>;
}

fn missing(kind: &str, token: &str) -> ClockError {
    ClockError::resource(format!("unknown {kind} resource '{token}'"))
}

/// In-memory resource table.
#[derive(Clone, Debug, Default)]
pub struct StaticResources {
    images: BTreeMap<String, BackgroundImage>,
    fonts: BTreeMap<String, FontRef>,
    colors: BTreeMap<String, Rgba8>,
    dimensions: BTreeMap<String, f32>,
}

impl StaticResources {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image.
    pub fn with_image(mut self, id: impl Into<String>, image: BackgroundImage) -> Self {
        self.images.insert(id.into(), image);
        self
    }

    /// Register a font. The font keeps its own name; `token` is the lookup key.
    pub fn with_font(mut self, token: impl Into<String>, font: FontRef) -> Self {
        self.fonts.insert(token.into(), font);
        self
    }

    /// Register a color.
    pub fn with_color(mut self, token: impl Into<String>, color: Rgba8) -> Self {
        self.colors.insert(token.into(), color);
        self
    }

    /// Register a dimension.
    pub fn with_dimension(mut self, token: impl Into<String>, px: f32) -> Self {
        self.dimensions.insert(token.into(), px);
        self
    }
}

impl ResourceProvider for StaticResources {
    fn decode_image(&self, id: &str) -> ClockResult<BackgroundImage> {
        self.images.get(id).cloned().ok_or_else(|| missing("image", id))
    }

    fn resolve_color(&self, token: &str) -> ClockResult<Rgba8> {
        self.colors.get(token).copied().ok_or_else(|| missing("color", token))
    }

    fn resolve_font(&self, token: &str) -> ClockResult<FontRef> {
        self.fonts.get(token).cloned().ok_or_else(|| missing("font", token))
    }

    fn resolve_dimension(&self, token: &str) -> ClockResult<f32> {
        self.dimensions
            .get(token)
            .copied()
            .ok_or_else(|| missing("dimension", token))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestDef {
    #[serde(default)]
    images: BTreeMap<String, String>,
    #[serde(default)]
    fonts: BTreeMap<String, String>,
    #[serde(default)]
    colors: BTreeMap<String, ColorDef>,
    #[serde(default)]
    dimensions: BTreeMap<String, f32>,
}

/// Resources described by a JSON manifest; file paths are relative to `root`.
///
/// Files are read on lookup, not at load time.
#[derive(Debug)]
pub struct ResourceManifest {
    root: PathBuf,
    images: BTreeMap<String, String>,
    fonts: BTreeMap<String, String>,
    colors: BTreeMap<String, Rgba8>,
    dimensions: BTreeMap<String, f32>,
}

impl ResourceManifest {
    /// Parse manifest JSON. Paths are validated here.
    pub fn from_json_str(json: &str, root: impl Into<PathBuf>) -> ClockResult<Self> {
        let def: ManifestDef = serde_json::from_str(json)
            .map_err(|e| ClockError::serde(format!("resource manifest: {e}")))?;

        let normalize_all = |m: BTreeMap<String, String>| -> ClockResult<BTreeMap<String, String>> {
            m.into_iter()
                .map(|(k, v)| Ok((k, normalize_rel_path(&v)?)))
                .collect()
        };

        let mut dimensions = BTreeMap::new();
        for (token, px) in def.dimensions {
            if !px.is_finite() || px < 0.0 {
                return Err(ClockError::validation(format!(
                    "dimension '{token}' must be finite and >= 0"
                )));
            }
            dimensions.insert(token, px);
        }

        Ok(Self {
            root: root.into(),
            images: normalize_all(def.images)?,
            fonts: normalize_all(def.fonts)?,
            colors: def
                .colors
                .into_iter()
                .map(|(k, c)| (k, c.to_rgba8()))
                .collect(),
            dimensions,
        })
    }

    /// Read a manifest file; its directory becomes the resource root.
    pub fn from_path(path: &Path) -> ClockResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read resource manifest '{}'", path.display()))?;
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_json_str(&json, root)
    }

    /// Directory resource paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_bytes(&self, rel: &str) -> ClockResult<Vec<u8>> {
        let p = self.root.join(Path::new(rel));
        std::fs::read(&p).map_err(|e| {
            ClockError::resource(format!("failed to read resource '{}': {e}", p.display()))
        })
    }
}

impl ResourceProvider for ResourceManifest {
    fn decode_image(&self, id: &str) -> ClockResult<BackgroundImage> {
        let rel = self.images.get(id).ok_or_else(|| missing("image", id))?;
        let bytes = self.read_bytes(rel)?;
        decode_image(&bytes)
            .map_err(|e| ClockError::resource(format!("image '{id}' ({rel}): {e:#}")))
    }

    fn resolve_color(&self, token: &str) -> ClockResult<Rgba8> {
        self.colors.get(token).copied().ok_or_else(|| missing("color", token))
    }

    fn resolve_font(&self, token: &str) -> ClockResult<FontRef> {
        let rel = self.fonts.get(token).ok_or_else(|| missing("font", token))?;
        Ok(FontRef::new(token, self.read_bytes(rel)?))
    }

    fn resolve_dimension(&self, token: &str) -> ClockResult<f32> {
        self.dimensions
            .get(token)
            .copied()
            .ok_or_else(|| missing("dimension", token))
    }
}

/// Normalize a manifest-relative path: forward slashes, no `.` segments, no `..`, not absolute.
pub(crate) fn normalize_rel_path(source: &str) -> ClockResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ClockError::validation("resource paths must be relative"));
    }
    if s.is_empty() {
        return Err(ClockError::validation("resource path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ClockError::validation(
                "resource paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ClockError::validation(
            "resource path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resources.rs"]
mod tests;
