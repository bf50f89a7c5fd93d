use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Rect;
use crate::foundation::error::{ClockError, ClockResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded background bitmap, premultiplied RGBA8.
///
/// Cloning shares the pixel buffer; the bitmap is never mutated after decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl BackgroundImage {
    /// Wrap already premultiplied pixels.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> ClockResult<Self> {
        if width == 0 || height == 0 {
            return Err(ClockError::validation("image must be non-empty"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| ClockError::validation("image dimensions overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(ClockError::validation(format!(
                "image byte len {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Premultiply straight-alpha pixels and wrap them.
    pub fn from_straight(width: u32, height: u32, mut rgba8: Vec<u8>) -> ClockResult<Self> {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul(width, height, rgba8)
    }

    /// Single-color image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> ClockResult<Self> {
        let n = (width as usize).saturating_mul(height as usize);
        Self::from_straight(width, height, rgba.repeat(n))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// `[0, 0]..[width - 1, height - 1]`, the source rect used for the background blit.
    pub fn inclusive_bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            f64::from(self.width - 1),
            f64::from(self.height - 1),
        )
    }

    pub(crate) fn same_pixels(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rgba8_premul, &other.rgba8_premul)
    }
}

/// Decode any format `image` understands into a premultiplied bitmap.
pub fn decode_image(bytes: &[u8]) -> ClockResult<BackgroundImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    BackgroundImage::from_straight(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
