use crate::foundation::core::{Point, SurfaceSize};

/// Surface extent and the text anchor derived from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneGeometry {
    size: SurfaceSize,
    anchor: Point,
}

impl SceneGeometry {
    /// Geometry for a surface: anchor at half the width and a quarter of the height.
    pub fn from_surface(size: SurfaceSize) -> Self {
        // Quarter height puts the clock in the upper part of the screen.
        let anchor = Point::new(f64::from(size.width) / 2.0, f64::from(size.height) / 4.0);
        Self { size, anchor }
    }

    /// Surface dimensions.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Where the text's local origin lands on screen.
    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/geometry.rs"]
mod tests;
