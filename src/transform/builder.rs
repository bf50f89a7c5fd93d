use crate::foundation::core::{Affine, Point};
use crate::transform::camera::Camera;

/// Builds the per-frame text transform from the camera and the scene anchor.
#[derive(Clone, Debug, Default)]
pub struct TransformBuilder {
    camera: Camera,
}

impl TransformBuilder {
    /// Builder with an identity camera.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder around a preconfigured camera.
    pub fn with_camera(camera: Camera) -> Self {
        Self { camera }
    }

    /// The camera used for projection.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access for hosts that animate the camera.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Matrix placing local `(0,0)` at `anchor`.
    ///
    /// The result is rebuilt from the camera on every call; nothing accumulates between frames
    /// and the camera pose is left as found.
    pub fn build(&mut self, anchor: Point) -> Affine {
        self.camera.save();
        let matrix = self.camera.matrix();
        self.camera.restore();
        matrix.then_translate(anchor.to_vec2())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/builder.rs"]
mod tests;
