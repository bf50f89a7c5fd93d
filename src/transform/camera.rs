use crate::foundation::core::{Affine, Vec2};

/// Pose held by a [`Camera`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraPose {
    /// Horizontal translation in pixels.
    pub x: f64,
    /// Vertical translation in pixels.
    pub y: f64,
    /// Rotation about the view axis, degrees clockwise.
    pub rotation_deg: f64,
}

/// Pseudo-3D camera with a save/restore pose stack.
///
/// Only in-plane motion is modelled; the camera starts at the identity pose and projects to an
/// affine matrix with [`Camera::matrix`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Camera {
    pose: CameraPose,
    saved: Vec<CameraPose>,
}

impl Camera {
    /// Camera at the identity pose.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pose.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Push the current pose.
    pub fn save(&mut self) {
        self.saved.push(self.pose);
    }

    /// Pop the last saved pose. No-op when nothing was saved.
    pub fn restore(&mut self) {
        if let Some(pose) = self.saved.pop() {
            self.pose = pose;
        }
    }

    /// Number of poses currently saved.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Move the camera in its plane.
    pub fn translate(&mut self, x: f64, y: f64) {
        self.pose.x += x;
        self.pose.y += y;
    }

    /// Rotate about the view axis.
    pub fn rotate_z(&mut self, degrees: f64) {
        self.pose.rotation_deg += degrees;
    }

    /// Project the current pose to a 2D matrix.
    pub fn matrix(&self) -> Affine {
        Affine::rotate(self.pose.rotation_deg.to_radians())
            .then_translate(Vec2::new(self.pose.x, self.pose.y))
    }
}
