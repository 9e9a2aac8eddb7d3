use glam::{Mat4, Vec3};

/// Position uploaded as `viewPos` for specular terms.
///
/// This differs from [`Camera::eye`]: highlights are computed
/// against this point, not against the eye the view matrix is built from.
pub const SHADING_VIEW_POS: Vec3 = Vec3::new(0.0, 1.0, 5.0);

/// Fixed look-at camera with a perspective projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// The scene camera for a surface with the given aspect ratio.
    #[must_use]
    pub fn cornell(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.8, 2.2),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 45.0,
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// wgpu clip space, depth in `[0, 1]`.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }
}
