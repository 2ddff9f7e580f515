//! Camera and viewer abstractions

use crate::camera::CameraPose;
use crate::coords::Viewport;
use glam::{Mat4, Vec3};

/// Trait for objects that can view a scene.
pub trait Viewer {
    /// Get the camera position.
    fn position(&self) -> Vec3;

    /// Get the view matrix.
    fn view_matrix(&self) -> Mat4;

    /// Get the projection matrix.
    fn projection_matrix(&self) -> Mat4;

    /// Get the combined view-projection matrix.
    fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get the viewport.
    fn viewport(&self) -> Viewport;
}

/// A perspective camera driven by a [`CameraPose`].
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pose: CameraPose,
    pub near: f32,
    pub far: f32,
    viewport: Viewport,
}

impl Camera {
    pub const DEFAULT_NEAR: f32 = 0.1;
    pub const DEFAULT_FAR: f32 = 1000.0;

    pub fn new(pose: CameraPose, viewport: Viewport) -> Self {
        Self {
            pose,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
            viewport,
        }
    }
}

impl Viewer for Camera {
    fn position(&self) -> Vec3 {
        self.pose.position
    }

    fn view_matrix(&self) -> Mat4 {
        self.pose.view_matrix()
    }

    fn projection_matrix(&self) -> Mat4 {
        self.pose
            .projection_matrix(self.viewport.aspect(), self.near, self.far)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Camera data as laid out for shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// View-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera eye position (w component unused).
    pub eye: [f32; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a viewer.
    pub fn from_viewer(viewer: &dyn Viewer) -> Self {
        let vp = viewer.view_projection_matrix();
        let pos = viewer.position();
        Self {
            view_proj: vp.to_cols_array_2d(),
            eye: [pos.x, pos.y, pos.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_rear_wall_point_ahead_projects_inside_clip_volume() {
        let pose = CameraPose::new(Vec3::new(5.0, 10.0, 20.0), -90.0, 0.0, 54.0);
        let camera = Camera::new(pose, Viewport::from_size(800, 600));

        let clip = camera.view_projection_matrix() * Vec4::new(5.0, 10.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_uniform_carries_eye() {
        let pose = CameraPose::new(Vec3::new(1.0, 2.0, 3.0), -90.0, 0.0, 54.0);
        let uniform = CameraUniform::from_viewer(&Camera::new(pose, Viewport::from_size(4, 3)));
        assert_eq!(uniform.eye, [1.0, 2.0, 3.0, 1.0]);
    }
}
