//! Euler-angle camera pose
//!
//! Angles are in degrees. Yaw is measured from +X toward +Z, so a yaw of
//! -90 looks down -Z.

use glam::{Mat4, Vec3};

const PITCH_LIMIT: f32 = 89.0;

/// Position, orientation and vertical field of view of the fly camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// Degrees.
    pub yaw: f32,
    /// Degrees, kept within +-89.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
}

impl CameraPose {
    pub fn new(position: Vec3, yaw: f32, pitch: f32, fov_deg: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            fov_deg,
        }
    }

    /// Unit view direction.
    pub fn direction(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    /// Unit vector to the camera's left, parallel to the ground.
    pub fn left(&self) -> Vec3 {
        Vec3::Y.cross(self.direction()).normalize()
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.direction() * distance;
    }

    pub fn strafe_left(&mut self, distance: f32) {
        self.position += self.left() * distance;
    }

    pub fn rise(&mut self, distance: f32) {
        self.position += Vec3::Y * distance;
    }

    pub fn yaw_right(&mut self, degrees: f32) {
        self.yaw += degrees;
    }

    pub fn pitch_up(&mut self, degrees: f32) {
        self.pitch = (self.pitch + degrees).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.direction(), Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), aspect, near, far)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.yaw.is_finite()
            && self.pitch.is_finite()
            && self.fov_deg.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_minus_90_looks_down_negative_z() {
        let pose = CameraPose::new(Vec3::ZERO, -90.0, 0.0, 54.0);
        assert!((pose.direction() - Vec3::NEG_Z).length() < 1e-5);
        // Left of -Z is -X
        assert!((pose.left() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_movement_follows_direction() {
        let mut pose = CameraPose::new(Vec3::new(0.0, 10.0, 20.0), -90.0, 0.0, 54.0);
        pose.move_forward(5.0);
        assert!((pose.position - Vec3::new(0.0, 10.0, 15.0)).length() < 1e-4);
        pose.strafe_left(-2.0);
        assert!((pose.position - Vec3::new(2.0, 10.0, 15.0)).length() < 1e-4);
    }

    #[test]
    fn test_yaw_right_turns_toward_positive_x() {
        let mut pose = CameraPose::new(Vec3::ZERO, -90.0, 0.0, 54.0);
        pose.yaw_right(10.0);
        assert!(pose.direction().x > 0.0);
        assert!(pose.direction().z < 0.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut pose = CameraPose::new(Vec3::ZERO, -90.0, 0.0, 54.0);
        pose.pitch_up(200.0);
        assert_eq!(pose.pitch, 89.0);
        pose.pitch_up(-500.0);
        assert_eq!(pose.pitch, -89.0);
    }
}
