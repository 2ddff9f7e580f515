//! Initial camera placement

use super::ViewFrame;
use crate::camera::CameraPose;
use crate::error::GeometryError;
use glam::Vec3;

/// Smallest floor-angle tangent that still places the camera at a sane depth.
const MIN_FLOOR_TANGENT: f32 = 1e-3;

/// Place the camera where the annotated vanishing point is consistent with
/// the field of view: its height above the floor and offset from the left
/// wall come from the vanishing point's position inside the rear wall, its
/// distance from the rear wall from the angle between the floor line and the
/// vanishing point.
pub(crate) fn camera_pose(frame: &ViewFrame, fov_deg: f32) -> Result<CameraPose, GeometryError> {
    let rel = frame.vanishing_relative();

    let x = rel.x * frame.rear_width;
    let y = rel.y * frame.rear_height;

    let degrees = rel.y * fov_deg;
    let tangent = degrees.to_radians().tan();
    if !(tangent.is_finite() && tangent >= MIN_FLOOR_TANGENT) {
        return Err(GeometryError::DegenerateFloorAngle { degrees });
    }
    let z = y / tangent;

    let pose = CameraPose::new(Vec3::new(x, y, z), -90.0, 0.0, fov_deg);
    tracing::debug!(position = ?pose.position, floor_angle = degrees, "derived camera pose");
    Ok(pose)
}
