//! First-person camera control
//!
//! WASD movement with mouse look, driven by polled input.

use crate::camera::CameraPose;
use crate::input::{InputSnapshot, Key};

/// First-person control over a [`CameraPose`].
#[derive(Debug, Clone)]
pub struct FirstPersonControl {
    /// Movement speed (units per second).
    pub move_speed: f32,
    /// Degrees of rotation per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Sprint speed multiplier (when holding shift).
    pub sprint_multiplier: f32,
}

impl FirstPersonControl {
    /// Create a new first-person control.
    pub fn new(move_speed: f32, mouse_sensitivity: f32) -> Self {
        Self {
            move_speed,
            mouse_sensitivity,
            sprint_multiplier: 2.0,
        }
    }

    /// Apply one frame of input to the pose.
    pub fn update(&self, pose: &mut CameraPose, input: &InputSnapshot, delta_time: f32) {
        let delta = input.mouse_delta;
        pose.yaw_right(delta.x * self.mouse_sensitivity);
        pose.pitch_up(-delta.y * self.mouse_sensitivity);

        let axis = |pos: &[Key], neg: &[Key]| -> f32 {
            let held = |keys: &[Key]| keys.iter().any(|&k| input.is_held(k));
            held(pos) as i32 as f32 - held(neg) as i32 as f32
        };

        let forward = axis(&[Key::W, Key::Up], &[Key::S, Key::Down]);
        let left = axis(&[Key::A, Key::Left], &[Key::D, Key::Right]);
        let up = axis(&[Key::Space], &[Key::Control]);

        let speed = if input.is_held(Key::Shift) {
            self.move_speed * self.sprint_multiplier
        } else {
            self.move_speed
        };
        let step = speed * delta_time;

        // Keep diagonal movement at the same speed
        let norm = (forward * forward + left * left + up * up).sqrt();
        if norm > 0.0 {
            pose.move_forward(forward / norm * step);
            pose.strafe_left(left / norm * step);
            pose.rise(up / norm * step);
        }
    }
}

impl Default for FirstPersonControl {
    fn default() -> Self {
        Self::new(10.0, 0.1)
    }
}
