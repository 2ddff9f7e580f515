//! Application configuration

use crate::control::FirstPersonControl;
use crate::reconstruct::ReconstructConfig;

/// Height in pixels of the annotation window; width follows the image.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 640;

/// Settings shared by both scene modes.
#[derive(Debug, Clone)]
pub struct SvmConfig {
    /// Annotation window height in pixels.
    pub window_height: u32,
    pub reconstruct: ReconstructConfig,
    pub control: FirstPersonControl,
    /// Clear color behind the image and box.
    pub clear_color: [f32; 4],
}

impl Default for SvmConfig {
    fn default() -> Self {
        Self {
            window_height: DEFAULT_WINDOW_HEIGHT,
            reconstruct: ReconstructConfig::default(),
            control: FirstPersonControl::default(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

impl SvmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window_height(mut self, height: u32) -> Self {
        self.window_height = height.max(1);
        self
    }

    pub fn reconstruct(mut self, reconstruct: ReconstructConfig) -> Self {
        self.reconstruct = reconstruct;
        self
    }

    pub fn move_speed(mut self, speed: f32) -> Self {
        self.control.move_speed = speed;
        self
    }

    /// Window size that shows an image of the given size undistorted.
    pub fn window_size_for(&self, image_width: u32, image_height: u32) -> (u32, u32) {
        let height = self.window_height;
        let width = (height as u64 * image_width as u64 / image_height.max(1) as u64).max(1);
        (width as u32, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_follows_image_aspect() {
        let config = SvmConfig::default();
        assert_eq!(config.window_size_for(800, 600), (853, 640));
        assert_eq!(config.window_size_for(600, 800), (480, 640));
        assert_eq!(SvmConfig::new().window_height(0).window_height, 1);
    }
}
