//! Initial window configuration
//!
//! The window opens at the photograph's aspect ratio so the annotation
//! overlay lines up with the image pixel for pixel.

use crate::config::DEFAULT_WINDOW_HEIGHT;

/// How the window is first opened.
#[derive(Debug, Clone)]
pub struct WindowSettings {
    pub title: String,
    /// Inner size in physical pixels.
    pub size: (u32, u32),
    /// Resizing rescales the annotation with the image.
    pub resizable: bool,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        // 4:3 photograph at the default height
        let height = DEFAULT_WINDOW_HEIGHT;
        Self {
            title: "svm".to_string(),
            size: (height * 4 / 3, height),
            resizable: true,
            vsync: true,
        }
    }
}

impl WindowSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Never smaller than one pixel on either side.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width.max(1), height.max(1));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_four_by_three() {
        let settings = WindowSettings::default();
        assert_eq!(settings.size, (853, 640));
        assert!(settings.resizable);
    }

    #[test]
    fn test_size_is_at_least_one_pixel() {
        assert_eq!(WindowSettings::new().size(0, 480).size, (1, 480));
    }
}
