//! Coordinate spaces
//!
//! Three spaces meet at the annotation boundary:
//!
//! - **screen**: window pixels, origin top-left, y down
//! - **ndc**: normalized device coordinates, `[-1, 1]`, y up
//! - **texture**: `[0, 1]` over the image, y up (bottom row is `y = 0`)

use glam::Vec2;

/// Viewport information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// A viewport covering a whole window of the given size.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Get the aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Convert a screen pixel position to normalized device coordinates.
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        let (w, h) = self.size();
        Vec2::new(
            2.0 * screen.x / w - 1.0,
            2.0 * (1.0 - screen.y / h) - 1.0,
        )
    }

    /// Inverse of [`Viewport::screen_to_ndc`].
    pub fn ndc_to_screen(&self, ndc: Vec2) -> Vec2 {
        let (w, h) = self.size();
        Vec2::new((ndc.x + 1.0) * w / 2.0, (1.0 - (ndc.y + 1.0) / 2.0) * h)
    }

    /// Pull a screen position back inside the window.
    pub fn clamp_screen(&self, screen: Vec2) -> Vec2 {
        let (w, h) = self.size();
        screen.clamp(Vec2::ZERO, Vec2::new(w, h))
    }

    /// Convert a length in pixels to ndc units along each axis.
    pub fn pixels_to_ndc_extent(&self, pixels: f32) -> Vec2 {
        let (w, h) = self.size();
        Vec2::new(2.0 * pixels / w, 2.0 * pixels / h)
    }

    fn size(&self) -> (f32, f32) {
        (self.width.max(1) as f32, self.height.max(1) as f32)
    }
}

/// Map normalized device coordinates to texture space.
pub fn ndc_to_texture(ndc: Vec2) -> Vec2 {
    (ndc + Vec2::ONE) / 2.0
}

/// Map texture space to normalized device coordinates.
pub fn texture_to_ndc(tex: Vec2) -> Vec2 {
    tex * 2.0 - Vec2::ONE
}
