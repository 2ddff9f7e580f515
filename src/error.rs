//! Error types
//!
//! Loading failures end the program; geometry failures only reopen the
//! annotation for editing. GPU setup and the binary use `anyhow` on top.

use std::path::PathBuf;

/// Result alias for fallible library operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal errors raised before the window opens.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The image could not be opened or decoded.
    #[error("failed to load image {path:?}")]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image decoded, but not as RGB or RGBA.
    #[error("image {path:?} has {channels} channels, expected 3 or 4")]
    UnsupportedChannels { path: PathBuf, channels: u8 },
}

/// Reasons an annotation cannot produce a finite box and camera pose.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("rear wall is degenerate ({width} x {height})")]
    DegenerateRectangle { width: f32, height: f32 },

    #[error("rear wall corner ({x}, {y}) lies outside the image")]
    RectangleOutsideImage { x: f32, y: f32 },

    #[error("vanishing point ({x}, {y}) must lie strictly inside the rear wall")]
    VanishingPointOutside { x: f32, y: f32 },

    #[error("field of view {0} degrees is out of range")]
    InvalidFov(f32),

    #[error("image aspect ratio {0} is not positive")]
    InvalidAspect(f32),

    #[error("floor angle of {degrees} degrees is too shallow to place the camera")]
    DegenerateFloorAngle { degrees: f32 },

    #[error("annotation contains non-finite coordinates")]
    NonFinite,
}
