//! Image loading

use crate::error::{Error, Result};
use std::path::Path;

/// A decoded photograph, expanded to 8-bit RGBA.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub width: u32,
    pub height: u32,
    /// Channel count of the source file (3 or 4).
    pub channels: u8,
    /// RGBA pixels, top row first.
    pub rgba: image::RgbaImage,
}

impl ImageAsset {
    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// A copy shrunk so neither side exceeds `max_dim`, or `None` if it
    /// already fits. The aspect ratio is kept to within a pixel.
    pub fn downscaled_to(&self, max_dim: u32) -> Option<Self> {
        let longest = self.width.max(self.height);
        if longest <= max_dim {
            return None;
        }

        let scale = max_dim as f64 / longest as f64;
        let width = ((self.width as f64 * scale).round() as u32).clamp(1, max_dim);
        let height = ((self.height as f64 * scale).round() as u32).clamp(1, max_dim);
        let rgba = image::imageops::resize(
            &self.rgba,
            width,
            height,
            image::imageops::FilterType::Triangle,
        );

        Some(Self {
            width,
            height,
            channels: self.channels,
            rgba,
        })
    }
}

/// Load an RGB or RGBA image from disk.
pub fn load_image(path: impl AsRef<Path>) -> Result<ImageAsset> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| Error::AssetLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let channels = image.color().channel_count();
    if !matches!(channels, 3 | 4) {
        return Err(Error::UnsupportedChannels {
            path: path.to_path_buf(),
            channels,
        });
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::info!(?path, width, height, channels, "loaded image");

    Ok(ImageAsset {
        width,
        height,
        channels,
        rgba,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rgb_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        let mut img = image::RgbImage::new(4, 2);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.save(&path).unwrap();

        let asset = load_image(&path).unwrap();
        assert_eq!((asset.width, asset.height, asset.channels), (4, 2, 3));
        assert_eq!(asset.rgba.len(), 4 * 2 * 4);
        assert_eq!(&asset.rgba.as_raw()[..4], &[255, 0, 0, 255]);
        assert_eq!(asset.aspect(), 2.0);
    }

    #[test]
    fn test_grayscale_is_rejected() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        image::GrayImage::new(2, 2).save(file.path()).unwrap();

        let err = load_image(file.path()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedChannels { channels: 1, .. }));
    }

    #[test]
    fn test_downscale_keeps_aspect_within_limit() {
        let asset = ImageAsset {
            width: 100,
            height: 25,
            channels: 3,
            rgba: image::RgbaImage::new(100, 25),
        };
        assert!(asset.downscaled_to(100).is_none());

        let small = asset.downscaled_to(40).unwrap();
        assert_eq!((small.width, small.height), (40, 10));
        assert_eq!(small.rgba.dimensions(), (40, 10));
        assert_eq!(small.aspect(), asset.aspect());
        assert_eq!(small.channels, 3);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.png");
        match load_image(&path) {
            Err(Error::AssetLoad { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
