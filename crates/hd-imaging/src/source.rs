//! Decoding image files into raw buffers

use std::path::Path;
use tracing::info;

use crate::buffer::RawImage;
use crate::ImageError;

/// Anything that can produce a 1- or 3-channel raw image for a path
pub trait ImageSource {
    fn load_image(&self, path: &Path) -> Result<RawImage, ImageError>;
}

/// Decodes PNG, JPEG and BMP files from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageSource;

impl ImageSource for FileImageSource {
    fn load_image(&self, path: &Path) -> Result<RawImage, ImageError> {
        let decoded = image::open(path)
            .map_err(|e| ImageError::Load(format!("{}: {}", path.display(), e)))?;

        // alpha is dropped; gray+alpha reduces to gray
        let raw = if decoded.color().has_color() {
            let rgb = decoded.to_rgb8();
            RawImage {
                width: rgb.width() as usize,
                height: rgb.height() as usize,
                channels: 3,
                data: rgb.into_raw().into_iter().map(|v| v as f32 / 255.0).collect(),
            }
        } else {
            let luma = decoded.to_luma8();
            RawImage {
                width: luma.width() as usize,
                height: luma.height() as usize,
                channels: 1,
                data: luma.into_raw().into_iter().map(|v| v as f32 / 255.0).collect(),
            }
        };

        info!("Decoded {:?}: {}x{}x{}", path, raw.width, raw.height, raw.channels);
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, LumaA, Rgba, RgbaImage};

    #[test]
    fn test_rgba_png_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        RgbaImage::from_pixel(4, 2, Rgba([255, 0, 51, 10])).save(&path).unwrap();

        let raw = FileImageSource.load_image(&path).unwrap();

        assert_eq!((raw.width, raw.height, raw.channels), (4, 2, 3));
        assert_eq!(raw.data.len(), 24);
        assert_eq!(&raw.data[..3], &[1.0, 0.0, 0.2]);
    }

    #[test]
    fn test_gray_alpha_png_becomes_gray() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xray.png");
        GrayAlphaImage::from_pixel(3, 3, LumaA([128, 255])).save(&path).unwrap();

        let raw = FileImageSource.load_image(&path).unwrap();

        assert_eq!(raw.channels, 1);
        assert_eq!(raw.data.len(), 9);
    }

    #[test]
    fn test_unreadable_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(matches!(FileImageSource.load_image(&path), Err(ImageError::Load(_))));
    }
}
