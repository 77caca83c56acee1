//! The transform chain over a loaded image
//!
//! `original` never changes after a load. Grayscale is always taken from
//! `original`; blur and edge detection work on the current `working` buffer.

use tracing::{debug, info};

use crate::buffer::{ImageBuffer, ImageKind, Pixels, RawImage};
use crate::filters::{canny, gaussian_blur, luminance, CannyParams, MAX_SIGMA};
use crate::ImageError;

#[derive(Debug, Clone)]
pub struct ImagePipeline {
    original: Option<ImageBuffer>,
    working: Option<ImageBuffer>,
    low_threshold: f32,
    high_threshold: f32,
}

impl ImagePipeline {
    pub fn new() -> Self {
        let defaults = CannyParams::default();
        Self::with_thresholds(defaults.low_threshold, defaults.high_threshold)
    }

    /// Pipeline using custom hysteresis thresholds for edge detection
    pub fn with_thresholds(low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            original: None,
            working: None,
            low_threshold,
            high_threshold,
        }
    }

    /// Validate and install a new image; working starts as its native copy
    pub fn load(&mut self, raw: RawImage) -> Result<&ImageBuffer, ImageError> {
        let buffer = ImageBuffer::native(raw.into_pixels()?);
        info!(
            "Loaded {}x{} image ({} channel(s))",
            buffer.width(),
            buffer.height(),
            buffer.channels()
        );
        self.original = Some(buffer.clone());
        Ok(self.working.insert(buffer))
    }

    pub fn is_loaded(&self) -> bool {
        self.original.is_some()
    }

    pub fn original(&self) -> Option<&ImageBuffer> {
        self.original.as_ref()
    }

    pub fn working(&self) -> Option<&ImageBuffer> {
        self.working.as_ref()
    }

    /// Restore the native copy of the original
    pub fn reset(&mut self) -> Result<&ImageBuffer, ImageError> {
        let original = self.original.as_ref().ok_or(ImageError::NoImageLoaded)?;
        debug!("Reset working image");
        Ok(self.working.insert(original.clone()))
    }

    /// Luminance of the original image. Repeating it changes nothing.
    pub fn to_grayscale(&mut self) -> Result<&ImageBuffer, ImageError> {
        let original = self.original.as_ref().ok_or(ImageError::NoImageLoaded)?;
        let gray = match &original.pixels {
            Pixels::Rgb(rgb) => luminance(rgb),
            _ => original.gray_view(),
        };
        Ok(self.install(Pixels::Gray(gray), ImageKind::Grayscale))
    }

    /// Gaussian blur of the working image's intensity
    pub fn blur(&mut self, sigma: f64) -> Result<&ImageBuffer, ImageError> {
        let working = self.working.as_ref().ok_or(ImageError::NoImageLoaded)?;
        validate_sigma(sigma)?;
        let blurred = gaussian_blur(&working.gray_view(), sigma);
        Ok(self.install(Pixels::Gray(blurred), ImageKind::Blurred))
    }

    /// Canny edge map of the working image's intensity
    pub fn detect_edges(&mut self, sigma: f64) -> Result<&ImageBuffer, ImageError> {
        let working = self.working.as_ref().ok_or(ImageError::NoImageLoaded)?;
        validate_sigma(sigma)?;
        let params = CannyParams {
            sigma,
            low_threshold: self.low_threshold,
            high_threshold: self.high_threshold,
        };
        let edges = canny(&working.gray_view(), &params);
        Ok(self.install(Pixels::Mask(edges), ImageKind::EdgeMap))
    }

    fn install(&mut self, pixels: Pixels, kind: ImageKind) -> &ImageBuffer {
        debug!("Working image is now {}", kind.label());
        self.working.insert(ImageBuffer { pixels, kind })
    }
}

impl Default for ImagePipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_sigma(sigma: f64) -> Result<(), ImageError> {
    if sigma.is_finite() && sigma > 0.0 && sigma <= MAX_SIGMA {
        Ok(())
    } else {
        Err(ImageError::InvalidParameter(format!(
            "sigma must be in (0, {}], got {}",
            MAX_SIGMA, sigma
        )))
    }
}
