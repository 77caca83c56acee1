//! Tagged pixel buffers

use ndarray::{Array2, Array3, Axis};

use crate::filters::grayscale::luminance;
use crate::ImageError;

/// What the working buffer currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Color,
    Grayscale,
    Blurred,
    EdgeMap,
}

impl ImageKind {
    pub fn label(&self) -> &'static str {
        match self {
            ImageKind::Color => "Color",
            ImageKind::Grayscale => "Grayscale",
            ImageKind::Blurred => "Blurred",
            ImageKind::EdgeMap => "Edge map",
        }
    }
}

/// Pixel storage. Intensities are in [0, 1]; arrays are indexed (row, col[, channel]).
#[derive(Debug, Clone, PartialEq)]
pub enum Pixels {
    Gray(Array2<f32>),
    Rgb(Array3<f32>),
    Mask(Array2<bool>),
}

/// Pixels plus the kind tag
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub pixels: Pixels,
    pub kind: ImageKind,
}

impl ImageBuffer {
    /// Tag pixels with the kind they have when freshly loaded
    pub fn native(pixels: Pixels) -> Self {
        let kind = match pixels {
            Pixels::Rgb(_) => ImageKind::Color,
            Pixels::Gray(_) => ImageKind::Grayscale,
            Pixels::Mask(_) => ImageKind::EdgeMap,
        };
        Self { pixels, kind }
    }

    pub fn width(&self) -> usize {
        match &self.pixels {
            Pixels::Gray(a) => a.ncols(),
            Pixels::Rgb(a) => a.len_of(Axis(1)),
            Pixels::Mask(a) => a.ncols(),
        }
    }

    pub fn height(&self) -> usize {
        match &self.pixels {
            Pixels::Gray(a) => a.nrows(),
            Pixels::Rgb(a) => a.len_of(Axis(0)),
            Pixels::Mask(a) => a.nrows(),
        }
    }

    pub fn channels(&self) -> usize {
        match &self.pixels {
            Pixels::Rgb(_) => 3,
            Pixels::Gray(_) | Pixels::Mask(_) => 1,
        }
    }

    /// Single-channel intensity view: luminance for color, 0/1 for masks
    pub fn gray_view(&self) -> Array2<f32> {
        match &self.pixels {
            Pixels::Gray(a) => a.clone(),
            Pixels::Rgb(a) => luminance(a),
            Pixels::Mask(a) => a.mapv(|v| if v { 1.0 } else { 0.0 }),
        }
    }
}

/// Decoded image as handed over by an image source: row-major, interleaved channels
#[derive(Debug, Clone, PartialEq)]
pub struct RawImage {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<f32>,
}

impl RawImage {
    /// Validate dimensions and values and build pixel arrays
    pub fn into_pixels(self) -> Result<Pixels, ImageError> {
        if self.width == 0 || self.height == 0 {
            return Err(ImageError::InvalidShape(format!(
                "image has zero size ({}x{})",
                self.width, self.height
            )));
        }
        let expected = self.width * self.height * self.channels;
        if self.data.len() != expected {
            return Err(ImageError::InvalidShape(format!(
                "expected {} values for {}x{}x{}, got {}",
                expected,
                self.width,
                self.height,
                self.channels,
                self.data.len()
            )));
        }
        if self.data.iter().any(|v| !v.is_finite()) {
            return Err(ImageError::InvalidShape("pixel values must be finite".to_string()));
        }

        let data: Vec<f32> = self.data.into_iter().map(|v| v.clamp(0.0, 1.0)).collect();
        let shape_error = |e: ndarray::ShapeError| ImageError::InvalidShape(e.to_string());
        match self.channels {
            1 => Ok(Pixels::Gray(
                Array2::from_shape_vec((self.height, self.width), data).map_err(shape_error)?,
            )),
            3 => Ok(Pixels::Rgb(
                Array3::from_shape_vec((self.height, self.width, 3), data).map_err(shape_error)?,
            )),
            n => Err(ImageError::InvalidShape(format!(
                "unsupported channel count {} (expected 1 or 3)",
                n
            ))),
        }
    }
}
