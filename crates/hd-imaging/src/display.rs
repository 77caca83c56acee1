//! Conversion of any buffer form to 8-bit RGB for display

use crate::buffer::{ImageBuffer, Pixels};

/// Row-major RGB bytes ready for a texture upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayImage {
    pub width: usize,
    pub height: usize,
    pub rgb: Vec<u8>,
}

impl DisplayImage {
    pub fn from_buffer(buffer: &ImageBuffer) -> Self {
        let rgb = match &buffer.pixels {
            Pixels::Rgb(a) => a.iter().map(|&v| to_byte(v)).collect(),
            Pixels::Gray(a) => a.iter().flat_map(|&v| [to_byte(v); 3]).collect(),
            Pixels::Mask(a) => a
                .iter()
                .flat_map(|&v| [if v { u8::MAX } else { 0 }; 3])
                .collect(),
        };

        Self {
            width: buffer.width(),
            height: buffer.height(),
            rgb,
        }
    }

    /// `[width, height]` as texture APIs expect it
    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }
}

/// Scale [0, 1] to [0, 255], clipping out-of-range intensities
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
