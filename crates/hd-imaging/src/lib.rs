//! Image buffers and the grayscale / blur / edge transform chain
//!
//! The pipeline keeps the loaded image untouched and derives a working
//! buffer from it. Decoding lives in [`source`], conversion to displayable
//! bytes in [`display`].

pub mod buffer;
pub mod display;
pub mod filters;
pub mod pipeline;
pub mod source;

use thiserror::Error;

pub use buffer::{ImageBuffer, ImageKind, Pixels, RawImage};
pub use display::DisplayImage;
pub use pipeline::ImagePipeline;
pub use source::{FileImageSource, ImageSource};

/// Errors that can occur while loading or transforming images
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Failed to load image: {0}")]
    Load(String),

    #[error("Invalid image shape: {0}")]
    InvalidShape(String),
}

impl From<image::ImageError> for ImageError {
    fn from(error: image::ImageError) -> Self {
        ImageError::Load(error.to_string())
    }
}
