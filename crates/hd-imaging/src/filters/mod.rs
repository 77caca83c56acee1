//! Pixel filters over single-channel `f32` arrays

pub mod canny;
pub mod gaussian;
pub mod grayscale;

pub use canny::{canny, CannyParams};
pub use gaussian::{gaussian_blur, gaussian_kernel, MAX_SIGMA};
pub use grayscale::luminance;

/// Read with edge replication for out-of-range coordinates
#[inline]
pub(crate) fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}
