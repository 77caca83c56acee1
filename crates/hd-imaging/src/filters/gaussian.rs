//! Separable Gaussian blur

use ndarray::Array2;

use super::clamp_index;

/// Largest accepted sigma; the kernel radius stays at most 256 pixels
pub const MAX_SIGMA: f64 = 64.0;

/// Normalized 1-D kernel with radius `round(4 * sigma)`
pub fn gaussian_kernel(sigma: f64) -> Vec<f32> {
    let radius = (4.0 * sigma).round() as isize;
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-((x * x) as f64) / denom).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| (w / total) as f32).collect()
}

/// Blur rows then columns; borders replicate the edge pixel.
/// `sigma` must already be validated as finite, positive and at most [`MAX_SIGMA`].
pub fn gaussian_blur(image: &Array2<f32>, sigma: f64) -> Array2<f32> {
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;
    let (rows, cols) = image.dim();

    let horizontal = Array2::from_shape_fn((rows, cols), |(r, c)| {
        kernel
            .iter()
            .enumerate()
            .map(|(k, w)| w * image[[r, clamp_index(c as isize + k as isize - radius, cols)]])
            .sum::<f32>()
    });

    Array2::from_shape_fn((rows, cols), |(r, c)| {
        kernel
            .iter()
            .enumerate()
            .map(|(k, w)| w * horizontal[[clamp_index(r as isize + k as isize - radius, rows), c]])
            .sum::<f32>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_shape() {
        let kernel = gaussian_kernel(2.0);
        assert_eq!(kernel.len(), 17);
        let total: f32 = kernel.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
        assert_eq!(kernel[0], kernel[16]);
        assert!(kernel[8] > kernel[7]);
    }

    #[test]
    fn test_constant_image_is_unchanged() {
        let image = Array2::from_elem((5, 7), 0.4f32);
        let blurred = gaussian_blur(&image, 1.5);
        assert!(blurred.iter().all(|v| (v - 0.4).abs() < 1e-5));
    }

    #[test]
    fn test_impulse_spreads_and_conserves_mass() {
        let mut image = Array2::zeros((21, 21));
        image[[10, 10]] = 1.0f32;
        let blurred = gaussian_blur(&image, 1.0);
        assert!(blurred[[10, 10]] < 1.0);
        assert!(blurred[[10, 11]] > 0.0);
        assert!((blurred.sum() - 1.0).abs() < 1e-4);
    }
}
