//! Canny edge detector

use std::collections::VecDeque;
use ndarray::Array2;

use super::{clamp_index, gaussian_blur};

/// Detector parameters. Thresholds apply to the unnormalized Sobel magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyParams {
    pub sigma: f64,
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            low_threshold: 0.1,
            high_threshold: 0.2,
        }
    }
}

/// Smooth, take Sobel gradients, thin with non-maximum suppression and
/// link with hysteresis. The outermost pixel ring is never an edge.
pub fn canny(image: &Array2<f32>, params: &CannyParams) -> Array2<bool> {
    let (rows, cols) = image.dim();
    let smoothed = gaussian_blur(image, params.sigma);
    let (gx, gy) = sobel(&smoothed);
    let magnitude = Array2::from_shape_fn((rows, cols), |idx| gx[idx].hypot(gy[idx]));

    let thin = non_maximum_suppression(&magnitude, &gx, &gy);
    hysteresis(&magnitude, &thin, params.low_threshold, params.high_threshold)
}

/// Unnormalized 3x3 Sobel responses along columns (x) and rows (y)
fn sobel(image: &Array2<f32>) -> (Array2<f32>, Array2<f32>) {
    let (rows, cols) = image.dim();
    let at = |r: usize, c: usize, dr: isize, dc: isize| {
        image[[
            clamp_index(r as isize + dr, rows),
            clamp_index(c as isize + dc, cols),
        ]]
    };

    let gx = Array2::from_shape_fn((rows, cols), |(r, c)| {
        (at(r, c, -1, 1) + 2.0 * at(r, c, 0, 1) + at(r, c, 1, 1))
            - (at(r, c, -1, -1) + 2.0 * at(r, c, 0, -1) + at(r, c, 1, -1))
    });
    let gy = Array2::from_shape_fn((rows, cols), |(r, c)| {
        (at(r, c, 1, -1) + 2.0 * at(r, c, 1, 0) + at(r, c, 1, 1))
            - (at(r, c, -1, -1) + 2.0 * at(r, c, -1, 0) + at(r, c, -1, 1))
    });
    (gx, gy)
}

/// Keep pixels that are local maxima along the gradient, quantized to four directions
fn non_maximum_suppression(magnitude: &Array2<f32>, gx: &Array2<f32>, gy: &Array2<f32>) -> Array2<bool> {
    let (rows, cols) = magnitude.dim();
    let mut keep = Array2::from_elem((rows, cols), false);
    if rows < 3 || cols < 3 {
        return keep;
    }

    for r in 1..rows - 1 {
        for c in 1..cols - 1 {
            let m = magnitude[[r, c]];
            if m <= 0.0 {
                continue;
            }

            let mut angle = gy[[r, c]].atan2(gx[[r, c]]).to_degrees();
            if angle < 0.0 {
                angle += 180.0;
            }
            let ((r1, c1), (r2, c2)) = if !(22.5..157.5).contains(&angle) {
                ((r, c - 1), (r, c + 1))
            } else if angle < 67.5 {
                ((r - 1, c - 1), (r + 1, c + 1))
            } else if angle < 112.5 {
                ((r - 1, c), (r + 1, c))
            } else {
                ((r - 1, c + 1), (r + 1, c - 1))
            };

            keep[[r, c]] = m >= magnitude[[r1, c1]] && m >= magnitude[[r2, c2]];
        }
    }
    keep
}

/// Grow strong edges through 8-connected weak candidates
fn hysteresis(magnitude: &Array2<f32>, thin: &Array2<bool>, low: f32, high: f32) -> Array2<bool> {
    let (rows, cols) = magnitude.dim();
    let candidate = |r: usize, c: usize| thin[[r, c]] && magnitude[[r, c]] >= low;

    let mut edges = Array2::from_elem((rows, cols), false);
    let mut queue = VecDeque::new();
    for ((r, c), &m) in magnitude.indexed_iter() {
        if thin[[r, c]] && m >= high {
            edges[[r, c]] = true;
            queue.push_back((r, c));
        }
    }

    while let Some((r, c)) = queue.pop_front() {
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                let nr = r as isize + dr;
                let nc = c as isize + dc;
                if nr < 0 || nc < 0 || nr >= rows as isize || nc >= cols as isize {
                    continue;
                }
                let (nr, nc) = (nr as usize, nc as usize);
                if !edges[[nr, nc]] && candidate(nr, nc) {
                    edges[[nr, nc]] = true;
                    queue.push_back((nr, nc));
                }
            }
        }
    }
    edges
}
