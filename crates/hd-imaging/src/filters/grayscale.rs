use ndarray::{Array2, Array3, Axis};

/// ITU-R BT.709 luma weights
pub const LUMA_WEIGHTS: [f32; 3] = [0.2125, 0.7154, 0.0721];

/// Weighted sum over the channel axis of an (rows, cols, 3) array
pub fn luminance(rgb: &Array3<f32>) -> Array2<f32> {
    let [wr, wg, wb] = LUMA_WEIGHTS;
    rgb.map_axis(Axis(2), |px| wr * px[0] + wg * px[1] + wb * px[2])
}
