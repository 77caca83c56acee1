//! Plot colors, matching the dashboard palette

use egui::Color32;

/// Trend line (#2980b9)
pub const TREND_LINE: Color32 = Color32::from_rgb(41, 128, 185);

/// Histogram bars (#3498db)
pub const HISTOGRAM_BAR: Color32 = Color32::from_rgb(52, 152, 219);

/// Scatter markers (#e67e22)
pub const SCATTER_POINT: Color32 = Color32::from_rgb(230, 126, 34);
