use hd_data::{Histogram, TrendPoint};
use hd_imaging::ImageBuffer;

/// Which of the two image views a buffer is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Original,
    Processed,
}

/// Plot surface the dashboard renders into. Calls replace what the target
/// showed before; an empty input renders a placeholder.
pub trait ViewSink {
    fn render_trend(&mut self, points: &[TrendPoint], title: &str);

    fn render_histogram(&mut self, histogram: &Histogram, title: &str);

    fn render_scatter(&mut self, points: &[(f64, f64)], title: &str);

    fn render_image(&mut self, image: &ImageBuffer, slot: ImageSlot);
}
