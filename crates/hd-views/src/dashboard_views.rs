use egui::Ui;
use hd_data::{Histogram, TrendPoint};
use hd_imaging::ImageBuffer;
use tracing::debug;

use crate::image_view::ImagePanel;
use crate::plots::{HistogramPanel, ScatterPanel, TrendPanel};
use crate::sink::{ImageSlot, ViewSink};

/// egui rendering target for every dashboard view
pub struct DashboardViews {
    pub trend: TrendPanel,
    pub histogram: HistogramPanel,
    pub scatter: ScatterPanel,
    pub original_image: ImagePanel,
    pub processed_image: ImagePanel,
}

impl Default for DashboardViews {
    fn default() -> Self {
        Self {
            trend: TrendPanel::default(),
            histogram: HistogramPanel::default(),
            scatter: ScatterPanel::default(),
            original_image: ImagePanel::new("Original Image"),
            processed_image: ImagePanel::new("Processed Image"),
        }
    }
}

impl DashboardViews {
    /// Contents of the "Patient Trends" tab
    pub fn trend_ui(&self, ui: &mut Ui) {
        self.trend.ui(ui);
    }

    /// Contents of the "Statistics" tab: distribution and relationship side by side
    pub fn statistics_ui(&self, ui: &mut Ui) {
        ui.columns(2, |columns| {
            self.histogram.ui(&mut columns[0]);
            self.scatter.ui(&mut columns[1]);
        });
    }

    /// Contents of the "Image Processing" tab
    pub fn image_ui(&mut self, ui: &mut Ui) {
        ui.columns(2, |columns| {
            self.original_image.ui(&mut columns[0]);
            self.processed_image.ui(&mut columns[1]);
        });
    }
}

impl ViewSink for DashboardViews {
    fn render_trend(&mut self, points: &[TrendPoint], title: &str) {
        debug!("Render trend '{}' ({} points)", title, points.len());
        self.trend.update(points, title);
    }

    fn render_histogram(&mut self, histogram: &Histogram, title: &str) {
        debug!("Render histogram '{}' ({} values)", title, histogram.total_count());
        self.histogram.update(histogram, title);
    }

    fn render_scatter(&mut self, points: &[(f64, f64)], title: &str) {
        debug!("Render scatter '{}' ({} points)", title, points.len());
        self.scatter.update(points, title);
    }

    fn render_image(&mut self, image: &ImageBuffer, slot: ImageSlot) {
        match slot {
            ImageSlot::Original => self.original_image.update(image),
            ImageSlot::Processed => self.processed_image.update(image),
        }
    }
}
