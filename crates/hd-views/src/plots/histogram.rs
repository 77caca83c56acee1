//! Cohort distribution histogram

use egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};
use hd_data::{Histogram, HistogramBin};

use super::colors::HISTOGRAM_BAR;

/// Bar chart of a binned cohort variable, with a summary row
#[derive(Default)]
pub struct HistogramPanel {
    title: String,
    histogram: Histogram,
}

impl HistogramPanel {
    pub fn update(&mut self, histogram: &Histogram, title: &str) {
        self.title = title.to_string();
        self.histogram = histogram.clone();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn ui(&self, ui: &mut Ui) {
        if self.histogram.is_empty() {
            super::placeholder(ui, &self.title, "The selected variable has no numeric values");
            return;
        }

        ui.vertical_centered(|ui| ui.heading(&self.title));

        if let Some(stats) = &self.histogram.summary {
            ui.horizontal(|ui| {
                ui.label(format!("Count: {}", stats.count));
                ui.separator();
                ui.label(format!("Mean: {:.2}", stats.mean));
                ui.separator();
                ui.label(format!("Std Dev: {:.2}", stats.std_dev));
                ui.separator();
                ui.label(format!("Min: {:.2}", stats.min));
                ui.separator();
                ui.label(format!("Max: {:.2}", stats.max));
            });
            ui.add_space(4.0);
        }

        let bars: Vec<Bar> = self
            .histogram
            .bins
            .iter()
            .map(|bin| {
                let (center, height, width) = bar_geometry(bin);
                Bar::new(center, height)
                    .width(width)
                    .fill(HISTOGRAM_BAR.linear_multiply(0.7))
            })
            .collect();

        Plot::new("cohort_histogram_plot")
            .legend(Legend::default())
            .show_grid(true)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_boxed_zoom(true)
            .y_axis_label("Count")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(HISTOGRAM_BAR).name("Count"));
            });
    }
}

/// (center, height, width) of the bar drawn for a bin
fn bar_geometry(bin: &HistogramBin) -> (f64, f64, f64) {
    ((bin.lower + bin.upper) / 2.0, bin.count as f64, bin.upper - bin.lower)
}
