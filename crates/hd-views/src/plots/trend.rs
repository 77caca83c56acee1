//! Per-patient trend line

use egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use hd_data::TrendPoint;

use super::colors::TREND_LINE;

/// Line plot of one variable against `SampleIndex`
pub struct TrendPanel {
    title: String,
    points: Vec<[f64; 2]>,
    line_width: f32,
    point_radius: f32,
}

impl Default for TrendPanel {
    fn default() -> Self {
        Self {
            title: "Patient Trend".to_string(),
            points: Vec::new(),
            line_width: 2.0,
            point_radius: 3.0,
        }
    }
}

impl TrendPanel {
    /// Replace the plotted samples
    pub fn update(&mut self, points: &[TrendPoint], title: &str) {
        self.title = title.to_string();
        self.points = points.iter().map(|p| [p.sample_index, p.value]).collect();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn ui(&self, ui: &mut Ui) {
        if self.points.is_empty() {
            super::placeholder(ui, &self.title, "Select a patient and a variable with numeric samples");
            return;
        }

        ui.vertical_centered(|ui| ui.heading(&self.title));

        Plot::new("patient_trend_plot")
            .legend(Legend::default())
            .show_grid(true)
            .auto_bounds(egui::Vec2b::new(true, true))
            .allow_zoom(true)
            .allow_drag(true)
            .allow_boxed_zoom(true)
            .x_axis_label("SampleIndex")
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::new(self.points.clone()))
                        .color(TREND_LINE)
                        .width(self.line_width)
                        .name(&self.title),
                );
                plot_ui.points(
                    Points::new(self.points.clone())
                        .color(TREND_LINE)
                        .radius(self.point_radius),
                );
            });
    }
}
