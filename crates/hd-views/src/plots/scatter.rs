//! Cohort relationship scatter plot

use egui::Ui;
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use super::colors::SCATTER_POINT;

pub struct ScatterPanel {
    title: String,
    points: Vec<[f64; 2]>,
    point_radius: f32,
}

impl Default for ScatterPanel {
    fn default() -> Self {
        Self {
            title: "Relationship".to_string(),
            points: Vec::new(),
            point_radius: 2.5,
        }
    }
}

impl ScatterPanel {
    pub fn update(&mut self, points: &[(f64, f64)], title: &str) {
        self.title = title.to_string();
        self.points = points.iter().map(|&(x, y)| [x, y]).collect();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn ui(&self, ui: &mut Ui) {
        if self.points.is_empty() {
            super::placeholder(ui, &self.title, "No rows have both variables");
            return;
        }

        ui.vertical_centered(|ui| ui.heading(&self.title));

        Plot::new("cohort_scatter_plot")
            .legend(Legend::default())
            .show_grid(true)
            .auto_bounds(egui::Vec2b::new(true, true))
            .allow_scroll(true)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_boxed_zoom(true)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::new(self.points.clone()))
                        .color(SCATTER_POINT)
                        .radius(self.point_radius)
                        .shape(MarkerShape::Circle)
                        .name(&self.title),
                );
            });
    }
}
