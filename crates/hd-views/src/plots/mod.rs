//! Plot panels for the trend and statistics tabs

pub mod colors;
pub mod histogram;
pub mod scatter;
pub mod trend;

pub use histogram::HistogramPanel;
pub use scatter::ScatterPanel;
pub use trend::TrendPanel;

use egui::{RichText, Ui};

/// Heading plus the "nothing to draw" message shared by all panels
fn placeholder(ui: &mut Ui, title: &str, hint: &str) {
    ui.vertical_centered(|ui| {
        ui.heading(title);
        ui.add_space(20.0);
        ui.label("No data to display");
        ui.label(RichText::new(hint).weak());
    });
}
