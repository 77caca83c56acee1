//! View layer for the health dashboard
//!
//! The controller pushes query results through [`ViewSink`]; the egui
//! implementation keeps the latest result per panel and draws it each frame.

mod dashboard_views;
mod image_view;
mod sink;
pub mod plots;

pub use dashboard_views::DashboardViews;
pub use image_view::ImagePanel;
pub use plots::{HistogramPanel, ScatterPanel, TrendPanel};
pub use sink::{ImageSlot, ViewSink};
