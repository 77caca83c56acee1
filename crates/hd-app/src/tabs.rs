//! The three dock tabs and their controls

use egui::{Ui, WidgetText};
use egui_dock::TabViewer;
use hd_imaging::ImageKind;
use hd_ui::{patient_selector, theme, variable_selector};
use hd_views::DashboardViews;

use crate::dashboard::Dashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    PatientTrends,
    Statistics,
    ImageProcessing,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 3] = [
        DashboardTab::PatientTrends,
        DashboardTab::Statistics,
        DashboardTab::ImageProcessing,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            DashboardTab::PatientTrends => "PATIENT TRENDS",
            DashboardTab::Statistics => "STATISTICS VISUALIZATION",
            DashboardTab::ImageProcessing => "IMAGE PROCESSING",
        }
    }
}

/// Tab viewer for egui_dock
pub struct DashboardTabViewer<'a> {
    pub dashboard: &'a mut Dashboard,
    pub views: &'a mut DashboardViews,
}

impl<'a> DashboardTabViewer<'a> {
    fn patient_tab(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let selection = self.dashboard.selection();
            let store = self.dashboard.store();
            let picked_patient = patient_selector(
                ui,
                "Patient ID:",
                selection.patient(),
                store.distinct_patient_ids(),
            );
            ui.add_space(12.0);
            let picked_variable = variable_selector(
                ui,
                "Vital Sign:",
                selection.trend_variable(),
                store.variable_columns(),
            );

            if let Some(id) = picked_patient {
                self.dashboard.select_patient(id, self.views).ok();
            }
            if let Some(name) = picked_variable {
                self.dashboard.select_trend_variable(&name, self.views).ok();
            }
        });
        ui.separator();
        self.views.trend_ui(ui);
    }

    fn statistics_tab(&mut self, ui: &mut Ui) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Global Variable Comparison").strong());
            ui.horizontal(|ui| {
                let selection = self.dashboard.selection();
                let variables = self.dashboard.store().variable_columns();
                let picked_x = variable_selector(ui, "X Variable:", selection.cohort_x(), variables);
                ui.add_space(12.0);
                let picked_y = variable_selector(ui, "Y Variable:", selection.cohort_y(), variables);
                ui.add_space(12.0);
                let update = ui
                    .add(egui::Button::new(
                        egui::RichText::new("Update Analytics").color(egui::Color32::WHITE),
                    ).fill(theme::success_color()))
                    .clicked();

                if let Some(name) = picked_x {
                    self.dashboard.select_cohort_x(&name, self.views).ok();
                }
                if let Some(name) = picked_y {
                    self.dashboard.select_cohort_y(&name, self.views).ok();
                }
                if update {
                    self.dashboard.refresh_cohort(self.views);
                }
            });
        });
        ui.add_space(6.0);
        self.views.statistics_ui(ui);
    }

    fn image_tab(&mut self, ui: &mut Ui) {
        let current = self.dashboard.images().working().map(|b| b.kind);
        ui.horizontal(|ui| {
            let button = |ui: &mut Ui, text: &str, kind: ImageKind| {
                ui.add_enabled(current.is_some(), egui::SelectableLabel::new(current == Some(kind), text))
                    .clicked()
            };

            if button(ui, "Original", ImageKind::Color) {
                self.dashboard.reset_image(self.views).ok();
            }
            if button(ui, "Grayscale", ImageKind::Grayscale) {
                self.dashboard.to_grayscale(self.views).ok();
            }
            if button(ui, "Gaussian", ImageKind::Blurred) {
                self.dashboard.blur_image(self.views).ok();
            }
            if button(ui, "Edge (Canny)", ImageKind::EdgeMap) {
                self.dashboard.detect_edges(self.views).ok();
            }
        });
        ui.separator();
        self.views.image_ui(ui);
    }
}

impl<'a> TabViewer for DashboardTabViewer<'a> {
    type Tab = DashboardTab;

    fn title(&mut self, tab: &mut Self::Tab) -> WidgetText {
        tab.title().into()
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut Self::Tab) {
        match tab {
            DashboardTab::PatientTrends => self.patient_tab(ui),
            DashboardTab::Statistics => self.statistics_tab(ui),
            DashboardTab::ImageProcessing => self.image_tab(ui),
        }
    }
}
