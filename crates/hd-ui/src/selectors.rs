//! Read-only combo boxes for the patient and variable selections
//!
//! Both selectors report a pick only when it differs from the current
//! value; applying it is left to the caller.

use egui::{ComboBox, Ui};
use hd_core::PatientId;

/// Patient id combo. Returns the newly picked id.
pub fn patient_selector(
    ui: &mut Ui,
    label: &str,
    current: Option<PatientId>,
    options: &[PatientId],
) -> Option<PatientId> {
    let mut picked = None;
    ui.label(label);
    ComboBox::from_id_source(label)
        .selected_text(current.map(|id| id.to_string()).unwrap_or_default())
        .width(100.0)
        .show_ui(ui, |ui| {
            for &id in options {
                if ui.selectable_label(current == Some(id), id.to_string()).clicked() {
                    picked = Some(id);
                }
            }
        });
    picked.filter(|id| Some(*id) != current)
}

/// Variable name combo. Returns the newly picked name.
pub fn variable_selector(
    ui: &mut Ui,
    label: &str,
    current: Option<&str>,
    options: &[String],
) -> Option<String> {
    let mut picked = None;
    ui.label(label);
    ComboBox::from_id_source(label)
        .selected_text(current.unwrap_or_default())
        .width(160.0)
        .show_ui(ui, |ui| {
            for name in options {
                if ui.selectable_label(current == Some(name.as_str()), name).clicked() {
                    picked = Some(name.clone());
                }
            }
        });
    picked.filter(|name| Some(name.as_str()) != current)
}
