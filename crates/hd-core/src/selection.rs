//! Patient and variable selection shared by the trend and cohort plots

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::events::{events::SelectionChanged, EventBus};
use crate::settings::SelectionPreferences;

/// Patient identifier as stored in the `PatientID` column
pub type PatientId = i64;

/// The set of values a selection may currently resolve to
pub trait SelectionDomain {
    /// Distinct patient identifiers, sorted ascending
    fn patient_ids(&self) -> &[PatientId];

    /// Selectable variable columns, sorted lexically
    fn variable_columns(&self) -> &[String];

    fn has_patient(&self, id: PatientId) -> bool {
        self.patient_ids().binary_search(&id).is_ok()
    }

    fn has_variable(&self, name: &str) -> bool {
        self.variable_columns().iter().any(|c| c == name)
    }
}

/// Identifies one selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionSlot {
    Patient,
    TrendVariable,
    CohortX,
    CohortY,
}

/// Current selector values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub patient: Option<PatientId>,
    pub trend_variable: Option<String>,
    pub cohort_x: Option<String>,
    pub cohort_y: Option<String>,
}

/// Raised when a selector is set to a value absent from the current table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Patient {0} is not present in the current table")]
    UnknownPatient(PatientId),

    #[error("Column '{0}' is not a variable of the current table")]
    UnknownVariable(String),
}

/// Owns the selection and publishes a `SelectionChanged` event for every
/// slot whose value actually changes
pub struct SelectionState {
    current: Selection,
    event_bus: Arc<EventBus>,
}

impl SelectionState {
    /// Create an empty selection publishing on the given bus
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self {
            current: Selection::default(),
            event_bus,
        }
    }

    /// Snapshot of the current selection
    pub fn current(&self) -> &Selection {
        &self.current
    }

    pub fn patient(&self) -> Option<PatientId> {
        self.current.patient
    }

    pub fn trend_variable(&self) -> Option<&str> {
        self.current.trend_variable.as_deref()
    }

    pub fn cohort_x(&self) -> Option<&str> {
        self.current.cohort_x.as_deref()
    }

    pub fn cohort_y(&self) -> Option<&str> {
        self.current.cohort_y.as_deref()
    }

    /// Select a patient. Returns whether the value changed.
    pub fn set_patient(
        &mut self,
        id: PatientId,
        domain: &dyn SelectionDomain,
    ) -> Result<bool, SelectionError> {
        if !domain.has_patient(id) {
            return Err(SelectionError::UnknownPatient(id));
        }
        if self.current.patient == Some(id) {
            return Ok(false);
        }
        self.current.patient = Some(id);
        self.notify(SelectionSlot::Patient);
        Ok(true)
    }

    pub fn set_trend_variable(
        &mut self,
        name: &str,
        domain: &dyn SelectionDomain,
    ) -> Result<bool, SelectionError> {
        self.set_variable(SelectionSlot::TrendVariable, name, domain)
    }

    pub fn set_cohort_x(
        &mut self,
        name: &str,
        domain: &dyn SelectionDomain,
    ) -> Result<bool, SelectionError> {
        self.set_variable(SelectionSlot::CohortX, name, domain)
    }

    pub fn set_cohort_y(
        &mut self,
        name: &str,
        domain: &dyn SelectionDomain,
    ) -> Result<bool, SelectionError> {
        self.set_variable(SelectionSlot::CohortY, name, domain)
    }

    fn set_variable(
        &mut self,
        slot: SelectionSlot,
        name: &str,
        domain: &dyn SelectionDomain,
    ) -> Result<bool, SelectionError> {
        if !domain.has_variable(name) {
            return Err(SelectionError::UnknownVariable(name.to_string()));
        }
        let target = match self.variable_slot_mut(slot) {
            Some(target) => target,
            None => return Ok(false),
        };
        if target.as_deref() == Some(name) {
            return Ok(false);
        }
        *target = Some(name.to_string());
        self.notify(slot);
        Ok(true)
    }

    fn variable_slot_mut(&mut self, slot: SelectionSlot) -> Option<&mut Option<String>> {
        match slot {
            SelectionSlot::TrendVariable => Some(&mut self.current.trend_variable),
            SelectionSlot::CohortX => Some(&mut self.current.cohort_x),
            SelectionSlot::CohortY => Some(&mut self.current.cohort_y),
            SelectionSlot::Patient => None,
        }
    }

    /// Unset every slot whose value no longer resolves in `domain`.
    /// Returns the slots that were cleared.
    pub fn reconcile(&mut self, domain: &dyn SelectionDomain) -> Vec<SelectionSlot> {
        let mut cleared = Vec::new();

        if let Some(id) = self.current.patient {
            if !domain.has_patient(id) {
                self.current.patient = None;
                cleared.push(SelectionSlot::Patient);
            }
        }

        for slot in [SelectionSlot::TrendVariable, SelectionSlot::CohortX, SelectionSlot::CohortY] {
            if let Some(target) = self.variable_slot_mut(slot) {
                let stale = target.as_deref().map_or(false, |name| !domain.has_variable(name));
                if stale {
                    *target = None;
                    cleared.push(slot);
                }
            }
        }

        for slot in &cleared {
            debug!("Selection {:?} no longer resolves, cleared", slot);
            self.notify(*slot);
        }
        cleared
    }

    /// Fill unset slots with deterministic defaults drawn from `domain`.
    /// Slots with no suitable candidate stay unset. Returns the seeded slots.
    pub fn seed_defaults(
        &mut self,
        domain: &dyn SelectionDomain,
        preferences: &SelectionPreferences,
    ) -> Vec<SelectionSlot> {
        let mut seeded = Vec::new();

        if self.current.patient.is_none() {
            if let Some(&first) = domain.patient_ids().first() {
                self.current.patient = Some(first);
                seeded.push(SelectionSlot::Patient);
            }
        }

        if self.current.trend_variable.is_none() {
            self.current.trend_variable =
                pick_variable(domain, preferences.trend_variable.as_deref(), None);
            if self.current.trend_variable.is_some() {
                seeded.push(SelectionSlot::TrendVariable);
            }
        }

        if self.current.cohort_x.is_none() {
            self.current.cohort_x = pick_variable(
                domain,
                preferences.cohort_x.as_deref(),
                self.current.cohort_y.as_deref(),
            );
            if self.current.cohort_x.is_some() {
                seeded.push(SelectionSlot::CohortX);
            }
        }

        if self.current.cohort_y.is_none() {
            self.current.cohort_y = pick_variable(
                domain,
                preferences.cohort_y.as_deref(),
                self.current.cohort_x.as_deref(),
            );
            if self.current.cohort_y.is_some() {
                seeded.push(SelectionSlot::CohortY);
            }
        }

        for slot in &seeded {
            self.notify(*slot);
        }
        seeded
    }

    fn notify(&self, slot: SelectionSlot) {
        self.event_bus.publish(SelectionChanged { slot });
    }
}

/// Preferred name when present (and not excluded), else the first variable
/// column that is not excluded
fn pick_variable(
    domain: &dyn SelectionDomain,
    preferred: Option<&str>,
    exclude: Option<&str>,
) -> Option<String> {
    if let Some(name) = preferred {
        if domain.has_variable(name) && Some(name) != exclude {
            return Some(name.to_string());
        }
    }
    domain
        .variable_columns()
        .iter()
        .find(|c| Some(c.as_str()) != exclude)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::handler_from_fn;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedDomain {
        patients: Vec<PatientId>,
        variables: Vec<String>,
    }

    impl FixedDomain {
        fn new(patients: &[PatientId], variables: &[&str]) -> Self {
            Self {
                patients: patients.to_vec(),
                variables: variables.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl SelectionDomain for FixedDomain {
        fn patient_ids(&self) -> &[PatientId] {
            &self.patients
        }

        fn variable_columns(&self) -> &[String] {
            &self.variables
        }
    }

    fn state() -> SelectionState {
        SelectionState::new(Arc::new(EventBus::new()))
    }

    #[test]
    fn test_seed_defaults_prefers_configured_names() {
        let domain = FixedDomain::new(&[3, 7, 12], &["HeartRate", "RespiratoryRate", "SpO2"]);
        let mut selection = state();

        let seeded = selection.seed_defaults(&domain, &SelectionPreferences::default());

        assert_eq!(seeded.len(), 4);
        assert_eq!(selection.patient(), Some(3));
        assert_eq!(selection.trend_variable(), Some("HeartRate"));
        assert_eq!(selection.cohort_x(), Some("HeartRate"));
        assert_eq!(selection.cohort_y(), Some("RespiratoryRate"));
    }

    #[test]
    fn test_seed_defaults_falls_back_to_first_columns() {
        let domain = FixedDomain::new(&[1], &["Lactate", "Sodium"]);
        let mut selection = state();

        selection.seed_defaults(&domain, &SelectionPreferences::default());

        assert_eq!(selection.trend_variable(), Some("Lactate"));
        assert_eq!(selection.cohort_x(), Some("Lactate"));
        assert_eq!(selection.cohort_y(), Some("Sodium"));
    }

    #[test]
    fn test_seed_defaults_with_single_variable_leaves_y_unset() {
        let domain = FixedDomain::new(&[1, 2], &["HeartRate"]);
        let mut selection = state();

        selection.seed_defaults(&domain, &SelectionPreferences::default());

        assert_eq!(selection.cohort_x(), Some("HeartRate"));
        assert_eq!(selection.cohort_y(), None);
    }

    #[test]
    fn test_seed_defaults_on_empty_domain_sets_nothing() {
        let domain = FixedDomain::new(&[], &[]);
        let mut selection = state();

        let seeded = selection.seed_defaults(&domain, &SelectionPreferences::default());

        assert!(seeded.is_empty());
        assert_eq!(selection.current(), &Selection::default());
    }

    #[test]
    fn test_seed_defaults_keeps_existing_values() {
        let domain = FixedDomain::new(&[1, 2], &["HeartRate", "RespiratoryRate", "SpO2"]);
        let mut selection = state();
        selection.set_patient(2, &domain).unwrap();
        selection.set_cohort_y("HeartRate", &domain).unwrap();

        selection.seed_defaults(&domain, &SelectionPreferences::default());

        assert_eq!(selection.patient(), Some(2));
        assert_eq!(selection.cohort_y(), Some("HeartRate"));
        // preferred X collides with the chosen Y, so the first other column is used
        assert_eq!(selection.cohort_x(), Some("RespiratoryRate"));
    }

    #[test]
    fn test_invalid_selection_leaves_state_unchanged() {
        let domain = FixedDomain::new(&[1, 2], &["HeartRate", "SpO2"]);
        let mut selection = state();
        selection.seed_defaults(&domain, &SelectionPreferences::default());
        let before = selection.current().clone();

        assert_eq!(
            selection.set_patient(99, &domain),
            Err(SelectionError::UnknownPatient(99))
        );
        assert_eq!(
            selection.set_trend_variable("Age", &domain),
            Err(SelectionError::UnknownVariable("Age".to_string()))
        );
        assert_eq!(selection.current(), &before);
    }

    #[test]
    fn test_reconcile_clears_stale_slots() {
        let old = FixedDomain::new(&[7], &["HeartRate", "Lactate"]);
        let new = FixedDomain::new(&[1, 2], &["HeartRate"]);
        let mut selection = state();
        selection.set_patient(7, &old).unwrap();
        selection.set_trend_variable("Lactate", &old).unwrap();
        selection.set_cohort_x("HeartRate", &old).unwrap();

        let cleared = selection.reconcile(&new);

        assert_eq!(cleared, vec![SelectionSlot::Patient, SelectionSlot::TrendVariable]);
        assert_eq!(selection.patient(), None);
        assert_eq!(selection.cohort_x(), Some("HeartRate"));

        selection.seed_defaults(&new, &SelectionPreferences::default());
        assert_eq!(selection.patient(), Some(1));
    }

    #[test]
    fn test_only_effective_changes_are_published() {
        let bus = Arc::new(EventBus::new());
        let changes = Arc::new(AtomicUsize::new(0));
        let counter = changes.clone();
        bus.subscribe::<SelectionChanged>(handler_from_fn(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let domain = FixedDomain::new(&[1, 2], &["HeartRate"]);
        let mut selection = SelectionState::new(bus);

        assert_eq!(selection.set_patient(1, &domain), Ok(true));
        assert_eq!(selection.set_patient(1, &domain), Ok(false));
        assert!(selection.set_patient(5, &domain).is_err());
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }
}
