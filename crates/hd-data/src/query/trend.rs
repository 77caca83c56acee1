//! Per-patient trend of one variable over `SampleIndex`

use hd_core::{PatientId, SAMPLE_INDEX_COLUMN};
use crate::store::TableStore;
use crate::DataError;

/// One plotted sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub sample_index: f64,
    pub value: f64,
}

/// Trend query over the loaded table
pub struct TrendQuery;

impl TrendQuery {
    /// Samples of `variable` for `patient`, ascending by `SampleIndex`.
    ///
    /// Rows whose sample index or value does not coerce to a number are
    /// dropped. Ties keep their original row order.
    pub fn run(
        store: &TableStore,
        patient: PatientId,
        variable: &str,
    ) -> Result<Vec<TrendPoint>, DataError> {
        let patients = store
            .patient_column()
            .ok_or_else(|| DataError::EmptySelection("no table loaded".to_string()))?;

        let rows: Vec<usize> = patients
            .iter()
            .enumerate()
            .filter(|(_, id)| **id == Some(patient))
            .map(|(row, _)| row)
            .collect();
        if rows.is_empty() {
            return Err(DataError::EmptySelection(format!("no rows for patient {}", patient)));
        }

        let sample_index = store.numeric_column(SAMPLE_INDEX_COLUMN).unwrap_or_default();
        let values = store.numeric_column(variable).ok_or_else(|| {
            DataError::EmptySelection(format!("column '{}' does not exist", variable))
        })?;

        let mut points: Vec<TrendPoint> = rows
            .into_iter()
            .filter_map(|row| {
                Some(TrendPoint {
                    sample_index: sample_index.get(row).copied().flatten()?,
                    value: values.get(row).copied().flatten()?,
                })
            })
            .collect();

        if points.is_empty() {
            return Err(DataError::EmptySelection(format!(
                "{} has no numeric values for patient {}",
                variable, patient
            )));
        }

        points.sort_by(|a, b| a.sample_index.total_cmp(&b.sample_index));
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{batch, floats, ints, texts};

    fn pairs(points: &[TrendPoint]) -> Vec<(f64, f64)> {
        points.iter().map(|p| (p.sample_index, p.value)).collect()
    }

    #[test]
    fn test_single_patient_sorted_by_sample_index() {
        let mut store = TableStore::default();
        store
            .load(batch(vec![
                ("PatientID", ints(&[1, 1, 1, 1])),
                ("SampleIndex", ints(&[3, 1, 2, 4])),
                ("HeartRate", floats(&[Some(80.0), Some(72.0), Some(75.0), Some(90.0)])),
            ]))
            .unwrap();

        let points = TrendQuery::run(&store, 1, "HeartRate").unwrap();

        assert_eq!(pairs(&points), vec![(1.0, 72.0), (2.0, 75.0), (3.0, 80.0), (4.0, 90.0)]);
    }

    #[test]
    fn test_other_patients_and_missing_values_are_excluded() {
        let mut store = TableStore::default();
        store
            .load(batch(vec![
                ("PatientID", ints(&[2, 1, 2, 2, 2])),
                ("SampleIndex", ints(&[2, 1, 1, 3, 2])),
                ("SpO2", texts(&[Some("97"), Some("99"), Some("95"), Some("--"), Some("96")])),
            ]))
            .unwrap();

        let points = TrendQuery::run(&store, 2, "SpO2").unwrap();

        // the "--" row is dropped; equal sample indices keep row order
        assert_eq!(pairs(&points), vec![(1.0, 95.0), (2.0, 97.0), (2.0, 96.0)]);
    }

    #[test]
    fn test_unknown_patient_is_empty_selection() {
        let mut store = TableStore::default();
        store
            .load(batch(vec![
                ("PatientID", ints(&[1])),
                ("SampleIndex", ints(&[1])),
                ("HeartRate", floats(&[Some(60.0)])),
            ]))
            .unwrap();

        assert!(matches!(
            TrendQuery::run(&store, 9, "HeartRate"),
            Err(DataError::EmptySelection(_))
        ));
    }

    #[test]
    fn test_variable_without_numbers_is_empty_selection() {
        let mut store = TableStore::default();
        store
            .load(batch(vec![
                ("PatientID", ints(&[1, 1])),
                ("SampleIndex", ints(&[1, 2])),
                ("HeartRate", floats(&[None, None])),
            ]))
            .unwrap();

        assert!(matches!(
            TrendQuery::run(&store, 1, "HeartRate"),
            Err(DataError::EmptySelection(_))
        ));
        assert!(matches!(
            TrendQuery::run(&store, 1, "Lactate"),
            Err(DataError::EmptySelection(_))
        ));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let mut store = TableStore::default();
        store
            .load(batch(vec![
                ("PatientID", ints(&[4, 4, 4])),
                ("SampleIndex", ints(&[2, 2, 1])),
                ("HeartRate", floats(&[Some(70.0), Some(71.0), Some(69.0)])),
            ]))
            .unwrap();

        let first = TrendQuery::run(&store, 4, "HeartRate").unwrap();
        let second = TrendQuery::run(&store, 4, "HeartRate").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_table_is_empty_selection() {
        let store = TableStore::default();
        assert!(matches!(
            TrendQuery::run(&store, 1, "HeartRate"),
            Err(DataError::EmptySelection(_))
        ));
    }
}
