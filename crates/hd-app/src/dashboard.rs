//! The dashboard controller
//!
//! Owns the table, the selection and the image pipeline. Every user action
//! is a method returning `Result`; failures are logged, recorded as a
//! notice, and leave the dashboard usable.

use std::path::Path;
use std::sync::Arc;
use arrow::record_batch::RecordBatch;
use tracing::{debug, info, warn};

use hd_core::events::events::{DataSourceError, ImageLoaded, ImageTransformed, TableLoaded};
use hd_core::{DashboardConfig, EventBus, PatientId, SelectionSlot, SelectionState};
use hd_data::{CohortQuery, DataError, Histogram, NullConfig, TableStore, TrendQuery};
use hd_imaging::{ImageBuffer, ImagePipeline, ImageSource};
use hd_ui::{Notice, NoticeLevel, StatusLine};
use hd_views::{ImageSlot, ViewSink};

use crate::error::DashboardError;

pub struct Dashboard {
    config: DashboardConfig,
    event_bus: Arc<EventBus>,
    store: TableStore,
    selection: SelectionState,
    images: ImagePipeline,
    status: StatusLine,
    notices: Vec<Notice>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, event_bus: Arc<EventBus>) -> Self {
        let store = TableStore::new(config.non_vital_columns.clone())
            .with_null_config(NullConfig::with_markers(&config.null_markers));
        let images = ImagePipeline::with_thresholds(
            config.imaging.edge_low_threshold as f32,
            config.imaging.edge_high_threshold as f32,
        );
        Self {
            selection: SelectionState::new(event_bus.clone()),
            config,
            event_bus,
            store,
            images,
            status: StatusLine::Initializing,
            notices: Vec::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn images(&self) -> &ImagePipeline {
        &self.images
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn notices_mut(&mut self) -> &mut Vec<Notice> {
        &mut self.notices
    }

    /// A fetch was started for `source_name`
    pub fn begin_fetch(&mut self, source_name: &str) {
        self.status = StatusLine::Loading(source_name.to_string());
    }

    /// Apply the outcome of a table fetch: replace the table, repair and
    /// seed the selection, and redraw every plot.
    pub fn apply_table(
        &mut self,
        source_name: &str,
        fetched: anyhow::Result<RecordBatch>,
        sink: &mut dyn ViewSink,
    ) -> Result<(), DashboardError> {
        let batch = match fetched {
            Ok(batch) => batch,
            Err(e) => {
                let message = format!("{:#}", e);
                self.event_bus.publish(DataSourceError {
                    source_name: source_name.to_string(),
                    error: message.clone(),
                });
                self.status = StatusLine::Failed(message.clone());
                return Err(self.report(DashboardError::DataSource(message)));
            }
        };

        if let Err(e) = self.store.load(batch) {
            self.event_bus.publish(DataSourceError {
                source_name: source_name.to_string(),
                error: e.to_string(),
            });
            self.status = StatusLine::Failed(e.to_string());
            return Err(self.report(e.into()));
        }

        let cleared = self.selection.reconcile(&self.store);
        if !cleared.is_empty() {
            info!("Reload dropped selections {:?}", cleared);
        }
        self.selection.seed_defaults(&self.store, &self.config.preferences);

        self.status = StatusLine::Connected { records: self.store.row_count() };
        self.event_bus.publish(TableLoaded {
            source_name: source_name.to_string(),
            row_count: self.store.row_count(),
            patient_count: self.store.distinct_patient_ids().len(),
            variable_count: self.store.variable_columns().len(),
        });

        // an empty trend after a reload is shown as a placeholder, not an error
        if let Err(e) = self.refresh_trend(sink) {
            debug!("Trend after reload is empty: {}", e);
        }
        self.refresh_cohort(sink);
        Ok(())
    }

    pub fn select_patient(&mut self, id: PatientId, sink: &mut dyn ViewSink) -> Result<(), DashboardError> {
        match self.selection.set_patient(id, &self.store) {
            Ok(true) => self.refresh_trend(sink),
            Ok(false) => Ok(()),
            Err(e) => Err(self.report(e.into())),
        }
    }

    pub fn select_trend_variable(&mut self, name: &str, sink: &mut dyn ViewSink) -> Result<(), DashboardError> {
        match self.selection.set_trend_variable(name, &self.store) {
            Ok(true) => self.refresh_trend(sink),
            Ok(false) => Ok(()),
            Err(e) => Err(self.report(e.into())),
        }
    }

    pub fn select_cohort_x(&mut self, name: &str, sink: &mut dyn ViewSink) -> Result<(), DashboardError> {
        self.select_cohort(SelectionSlot::CohortX, name, sink)
    }

    pub fn select_cohort_y(&mut self, name: &str, sink: &mut dyn ViewSink) -> Result<(), DashboardError> {
        self.select_cohort(SelectionSlot::CohortY, name, sink)
    }

    fn select_cohort(
        &mut self,
        slot: SelectionSlot,
        name: &str,
        sink: &mut dyn ViewSink,
    ) -> Result<(), DashboardError> {
        let changed = match slot {
            SelectionSlot::CohortX => self.selection.set_cohort_x(name, &self.store),
            _ => self.selection.set_cohort_y(name, &self.store),
        };
        match changed {
            Ok(true) => {
                self.refresh_cohort(sink);
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(e) => Err(self.report(e.into())),
        }
    }

    /// Redraw the trend for the current patient and variable. A selection
    /// without numeric samples renders an empty plot and reports `EmptySelection`.
    pub fn refresh_trend(&mut self, sink: &mut dyn ViewSink) -> Result<(), DashboardError> {
        let (Some(patient), Some(variable)) = (self.selection.patient(), self.selection.trend_variable()) else {
            sink.render_trend(&[], "Patient Trend");
            return Ok(());
        };
        let title = format!("Patient {} {} Trend", patient, variable);

        match TrendQuery::run(&self.store, patient, variable) {
            Ok(points) => {
                sink.render_trend(&points, &title);
                Ok(())
            }
            Err(e) => {
                sink.render_trend(&[], &title);
                Err(self.report(e.into()))
            }
        }
    }

    /// Redraw the cohort distribution and relationship plots ("Update Analytics").
    /// Unset slots render empty plots so no earlier table stays on screen.
    pub fn refresh_cohort(&mut self, sink: &mut dyn ViewSink) {
        match self.selection.cohort_x() {
            Some(x) => {
                let histogram = CohortQuery::distribution(&self.store, x, self.config.histogram_bins);
                sink.render_histogram(&histogram, &format!("Cohort Distribution: {}", x));
            }
            None => sink.render_histogram(&Histogram::default(), "Cohort Distribution"),
        }

        match (self.selection.cohort_x(), self.selection.cohort_y()) {
            (Some(x), Some(y)) => {
                let pairs = CohortQuery::relationship(&self.store, x, y);
                sink.render_scatter(&pairs, &format!("Relationship: {} vs {}", x, y));
            }
            _ => sink.render_scatter(&[], "Relationship"),
        }
    }

    /// Decode an image file and show it in both image views
    pub fn open_image(
        &mut self,
        source: &dyn ImageSource,
        path: &Path,
        sink: &mut dyn ViewSink,
    ) -> Result<(), DashboardError> {
        let loaded = source.load_image(path).and_then(|raw| self.images.load(raw).cloned());
        let buffer = match loaded {
            Ok(buffer) => buffer,
            Err(e) => return Err(self.report(e.into())),
        };

        self.event_bus.publish(ImageLoaded {
            width: buffer.width(),
            height: buffer.height(),
            channels: buffer.channels(),
        });
        sink.render_image(&buffer, ImageSlot::Original);
        sink.render_image(&buffer, ImageSlot::Processed);
        Ok(())
    }

    pub fn reset_image(&mut self, sink: &mut dyn ViewSink) -> Result<(), DashboardError> {
        let result = self.images.reset().cloned();
        self.show_processed(result, sink)
    }

    pub fn to_grayscale(&mut self, sink: &mut dyn ViewSink) -> Result<(), DashboardError> {
        let result = self.images.to_grayscale().cloned();
        self.show_processed(result, sink)
    }

    /// Blur with the configured sigma
    pub fn blur_image(&mut self, sink: &mut dyn ViewSink) -> Result<(), DashboardError> {
        let result = self.images.blur(self.config.imaging.blur_sigma).cloned();
        self.show_processed(result, sink)
    }

    /// Edge detection with the configured sigma
    pub fn detect_edges(&mut self, sink: &mut dyn ViewSink) -> Result<(), DashboardError> {
        let result = self.images.detect_edges(self.config.imaging.edge_sigma).cloned();
        self.show_processed(result, sink)
    }

    fn show_processed(
        &mut self,
        result: Result<ImageBuffer, hd_imaging::ImageError>,
        sink: &mut dyn ViewSink,
    ) -> Result<(), DashboardError> {
        match result {
            Ok(buffer) => {
                self.event_bus.publish(ImageTransformed { kind: buffer.kind.label().to_string() });
                sink.render_image(&buffer, ImageSlot::Processed);
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    /// Log the error and record it as a notice
    fn report(&mut self, error: DashboardError) -> DashboardError {
        let level = match &error {
            DashboardError::Data(DataError::EmptySelection(_)) => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        };
        warn!("{}: {}", error.title(), error);
        self.notices.push(Notice::new(level, error.title(), error.to_string()));
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use arrow::array::{ArrayRef, Float64Array, Int64Array};
    use arrow::datatypes::{Field, Schema};
    use hd_core::events::events::SelectionChanged;
    use hd_core::{handler_from_fn, SelectionError};
    use hd_data::{Histogram, TrendPoint};
    use hd_imaging::{ImageError, ImageKind, RawImage};

    /// Records every render call
    #[derive(Default)]
    struct RecordingSink {
        trends: Vec<(Vec<TrendPoint>, String)>,
        histograms: Vec<(Histogram, String)>,
        scatters: Vec<(Vec<(f64, f64)>, String)>,
        images: Vec<(ImageKind, ImageSlot)>,
    }

    impl ViewSink for RecordingSink {
        fn render_trend(&mut self, points: &[TrendPoint], title: &str) {
            self.trends.push((points.to_vec(), title.to_string()));
        }

        fn render_histogram(&mut self, histogram: &Histogram, title: &str) {
            self.histograms.push((histogram.clone(), title.to_string()));
        }

        fn render_scatter(&mut self, points: &[(f64, f64)], title: &str) {
            self.scatters.push((points.to_vec(), title.to_string()));
        }

        fn render_image(&mut self, image: &ImageBuffer, slot: ImageSlot) {
            self.images.push((image.kind, slot));
        }
    }

    /// Image source handing out a fixed raw image
    struct FixedImage(Result<RawImage, ImageError>);

    impl ImageSource for FixedImage {
        fn load_image(&self, _path: &Path) -> Result<RawImage, ImageError> {
            self.0.clone()
        }
    }

    fn vitals(ids: &[i64], samples: &[i64], heart: &[Option<f64>], resp: &[Option<f64>]) -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("PatientID", arrow::datatypes::DataType::Int64, true),
            Field::new("SampleIndex", arrow::datatypes::DataType::Int64, true),
            Field::new("HeartRate", arrow::datatypes::DataType::Float64, true),
            Field::new("RespiratoryRate", arrow::datatypes::DataType::Float64, true),
        ]);
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(ids.to_vec())),
            Arc::new(Int64Array::from(samples.to_vec())),
            Arc::new(Float64Array::from(heart.to_vec())),
            Arc::new(Float64Array::from(resp.to_vec())),
        ];
        RecordBatch::try_new(Arc::new(schema), columns).unwrap()
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(DashboardConfig::default(), Arc::new(EventBus::new()))
    }

    fn loaded_dashboard(sink: &mut RecordingSink) -> Dashboard {
        let mut dashboard = dashboard();
        let batch = vitals(
            &[7, 7, 3, 3],
            &[2, 1, 1, 2],
            &[Some(80.0), Some(72.0), Some(65.0), Some(66.0)],
            &[Some(16.0), Some(14.0), None, Some(12.0)],
        );
        dashboard.apply_table("vitals.db", Ok(batch), sink).unwrap();
        dashboard
    }

    fn rgb_raw(size: usize) -> RawImage {
        let mut data = Vec::new();
        for _ in 0..size {
            for c in 0..size {
                let v = if c >= size / 2 { 0.9 } else { 0.1 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        RawImage { width: size, height: size, channels: 3, data }
    }

    #[test]
    fn test_load_seeds_defaults_and_renders() {
        let mut sink = RecordingSink::default();
        let dashboard = loaded_dashboard(&mut sink);

        assert_eq!(dashboard.selection().patient(), Some(3));
        assert_eq!(dashboard.selection().trend_variable(), Some("HeartRate"));
        assert_eq!(dashboard.selection().cohort_x(), Some("HeartRate"));
        assert_eq!(dashboard.selection().cohort_y(), Some("RespiratoryRate"));
        assert_eq!(dashboard.status(), &StatusLine::Connected { records: 4 });

        let (points, title) = sink.trends.last().unwrap();
        assert_eq!(title, "Patient 3 HeartRate Trend");
        assert_eq!(points.len(), 2);
        assert_eq!(sink.histograms.last().unwrap().1, "Cohort Distribution: HeartRate");
        let (pairs, title) = sink.scatters.last().unwrap();
        assert_eq!(title, "Relationship: HeartRate vs RespiratoryRate");
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_select_patient_redraws_sorted_trend() {
        let mut sink = RecordingSink::default();
        let mut dashboard = loaded_dashboard(&mut sink);

        dashboard.select_patient(7, &mut sink).unwrap();

        let (points, title) = sink.trends.last().unwrap();
        assert_eq!(title, "Patient 7 HeartRate Trend");
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![72.0, 80.0]);
    }

    #[test]
    fn test_invalid_selection_is_reported_and_ignored() {
        let mut sink = RecordingSink::default();
        let mut dashboard = loaded_dashboard(&mut sink);
        let before = dashboard.selection().current().clone();
        let renders = sink.trends.len();

        let err = dashboard.select_patient(99, &mut sink).unwrap_err();
        assert!(matches!(err, DashboardError::Selection(SelectionError::UnknownPatient(99))));
        let err = dashboard.select_cohort_y("Age", &mut sink).unwrap_err();
        assert!(matches!(err, DashboardError::Selection(SelectionError::UnknownVariable(_))));

        assert_eq!(dashboard.selection().current(), &before);
        assert_eq!(sink.trends.len(), renders);
        assert_eq!(dashboard.notices_mut().len(), 2);
    }

    #[test]
    fn test_reload_without_selected_patient_falls_back_to_first() {
        let mut sink = RecordingSink::default();
        let mut dashboard = loaded_dashboard(&mut sink);
        dashboard.select_patient(7, &mut sink).unwrap();

        let reloaded = vitals(&[4, 2], &[1, 1], &[Some(70.0), Some(75.0)], &[Some(15.0), Some(17.0)]);
        dashboard.apply_table("vitals.db", Ok(reloaded), &mut sink).unwrap();

        assert_eq!(dashboard.selection().patient(), Some(2));
        assert_eq!(sink.trends.last().unwrap().1, "Patient 2 HeartRate Trend");
        assert!(dashboard.notices_mut().is_empty());
    }

    fn single_variable(name: &str, values: &[Option<f64>]) -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("PatientID", arrow::datatypes::DataType::Int64, true),
            Field::new("SampleIndex", arrow::datatypes::DataType::Int64, true),
            Field::new(name, arrow::datatypes::DataType::Float64, true),
        ]);
        let rows = values.len() as i64;
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![1; values.len()])),
            Arc::new(Int64Array::from((1..=rows).collect::<Vec<i64>>())),
            Arc::new(Float64Array::from(values.to_vec())),
        ];
        RecordBatch::try_new(Arc::new(schema), columns).unwrap()
    }

    #[test]
    fn test_reload_with_one_variable_clears_relationship_plot() {
        let mut sink = RecordingSink::default();
        let mut dashboard = loaded_dashboard(&mut sink);
        assert_eq!(sink.scatters.last().unwrap().0.len(), 3);

        let reloaded = single_variable("SpO2", &[Some(97.0), Some(95.0)]);
        dashboard.apply_table("vitals.db", Ok(reloaded), &mut sink).unwrap();

        assert_eq!(dashboard.selection().cohort_x(), Some("SpO2"));
        assert_eq!(dashboard.selection().cohort_y(), None);
        let (histogram, title) = sink.histograms.last().unwrap();
        assert_eq!(title, "Cohort Distribution: SpO2");
        assert_eq!(histogram.total_count(), 2);
        let (pairs, title) = sink.scatters.last().unwrap();
        assert!(pairs.is_empty());
        assert_eq!(title, "Relationship");
    }

    #[test]
    fn test_reload_without_variables_clears_cohort_plots() {
        let mut sink = RecordingSink::default();
        let mut dashboard = loaded_dashboard(&mut sink);

        let schema = Schema::new(vec![
            Field::new("PatientID", arrow::datatypes::DataType::Int64, true),
            Field::new("SampleIndex", arrow::datatypes::DataType::Int64, true),
        ]);
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![1])),
            Arc::new(Int64Array::from(vec![1])),
        ];
        let reloaded = RecordBatch::try_new(Arc::new(schema), columns).unwrap();
        dashboard.apply_table("vitals.db", Ok(reloaded), &mut sink).unwrap();

        let (histogram, title) = sink.histograms.last().unwrap();
        assert!(histogram.is_empty());
        assert_eq!(title, "Cohort Distribution");
        assert!(sink.scatters.last().unwrap().0.is_empty());
        let (points, title) = sink.trends.last().unwrap();
        assert!(points.is_empty());
        assert_eq!(title, "Patient Trend");
    }

    #[test]
    fn test_config_sigma_bound_matches_filters() {
        assert_eq!(hd_core::settings::MAX_IMAGING_SIGMA, hd_imaging::filters::MAX_SIGMA);
    }

    #[test]
    fn test_configured_null_markers_reach_the_store() {
        let config = DashboardConfig {
            null_markers: vec!["?".to_string()],
            ..DashboardConfig::default()
        };
        let mut dashboard = Dashboard::new(config, Arc::new(EventBus::new()));
        let mut sink = RecordingSink::default();

        let schema = Schema::new(vec![
            Field::new("PatientID", arrow::datatypes::DataType::Int64, true),
            Field::new("SampleIndex", arrow::datatypes::DataType::Int64, true),
            Field::new("HeartRate", arrow::datatypes::DataType::Utf8, true),
        ]);
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![1, 1])),
            Arc::new(Int64Array::from(vec![1, 2])),
            Arc::new(arrow::array::StringArray::from(vec!["72", "?"])),
        ];
        let batch = RecordBatch::try_new(Arc::new(schema), columns).unwrap();
        dashboard.apply_table("vitals.csv", Ok(batch), &mut sink).unwrap();

        assert_eq!(dashboard.store().numeric_column("HeartRate").unwrap(), vec![Some(72.0), None]);
    }

    #[test]
    fn test_selection_events_follow_effective_changes() {
        let bus = Arc::new(EventBus::new());
        let changes = Arc::new(Mutex::new(Vec::new()));
        let seen = changes.clone();
        bus.subscribe::<SelectionChanged>(handler_from_fn(move |event| {
            if let Some(e) = event.as_any().downcast_ref::<SelectionChanged>() {
                seen.lock().unwrap().push(e.slot);
            }
        }));

        let mut sink = RecordingSink::default();
        let mut dashboard = Dashboard::new(DashboardConfig::default(), bus);
        let batch = vitals(&[1, 2], &[1, 1], &[Some(70.0), Some(71.0)], &[Some(12.0), Some(13.0)]);
        dashboard.apply_table("vitals.db", Ok(batch), &mut sink).unwrap();
        assert_eq!(changes.lock().unwrap().len(), 4);

        dashboard.select_patient(1, &mut sink).unwrap();
        dashboard.select_patient(2, &mut sink).unwrap();
        assert_eq!(changes.lock().unwrap().len(), 5);
        assert_eq!(changes.lock().unwrap().last(), Some(&SelectionSlot::Patient));
    }

    #[test]
    fn test_empty_trend_renders_placeholder() {
        let mut sink = RecordingSink::default();
        let mut dashboard = dashboard();
        let batch = vitals(&[1, 2], &[1, 1], &[None, Some(71.0)], &[Some(12.0), Some(13.0)]);
        dashboard.apply_table("vitals.db", Ok(batch), &mut sink).unwrap();

        // patient 1 has no heart rate samples
        let (points, title) = sink.trends.last().unwrap();
        assert!(points.is_empty());
        assert_eq!(title, "Patient 1 HeartRate Trend");

        let err = dashboard.refresh_trend(&mut sink).unwrap_err();
        assert!(matches!(err, DashboardError::Data(DataError::EmptySelection(_))));
    }

    #[test]
    fn test_source_failure_keeps_previous_table() {
        let mut sink = RecordingSink::default();
        let mut dashboard = loaded_dashboard(&mut sink);

        let err = dashboard
            .apply_table("vitals.db", Err(anyhow::anyhow!("connection refused")), &mut sink)
            .unwrap_err();

        assert!(matches!(&err, DashboardError::DataSource(m) if m == "connection refused"));
        assert_eq!(dashboard.store().row_count(), 4);
        assert_eq!(dashboard.status(), &StatusLine::Failed("connection refused".to_string()));
        assert_eq!(dashboard.notices_mut()[0].title, "DB Error");
    }

    #[test]
    fn test_table_without_sample_index_is_rejected() {
        let mut sink = RecordingSink::default();
        let mut dashboard = loaded_dashboard(&mut sink);
        let schema = Schema::new(vec![Field::new("PatientID", arrow::datatypes::DataType::Int64, true)]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![Arc::new(Int64Array::from(vec![1])) as ArrayRef],
        )
        .unwrap();

        let err = dashboard.apply_table("vitals.db", Ok(batch), &mut sink).unwrap_err();

        assert!(matches!(err, DashboardError::Data(DataError::Schema { .. })));
        assert_eq!(dashboard.store().distinct_patient_ids(), &[3, 7]);
    }

    #[test]
    fn test_image_chain_renders_processed_view() {
        let mut sink = RecordingSink::default();
        let mut dashboard = dashboard();

        dashboard
            .open_image(&FixedImage(Ok(rgb_raw(10))), Path::new("scan.png"), &mut sink)
            .unwrap();
        dashboard.to_grayscale(&mut sink).unwrap();
        dashboard.detect_edges(&mut sink).unwrap();

        assert_eq!(
            sink.images,
            vec![
                (ImageKind::Color, ImageSlot::Original),
                (ImageKind::Color, ImageSlot::Processed),
                (ImageKind::Grayscale, ImageSlot::Processed),
                (ImageKind::EdgeMap, ImageSlot::Processed),
            ]
        );

        dashboard.reset_image(&mut sink).unwrap();
        assert_eq!(sink.images.last(), Some(&(ImageKind::Color, ImageSlot::Processed)));
    }

    #[test]
    fn test_image_actions_without_image_are_reported() {
        let mut sink = RecordingSink::default();
        let mut dashboard = dashboard();

        let err = dashboard.blur_image(&mut sink).unwrap_err();

        assert!(matches!(err, DashboardError::Image(ImageError::NoImageLoaded)));
        assert!(sink.images.is_empty());
        assert_eq!(dashboard.notices_mut().len(), 1);
    }

    #[test]
    fn test_failed_image_load_keeps_previous_image() {
        let mut sink = RecordingSink::default();
        let mut dashboard = dashboard();
        dashboard
            .open_image(&FixedImage(Ok(rgb_raw(6))), Path::new("first.png"), &mut sink)
            .unwrap();

        let broken = FixedImage(Err(ImageError::Load("truncated file".to_string())));
        let err = dashboard.open_image(&broken, Path::new("second.png"), &mut sink).unwrap_err();

        assert!(matches!(err, DashboardError::Image(ImageError::Load(_))));
        assert_eq!(dashboard.images().original().map(|b| b.width()), Some(6));
    }
}
