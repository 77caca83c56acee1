//! Dashboard configuration

use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use tracing::info;

/// Environment variable naming an optional JSON configuration file
pub const CONFIG_ENV_VAR: &str = "HEALTH_DASHBOARD_CONFIG";

/// Largest blur or edge sigma a configuration may name
pub const MAX_IMAGING_SIGMA: f64 = 64.0;

/// Top-level dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Where the vitals table is fetched from
    pub database: DatabaseConfig,

    /// Numeric columns that are not vital signs (excluded from variable lists)
    pub non_vital_columns: Vec<String>,

    /// Extra text cells read as missing, on top of the built-in markers
    pub null_markers: Vec<String>,

    /// Preferred default selections
    pub preferences: SelectionPreferences,

    /// Number of equal-width bins in the cohort histogram
    pub histogram_bins: usize,

    /// Image transform parameters
    pub imaging: ImagingConfig,

    /// Delay before the one-shot startup fetch, in milliseconds
    pub startup_delay_ms: u64,
}

/// Relational source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,

    /// Table holding one row per vital-sign sample
    pub table: String,
}

/// Names seeded into empty selectors when present in the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPreferences {
    pub trend_variable: Option<String>,
    pub cohort_x: Option<String>,
    pub cohort_y: Option<String>,
}

/// Parameters of the image transform buttons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagingConfig {
    /// Gaussian sigma used by the blur button
    pub blur_sigma: f64,

    /// Pre-smoothing sigma used by the edge button
    pub edge_sigma: f64,

    /// Hysteresis low threshold on gradient magnitude
    pub edge_low_threshold: f64,

    /// Hysteresis high threshold on gradient magnitude
    pub edge_high_threshold: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            non_vital_columns: vec!["Age".to_string()],
            null_markers: Vec::new(),
            preferences: SelectionPreferences::default(),
            histogram_bins: 20,
            imaging: ImagingConfig::default(),
            startup_delay_ms: 1000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/health_dashboard.db"),
            table: "synthetic_patient_timeseries".to_string(),
        }
    }
}

impl Default for SelectionPreferences {
    fn default() -> Self {
        Self {
            trend_variable: Some("HeartRate".to_string()),
            cohort_x: Some("HeartRate".to_string()),
            cohort_y: Some("RespiratoryRate".to_string()),
        }
    }
}

impl Default for ImagingConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 2.0,
            edge_sigma: 1.0,
            edge_low_threshold: 0.1,
            edge_high_threshold: 0.2,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Reject values the dashboard cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.histogram_bins > 0, "histogram_bins must be at least 1");

        let imaging = &self.imaging;
        for (name, sigma) in [("blur_sigma", imaging.blur_sigma), ("edge_sigma", imaging.edge_sigma)] {
            anyhow::ensure!(
                sigma.is_finite() && sigma > 0.0 && sigma <= MAX_IMAGING_SIGMA,
                "imaging.{} must be in (0, {}], got {}",
                name,
                MAX_IMAGING_SIGMA,
                sigma
            );
        }
        anyhow::ensure!(
            imaging.edge_low_threshold.is_finite()
                && imaging.edge_high_threshold.is_finite()
                && 0.0 <= imaging.edge_low_threshold
                && imaging.edge_low_threshold <= imaging.edge_high_threshold,
            "edge thresholds must satisfy 0 <= low <= high, got {} and {}",
            imaging.edge_low_threshold,
            imaging.edge_high_threshold
        );
        Ok(())
    }

    /// Load from the file named by `HEALTH_DASHBOARD_CONFIG`, or defaults when unset
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
