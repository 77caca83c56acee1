//! Cohort-level distribution and relationship queries over all patients

use crate::store::TableStore;

/// Default number of histogram bins
pub const DEFAULT_BIN_COUNT: usize = 20;

/// One equal-width histogram bin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Basic statistics of the binned values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Histogram of one variable; empty when the variable has no numeric values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    pub summary: Option<SummaryStats>,
}

impl Histogram {
    /// Bin `values` into `bin_count` equal-width bins spanning [min, max].
    ///
    /// The last bin is closed on the right. A degenerate range (all values
    /// equal) is widened to [v - 0.5, v + 0.5].
    pub fn from_values(values: &[f64], bin_count: usize) -> Self {
        if values.is_empty() || bin_count == 0 {
            return Self::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
        // halved span stays finite for values near +-f64::MAX
        let half_span = hi * 0.5 - lo * 0.5;
        let edge = |i: usize| {
            let t = i as f64 / bin_count as f64;
            lo * (1.0 - t) + hi * t
        };

        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                lower: edge(i),
                upper: if i == bin_count - 1 { hi } else { edge(i + 1) },
                count: 0,
            })
            .collect();

        for &v in values {
            let fraction = (v * 0.5 - lo * 0.5) / half_span;
            let idx = ((fraction * bin_count as f64).floor() as usize).min(bin_count - 1);
            bins[idx].count += 1;
        }

        let count = values.len();
        let mean = values.iter().map(|v| v / count as f64).sum::<f64>();
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Self {
            bins,
            summary: Some(SummaryStats {
                count,
                mean,
                std_dev: variance.sqrt(),
                min,
                max,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Number of values across all bins
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Cohort queries over the loaded table
pub struct CohortQuery;

impl CohortQuery {
    /// Histogram of every numeric value of `variable` in the table
    pub fn distribution(store: &TableStore, variable: &str, bin_count: usize) -> Histogram {
        let values: Vec<f64> = store
            .numeric_column(variable)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect();
        Histogram::from_values(&values, bin_count)
    }

    /// Row-aligned (x, y) pairs where both cells are numeric
    pub fn relationship(store: &TableStore, x_variable: &str, y_variable: &str) -> Vec<(f64, f64)> {
        let (Some(xs), Some(ys)) = (store.numeric_column(x_variable), store.numeric_column(y_variable)) else {
            return Vec::new();
        };

        xs.into_iter()
            .zip(ys)
            .filter_map(|(x, y)| Some((x?, y?)))
            .collect()
    }
}
