use hd_core::SelectionError;
use hd_data::DataError;
use hd_imaging::ImageError;
use thiserror::Error;

/// Failure of one dashboard action. Every variant is recoverable; the
/// dashboard keeps running after reporting it.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The relational source failed; carries its message verbatim
    #[error("{0}")]
    DataSource(String),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

impl DashboardError {
    /// Short heading for the notice shown to the user
    pub fn title(&self) -> &'static str {
        match self {
            DashboardError::DataSource(_) => "DB Error",
            DashboardError::Data(DataError::Schema { .. }) => "Schema Error",
            DashboardError::Data(DataError::EmptySelection(_)) => "No Data",
            DashboardError::Data(_) => "Data Error",
            DashboardError::Selection(_) => "Invalid Selection",
            DashboardError::Image(ImageError::Load(_)) => "Image Load Error",
            DashboardError::Image(_) => "Image Error",
        }
    }
}
