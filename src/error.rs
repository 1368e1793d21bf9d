//! Error types
//!
//! Two tiers, matching how failures propagate through a report:
//! - `SoilError`: fatal for the current request (data source, configuration)
//! - `StatsError`: scoped to a single parameter, reported inside the report

use polars::prelude::PolarsError;
use thiserror::Error;

/// Request-level failure. Aborts the report being built.
#[derive(Debug, Error)]
pub enum SoilError {
    /// The dataset could not be read or queried.
    #[error("data source error: {0}")]
    DataSource(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SoilError>;

/// Per-parameter computation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// A statistic came out as NaN or infinite (overflow, infinite readings).
    #[error("{statistic} is not a finite number")]
    NonFinite { statistic: &'static str },
}

impl SoilError {
    /// True when the failure came from the underlying dataset.
    pub fn is_data_source(&self) -> bool {
        matches!(self, SoilError::DataSource(_) | SoilError::Polars(_))
    }
}
