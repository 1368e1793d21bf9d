//! Soil chemistry summaries per municipality
//!
//! Turns raw validated soil analyses into two reports:
//! - interpretation: median of 14 agronomic parameters classified as
//!   low / medium / high / out of range against fixed reference bands
//! - statistics: mode, median, mean, skewness, stddev, quartiles and
//!   extremes for 27 physicochemical columns
//!
//! Layout:
//! - `reference_table` / `classify`: reference bands and the classifier
//! - `utils/`: descriptive statistics and DataFrame helpers
//! - `data`: the `DataProvider` seam and its Polars implementation
//! - `summary`: per-group report builder with per-parameter isolation
//! - `catalog`: municipality listing with report links
//! - `api_server` (feature `api`): axum routes

pub mod error;
pub mod config;
pub mod parameters;
pub mod reference_table;
pub mod classify;
pub mod utils;
pub mod data;
pub mod summary;
pub mod catalog;
pub mod formatters;
pub mod api_server;

// Re-export commonly used types
pub use error::{SoilError, StatsError};
pub use config::ServerConfig;
pub use parameters::{SoilParameter, STATISTICS_COLUMNS};
pub use reference_table::{ParameterRange, ReferenceTable, REFERENCE_TABLE};
pub use classify::{ClassificationResult, Classifier, Level};
pub use utils::{summarize, SeriesSummary, StatisticsSummary};
pub use data::{DataProvider, FrameDataProvider, GroupFilter, GroupIdentity};
pub use summary::{
    GroupResolution, GroupSummaryBuilder, Interpretation, InterpretationReport, ParameterOutcome,
    StatisticsReport,
};
pub use catalog::{build_catalog, Catalog, CatalogEntry};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
