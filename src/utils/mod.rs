//! Shared helpers
//!
//! - Descriptive statistics over sample series
//! - DataFrame materialization with column validation

pub mod descriptive;
pub mod frame_helpers;

pub use descriptive::{median, summarize, SeriesSummary, StatisticsSummary};
pub use frame_helpers::{materialize_with_columns, numeric_series};
