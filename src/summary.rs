//! Group Summary Builder - per-municipality interpretation and statistics
//!
//! Two reports over the same group resolution:
//! - interpretation: median of each of the 14 interpretable parameters,
//!   classified against the reference table
//! - statistics: full descriptive summary for the 27 physicochemical columns
//!
//! A failure inside one parameter becomes that parameter's leaf; only
//! data-source errors abort a report.

use crate::classify::{Classifier, Level};
use crate::data::{DataProvider, GroupFilter, GroupIdentity};
use crate::error::{Result, SoilError};
use crate::parameters::{
    interpretation_columns, SoilParameter, GROUP_ID_COLUMN, GROUP_NAME_COLUMN, STATISTICS_COLUMNS,
};
use crate::reference_table::ReferenceTable;
use crate::utils::descriptive::{self, SeriesSummary, StatisticsSummary};
use crate::utils::frame_helpers::numeric_series;
use polars::prelude::DataFrame;
use rayon::prelude::*;

/// Result for a single parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterOutcome<T> {
    Computed(T),
    /// No valid readings for this parameter.
    NoData,
    /// The parameter could not be computed; carries the reason.
    Failed(String),
}

impl<T> ParameterOutcome<T> {
    pub fn computed(&self) -> Option<&T> {
        match self {
            ParameterOutcome::Computed(v) => Some(v),
            _ => None,
        }
    }
}

/// Median-based interpretation of one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub median: f64,
    pub level: Level,
    pub description: &'static str,
    pub valid_samples: usize,
}

/// How the requested group resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupResolution {
    Found {
        identity: GroupIdentity,
        total_rows: usize,
    },
    /// Nothing matched; only the caller's identifier is known.
    NotFound(GroupFilter),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterpretationReport {
    pub resolution: GroupResolution,
    pub parameters: Vec<(SoilParameter, ParameterOutcome<Interpretation>)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    pub resolution: GroupResolution,
    pub columns: Vec<(&'static str, ParameterOutcome<StatisticsSummary>)>,
}

impl InterpretationReport {
    pub fn get(&self, parameter: SoilParameter) -> Option<&ParameterOutcome<Interpretation>> {
        self.parameters.iter().find(|(p, _)| *p == parameter).map(|(_, o)| o)
    }
}

impl StatisticsReport {
    pub fn get(&self, column: &str) -> Option<&ParameterOutcome<StatisticsSummary>> {
        self.columns.iter().find(|(c, _)| *c == column).map(|(_, o)| o)
    }
}

/// Builds per-group reports from a data provider.
pub struct GroupSummaryBuilder<'a> {
    provider: &'a dyn DataProvider,
    classifier: Classifier<'a>,
}

impl<'a> GroupSummaryBuilder<'a> {
    pub fn new(provider: &'a dyn DataProvider, table: &'a ReferenceTable) -> Self {
        Self {
            provider,
            classifier: Classifier::new(table),
        }
    }

    /// Interpretation report for one municipality.
    pub fn interpretation_report(&self, filter: &GroupFilter) -> Result<InterpretationReport> {
        let columns = interpretation_columns();
        let Some((identity, rows)) = self.resolve(filter, &columns)? else {
            return Ok(InterpretationReport {
                resolution: GroupResolution::NotFound(filter.clone()),
                parameters: Vec::new(),
            });
        };

        let mut parameters = Vec::with_capacity(SoilParameter::ALL.len());
        for param in SoilParameter::ALL {
            let outcome = match numeric_series(&rows, param.column()) {
                Ok(series) => self.interpret(param, &series),
                Err(e) => ParameterOutcome::Failed(e.to_string()),
            };
            if let ParameterOutcome::Failed(reason) = &outcome {
                tracing::warn!("{} [{}]: interpretation failed: {}", identity.name, param, reason);
            }
            parameters.push((param, outcome));
        }

        tracing::info!(
            "Interpreted {} parameters for {} ({} rows)",
            parameters.len(),
            identity.name,
            rows.height()
        );

        Ok(InterpretationReport {
            resolution: GroupResolution::Found { identity, total_rows: rows.height() },
            parameters,
        })
    }

    /// Statistics report for one municipality.
    pub fn statistics_report(&self, filter: &GroupFilter) -> Result<StatisticsReport> {
        let Some((identity, rows)) = self.resolve(filter, &STATISTICS_COLUMNS)? else {
            return Ok(StatisticsReport {
                resolution: GroupResolution::NotFound(filter.clone()),
                columns: Vec::new(),
            });
        };

        let series: Vec<(&'static str, std::result::Result<Vec<Option<f64>>, String>)> = STATISTICS_COLUMNS
            .iter()
            .map(|&column| (column, numeric_series(&rows, column).map_err(|e| e.to_string())))
            .collect();

        // Order-preserving collect keeps the fixed column order
        let columns: Vec<(&'static str, ParameterOutcome<StatisticsSummary>)> = series
            .into_par_iter()
            .map(|(column, values)| {
                let outcome = match values {
                    Ok(values) => summarize_outcome(&values),
                    Err(reason) => ParameterOutcome::Failed(reason),
                };
                (column, outcome)
            })
            .collect();

        for (column, outcome) in &columns {
            if let ParameterOutcome::Failed(reason) = outcome {
                tracing::warn!("{} [{}]: statistics failed: {}", identity.name, column, reason);
            }
        }

        tracing::info!(
            "Computed statistics for {} columns for {} ({} rows)",
            columns.len(),
            identity.name,
            rows.height()
        );

        Ok(StatisticsReport {
            resolution: GroupResolution::Found { identity, total_rows: rows.height() },
            columns,
        })
    }

    /// Fetch rows and identity. `None` when no row matches; matching rows
    /// without any complete id/name pair are a data-source error.
    fn resolve(&self, filter: &GroupFilter, columns: &[&str]) -> Result<Option<(GroupIdentity, DataFrame)>> {
        let rows = self.provider.fetch_rows(filter, columns)?;
        if rows.height() == 0 {
            tracing::info!("No rows for {}", filter);
            return Ok(None);
        }

        match self.provider.fetch_identity(filter)? {
            Some(identity) => Ok(Some((identity, rows))),
            None => Err(SoilError::DataSource(format!(
                "{} rows matched {} but none carries both {} and {}",
                rows.height(),
                filter,
                GROUP_ID_COLUMN,
                GROUP_NAME_COLUMN
            ))),
        }
    }

    fn interpret(&self, param: SoilParameter, series: &[Option<f64>]) -> ParameterOutcome<Interpretation> {
        let valid_samples = descriptive::valid_values(series).len();
        match descriptive::median(series) {
            Ok(Some(median)) => {
                let result = self.classifier.classify(param, median);
                ParameterOutcome::Computed(Interpretation {
                    median,
                    level: result.level,
                    description: result.description,
                    valid_samples,
                })
            }
            Ok(None) => ParameterOutcome::NoData,
            Err(e) => ParameterOutcome::Failed(e.to_string()),
        }
    }
}

fn summarize_outcome(values: &[Option<f64>]) -> ParameterOutcome<StatisticsSummary> {
    match descriptive::summarize(values) {
        Ok(SeriesSummary::Stats(stats)) => ParameterOutcome::Computed(stats),
        Ok(SeriesSummary::Empty) => ParameterOutcome::NoData,
        Err(e) => ParameterOutcome::Failed(e.to_string()),
    }
}
