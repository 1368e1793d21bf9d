//! Data access for validated soil analyses
//!
//! The report builders only see the `DataProvider` trait: they ask for a set
//! of columns under a group filter and get raw rows back. `FrameDataProvider`
//! is the production implementation, a Polars LazyFrame over a CSV or
//! Parquet export of the `analisis_quimicos_validados` table.
//!
//! Each call plans and collects its own frame; nothing is shared between
//! requests beyond the immutable scan plan.

use crate::error::{Result, SoilError};
use crate::parameters::{GROUP_ID_COLUMN, GROUP_NAME_COLUMN};
use crate::utils::frame_helpers::materialize_with_columns;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// How a caller identified the municipality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupFilter {
    ById(i64),
    ByName(String),
}

impl GroupFilter {
    /// Dataset column the filter applies to.
    pub fn column(&self) -> &'static str {
        match self {
            GroupFilter::ById(_) => GROUP_ID_COLUMN,
            GroupFilter::ByName(_) => GROUP_NAME_COLUMN,
        }
    }

    fn predicate(&self) -> Expr {
        match self {
            GroupFilter::ById(id) => col(GROUP_ID_COLUMN).cast(DataType::Int64).eq(lit(*id)),
            GroupFilter::ByName(name) => col(GROUP_NAME_COLUMN).eq(lit(name.clone())),
        }
    }
}

impl fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupFilter::ById(id) => write!(f, "{}={}", GROUP_ID_COLUMN, id),
            GroupFilter::ByName(name) => write!(f, "{}='{}'", GROUP_NAME_COLUMN, name),
        }
    }
}

/// Municipality resolved from a matching record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupIdentity {
    #[serde(rename = "municipio_id")]
    pub id: i64,
    #[serde(rename = "municipio_nombre")]
    pub name: String,
}

/// Source of raw analysis rows.
pub trait DataProvider: Send + Sync {
    /// Rows matching `filter`, restricted to `columns` (in that order).
    /// Missing readings are nulls.
    fn fetch_rows(&self, filter: &GroupFilter, columns: &[&str]) -> Result<DataFrame>;

    /// Identity of the first matching record with both id and name set,
    /// `None` if no such record exists.
    fn fetch_identity(&self, filter: &GroupFilter) -> Result<Option<GroupIdentity>>;

    /// Every distinct municipality in the dataset, unordered.
    fn list_groups(&self) -> Result<Vec<GroupIdentity>>;
}

/// Polars-backed provider.
#[derive(Clone)]
pub struct FrameDataProvider {
    frame: LazyFrame,
}

impl FrameDataProvider {
    pub fn from_frame(df: DataFrame) -> Self {
        Self { frame: df.lazy() }
    }

    pub fn from_csv(path: &Path) -> Result<Self> {
        let frame = LazyCsvReader::new(path)
            .with_has_header(true)
            .finish()
            .map_err(|e| SoilError::DataSource(format!("failed to scan CSV {:?}: {}", path, e)))?;
        Ok(Self { frame })
    }

    pub fn from_parquet(path: &Path) -> Result<Self> {
        let frame = LazyFrame::scan_parquet(path, Default::default())
            .map_err(|e| SoilError::DataSource(format!("failed to scan parquet {:?}: {}", path, e)))?;
        Ok(Self { frame })
    }

    /// Pick the reader from the file extension (`csv` or `parquet`).
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SoilError::Config(format!("dataset not found: {:?}", path)));
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => Self::from_csv(path),
            Some("parquet") => Self::from_parquet(path),
            other => Err(SoilError::Config(format!(
                "unsupported dataset format {:?} for {:?} (expected .csv or .parquet)",
                other, path
            ))),
        }
    }

    fn identities(df: &DataFrame) -> Result<Vec<GroupIdentity>> {
        let ids = df.column(GROUP_ID_COLUMN)?.cast(&DataType::Int64)?;
        let ids = ids.i64()?;
        let names = df.column(GROUP_NAME_COLUMN)?.str()?;

        Ok(ids
            .into_iter()
            .zip(names.into_iter())
            .filter_map(|(id, name)| match (id, name) {
                (Some(id), Some(name)) => Some(GroupIdentity { id, name: name.to_string() }),
                _ => None,
            })
            .collect())
    }
}

impl DataProvider for FrameDataProvider {
    fn fetch_rows(&self, filter: &GroupFilter, columns: &[&str]) -> Result<DataFrame> {
        tracing::debug!("Fetching {} columns where {}", columns.len(), filter);
        let lazy = self.frame.clone().filter(filter.predicate());
        materialize_with_columns(lazy, columns, "fetch_rows")
    }

    fn fetch_identity(&self, filter: &GroupFilter) -> Result<Option<GroupIdentity>> {
        let lazy = self
            .frame
            .clone()
            .filter(filter.predicate())
            .filter(col(GROUP_ID_COLUMN).is_not_null().and(col(GROUP_NAME_COLUMN).is_not_null()))
            .limit(1);
        let df = materialize_with_columns(lazy, &[GROUP_ID_COLUMN, GROUP_NAME_COLUMN], "fetch_identity")?;
        Ok(Self::identities(&df)?.into_iter().next())
    }

    fn list_groups(&self) -> Result<Vec<GroupIdentity>> {
        let df = materialize_with_columns(
            self.frame.clone(),
            &[GROUP_ID_COLUMN, GROUP_NAME_COLUMN],
            "list_groups",
        )?;
        let distinct: BTreeSet<GroupIdentity> = Self::identities(&df)?.into_iter().collect();
        Ok(distinct.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::numeric_series;

    fn sample_frame() -> DataFrame {
        df![
            "municipio_id_FK" => &[11i64, 11, 27, 11],
            "municipio" => &["Celaya", "Celaya", "San Luis de la Paz", "Celaya"],
            "ph" => &[Some(6.2), None, Some(8.1), Some(5.0)],
            "boro" => &[Some(0.4), Some(0.9), None, Some(1.2)],
        ]
        .unwrap()
    }

    #[test]
    fn test_fetch_rows_by_id_keeps_requested_columns() {
        let provider = FrameDataProvider::from_frame(sample_frame());
        let df = provider.fetch_rows(&GroupFilter::ById(11), &["ph", "boro"]).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 2);
        assert_eq!(numeric_series(&df, "ph").unwrap(), vec![Some(6.2), None, Some(5.0)]);
    }

    #[test]
    fn test_fetch_rows_by_name() {
        let provider = FrameDataProvider::from_frame(sample_frame());
        let df = provider
            .fetch_rows(&GroupFilter::ByName("San Luis de la Paz".to_string()), &["ph"])
            .unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_fetch_rows_no_match_is_empty_not_error() {
        let provider = FrameDataProvider::from_frame(sample_frame());
        let df = provider.fetch_rows(&GroupFilter::ById(999), &["ph"]).unwrap();
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_fetch_rows_unknown_column_is_data_source_error() {
        let provider = FrameDataProvider::from_frame(sample_frame());
        let err = provider.fetch_rows(&GroupFilter::ById(11), &["arcilla"]).unwrap_err();
        assert!(err.is_data_source());
    }

    #[test]
    fn test_identity_resolves_both_fields() {
        let provider = FrameDataProvider::from_frame(sample_frame());
        let by_id = provider.fetch_identity(&GroupFilter::ById(27)).unwrap().unwrap();
        assert_eq!(by_id, GroupIdentity { id: 27, name: "San Luis de la Paz".to_string() });

        let by_name = provider
            .fetch_identity(&GroupFilter::ByName("Celaya".to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(by_name.id, 11);

        assert!(provider.fetch_identity(&GroupFilter::ById(5)).unwrap().is_none());
    }

    #[test]
    fn test_identity_skips_rows_with_missing_fields() {
        let df = df![
            "municipio_id_FK" => &[None, Some(5i64), Some(8)],
            "municipio" => &[Some("León"), Some("León"), None],
        ]
        .unwrap();
        let provider = FrameDataProvider::from_frame(df);

        let identity = provider
            .fetch_identity(&GroupFilter::ByName("León".to_string()))
            .unwrap();
        assert_eq!(identity, Some(GroupIdentity { id: 5, name: "León".to_string() }));

        // Only row has no name
        assert!(provider.fetch_identity(&GroupFilter::ById(8)).unwrap().is_none());
    }

    #[test]
    fn test_list_groups_is_distinct() {
        let provider = FrameDataProvider::from_frame(sample_frame());
        let groups = provider.list_groups().unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_open_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("soil_summary_rust_open_test.txt");
        std::fs::write(&path, "municipio\n").unwrap();
        let err = FrameDataProvider::open(&path).err().unwrap();
        assert!(matches!(err, SoilError::Config(_)));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_open_reads_csv_export() {
        let path = std::env::temp_dir().join("soil_summary_rust_open_test.csv");
        std::fs::write(
            &path,
            "municipio_id_FK,municipio,ph\n3,Acámbaro,6.4\n3,Acámbaro,\n4,Apaseo,7.9\n",
        )
        .unwrap();

        let provider = FrameDataProvider::open(&path).unwrap();
        let df = provider.fetch_rows(&GroupFilter::ById(3), &["ph"]).unwrap();
        assert_eq!(numeric_series(&df, "ph").unwrap(), vec![Some(6.4), None]);
        let _ = std::fs::remove_file(&path);
    }
}
