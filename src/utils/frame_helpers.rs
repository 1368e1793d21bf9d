//! DataFrame helpers with column validation
//!
//! Keeps the "select, collect, verify" pattern in one place so a missing
//! column surfaces as a data-source error instead of a silent empty report.

use crate::error::{Result, SoilError};
use polars::prelude::*;
use std::collections::HashSet;

/// Materialize a LazyFrame with an explicit column list.
///
/// # Errors
/// Returns `SoilError::DataSource` if collection fails or any requested
/// column is absent from the result.
pub fn materialize_with_columns(
    lazy: LazyFrame,
    columns: &[&str],
    context: &str,
) -> Result<DataFrame> {
    let col_exprs: Vec<Expr> = columns.iter().map(|&name| col(name)).collect();

    let df = lazy
        .select(col_exprs)
        .collect()
        .map_err(|e| SoilError::DataSource(format!("{}: failed to read columns {:?}: {}", context, columns, e)))?;

    let actual_cols: HashSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for &expected in columns {
        if !actual_cols.contains(expected) {
            return Err(SoilError::DataSource(format!(
                "{}: missing expected column '{}'. Available columns: {:?}",
                context, expected, actual_cols
            )));
        }
    }

    Ok(df)
}

/// Read a column as floats, keeping row order. Nulls and values that fail
/// the numeric cast come back as `None`.
pub fn numeric_series(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let casted = df
        .column(column)
        .map_err(|e| SoilError::DataSource(format!("column '{}': {}", column, e)))?
        .cast(&DataType::Float64)?;

    Ok(casted.f64()?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialize_with_columns_success() {
        let df = df![
            "municipio" => &["Celaya", "Irapuato"],
            "ph" => &[6.1, 7.8],
            "arcilla" => &[22.0, 31.0],
        ].unwrap();

        let materialized = materialize_with_columns(df.lazy(), &["municipio", "ph"], "test").unwrap();
        assert_eq!(materialized.width(), 2);
        assert_eq!(materialized.height(), 2);
    }

    #[test]
    fn test_materialize_with_columns_missing() {
        let df = df![
            "municipio" => &["Celaya"],
        ].unwrap();

        let result = materialize_with_columns(df.lazy(), &["boro"], "test");
        let err = result.unwrap_err();
        assert!(err.is_data_source());
        assert!(err.to_string().contains("boro"));
    }

    #[test]
    fn test_numeric_series_keeps_nulls_in_place() {
        let df = df![
            "ph" => &[Some(6.5), None, Some(7.1)],
            "k" => &[Some(1i64), Some(2), None],
        ].unwrap();

        assert_eq!(numeric_series(&df, "ph").unwrap(), vec![Some(6.5), None, Some(7.1)]);
        // Integer columns are widened
        assert_eq!(numeric_series(&df, "k").unwrap(), vec![Some(1.0), Some(2.0), None]);
        assert!(numeric_series(&df, "zinc").is_err());
    }
}
