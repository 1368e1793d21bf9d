// Shared fixture: a small slice of validated analyses for three municipalities.

use polars::prelude::*;
use soil_summary_rust::STATISTICS_COLUMNS;

pub fn analyses_frame() -> DataFrame {
    let ids: Vec<i64> = vec![11, 11, 11, 11, 20, 20, 5];
    let names = vec![
        "Celaya", "Celaya", "Celaya", "Celaya",
        "San Miguel de Allende", "San Miguel de Allende",
        "Abasolo",
    ];

    let mut columns = vec![
        Column::new("municipio_id_FK".into(), ids.clone()),
        Column::new("municipio".into(), names),
    ];

    for &name in STATISTICS_COLUMNS.iter() {
        let values: Vec<Option<f64>> = match name {
            // Celaya median 6.5 (medio); Allende median 7.25 (gap); Abasolo 5.1 (bajo)
            "ph" => vec![Some(6.0), Some(7.0), Some(6.5), None, Some(7.1), Some(7.4), Some(5.1)],
            "mo" => vec![Some(1.2), Some(1.2), Some(3.1), Some(0.8), None, None, Some(4.5)],
            "cic" => vec![Some(30.0), Some(28.5), None, Some(26.0), Some(12.0), Some(11.0), Some(9.0)],
            "arcilla" => vec![Some(22.0), Some(35.0), Some(35.0), Some(18.0), Some(40.0), Some(41.0), Some(12.0)],
            "boro" => vec![None, None, None, None, Some(0.7), Some(0.6), None],
            "ca_mg" => vec![Some(4.0), Some(f64::INFINITY), Some(3.5), Some(4.2), Some(2.0), Some(2.5), Some(1.0)],
            _ => ids.iter().enumerate().map(|(i, _)| Some(1.0 + i as f64)).collect(),
        };
        columns.push(Column::new(name.into(), values));
    }

    DataFrame::new(columns).expect("fixture frame")
}
