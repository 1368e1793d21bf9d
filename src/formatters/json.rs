//! JSON payloads for the HTTP layer.
//!
//! Keys keep the names already consumed by existing front ends
//! (`municipio_id`, `interpretaciones`, `desviacion_estandar`, ...).
//! Object order follows the fixed parameter order (serde_json
//! `preserve_order`).

use crate::catalog::Catalog;
use crate::data::GroupFilter;
use crate::summary::{
    GroupResolution, Interpretation, InterpretationReport, ParameterOutcome, StatisticsReport,
};
use crate::utils::descriptive::StatisticsSummary;
use serde_json::{json, Map, Value};

pub const NO_GROUP_DATA_MESSAGE: &str = "No hay datos para este municipio";
pub const NO_VALID_DATA_MESSAGE: &str = "No hay datos válidos";
pub const NO_VALID_STATS_MESSAGE: &str = "No hay datos válidos para calcular estadísticas";

pub struct JsonFormatter;

impl JsonFormatter {
    pub fn interpretation(report: &InterpretationReport) -> Value {
        let mut leaves = Map::new();
        for (param, outcome) in &report.parameters {
            leaves.insert(param.column().to_string(), interpretation_leaf(outcome));
        }
        with_resolution(&report.resolution, "interpretaciones", leaves)
    }

    pub fn statistics(report: &StatisticsReport) -> Value {
        let mut leaves = Map::new();
        for (column, outcome) in &report.columns {
            leaves.insert(column.to_string(), statistics_leaf(outcome));
        }
        with_resolution(&report.resolution, "estadisticas", leaves)
    }

    pub fn catalog(catalog: &Catalog) -> Value {
        json!({
            "total_municipios": catalog.len(),
            "municipios": catalog.entries,
        })
    }
}

fn with_resolution(resolution: &GroupResolution, key: &str, leaves: Map<String, Value>) -> Value {
    let mut body = Map::new();
    match resolution {
        GroupResolution::Found { identity, total_rows } => {
            body.insert("municipio_id".into(), json!(identity.id));
            body.insert("municipio_nombre".into(), json!(identity.name));
            body.insert("total_registros".into(), json!(total_rows));
        }
        GroupResolution::NotFound(filter) => {
            match filter {
                GroupFilter::ById(id) => body.insert("municipio_id".into(), json!(id)),
                GroupFilter::ByName(name) => body.insert("municipio_nombre".into(), json!(name)),
            };
            body.insert("mensaje".into(), json!(NO_GROUP_DATA_MESSAGE));
        }
    }
    body.insert(key.to_string(), Value::Object(leaves));
    Value::Object(body)
}

fn interpretation_leaf(outcome: &ParameterOutcome<Interpretation>) -> Value {
    match outcome {
        ParameterOutcome::Computed(i) => json!({
            "mediana": i.median,
            "interpretacion": i.level.wire_label(),
            "nivel": i.level.code(),
            "descripcion": i.description,
            "muestras_validas": i.valid_samples,
        }),
        ParameterOutcome::NoData => json!({
            "mensaje": NO_VALID_DATA_MESSAGE,
            "mediana": null,
        }),
        ParameterOutcome::Failed(reason) => json!({
            "error": format!("No se pudo interpretar: {}", reason),
            "mediana": null,
        }),
    }
}

fn statistics_leaf(outcome: &ParameterOutcome<StatisticsSummary>) -> Value {
    match outcome {
        ParameterOutcome::Computed(s) => json!(s),
        ParameterOutcome::NoData => json!({ "mensaje": NO_VALID_STATS_MESSAGE }),
        ParameterOutcome::Failed(reason) => json!({
            "error": format!("No se pudieron calcular estadísticas: {}", reason),
        }),
    }
}
