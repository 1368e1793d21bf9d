//! Qualitative interpretation of soil readings.
//!
//! Band tests run in a fixed priority order, so a value sitting on a shared
//! boundary resolves to the first band that accepts it:
//! 1. no reference range  -> SinReferencia
//! 2. value <= low.max    -> Bajo
//! 3. value >= high.min   -> Alto
//! 4. mid.min..=mid.max   -> Medio
//! 5. anything else       -> FueraDeRango (gap between bands)

use crate::parameters::SoilParameter;
use crate::reference_table::{ParameterRange, ReferenceTable};
use std::fmt;

pub const NO_REFERENCE_DESCRIPTION: &str = "Parámetro sin valores de referencia definidos";
pub const OUT_OF_RANGE_DESCRIPTION: &str = "Valor no se encuentra en los rangos definidos";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Bajo,
    Medio,
    Alto,
    FueraDeRango,
    SinReferencia,
}

impl Level {
    /// Upper-case label, e.g. `FUERA_DE_RANGO`.
    pub fn label(self) -> &'static str {
        match self {
            Level::Bajo => "BAJO",
            Level::Medio => "MEDIO",
            Level::Alto => "ALTO",
            Level::FueraDeRango => "FUERA_DE_RANGO",
            Level::SinReferencia => "SIN_REFERENCIA",
        }
    }

    /// Label sent in the `interpretacion` field of API payloads.
    pub fn wire_label(self) -> &'static str {
        match self {
            Level::Bajo => "BAJO",
            Level::Medio => "MEDIO",
            Level::Alto => "ALTO",
            Level::FueraDeRango => "FUERA DE RANGO",
            Level::SinReferencia => "No hay referencia disponible",
        }
    }

    /// Lower-case code used in API payloads.
    pub fn code(self) -> &'static str {
        match self {
            Level::Bajo => "bajo",
            Level::Medio => "medio",
            Level::Alto => "alto",
            Level::FueraDeRango => "fuera_rango",
            Level::SinReferencia => "sin_referencia",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub value: f64,
    pub level: Level,
    pub description: &'static str,
}

/// Classifies values against a reference table.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    table: &'a ReferenceTable,
}

impl<'a> Classifier<'a> {
    pub fn new(table: &'a ReferenceTable) -> Self {
        Self { table }
    }

    pub fn classify(&self, parameter: SoilParameter, value: f64) -> ClassificationResult {
        match self.table.lookup(parameter) {
            Some(range) => classify_in_range(range, value),
            None => no_reference(value),
        }
    }

    /// Classify by dataset column. Columns outside the interpretable set
    /// come back as `SinReferencia`.
    pub fn classify_column(&self, column: &str, value: f64) -> ClassificationResult {
        match self.table.lookup_column(column) {
            Some(range) => classify_in_range(range, value),
            None => no_reference(value),
        }
    }
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::new(ReferenceTable::standard())
    }
}

fn no_reference(value: f64) -> ClassificationResult {
    ClassificationResult {
        value,
        level: Level::SinReferencia,
        description: NO_REFERENCE_DESCRIPTION,
    }
}

/// Apply the band priority order to a single range.
pub fn classify_in_range(range: &ParameterRange, value: f64) -> ClassificationResult {
    if let Some(low) = range.low {
        if value <= low.max {
            return ClassificationResult { value, level: Level::Bajo, description: low.description };
        }
    }

    if let Some(high) = range.high {
        if value >= high.min {
            return ClassificationResult { value, level: Level::Alto, description: high.description };
        }
    }

    if let Some(mid) = range.mid {
        if mid.min <= value && value <= mid.max {
            return ClassificationResult { value, level: Level::Medio, description: mid.description };
        }
    }

    ClassificationResult {
        value,
        level: Level::FueraDeRango,
        description: OUT_OF_RANGE_DESCRIPTION,
    }
}
