//! Agronomic reference ranges
//!
//! Maps each interpretable soil parameter to its low / medium / high bands.
//! The table is embedded at compile time and never mutated.
//!
//! Band ordering expected by the classifier:
//!   low.max <= mid.min <= mid.max <= high.min
//! Gaps between bands are legal (e.g. inorganic nitrogen 15-16 mg/kg) and
//! classify as out of range.

use crate::parameters::SoilParameter;

/// Values at or below `max` are low.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowBand {
    pub max: f64,
    pub description: &'static str,
}

/// Values within `[min, max]` are medium.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MidBand {
    pub min: f64,
    pub max: f64,
    pub description: &'static str,
}

/// Values at or above `min` are high.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighBand {
    pub min: f64,
    pub description: &'static str,
}

/// Reference bands for one parameter. Any band may be absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub low: Option<LowBand>,
    pub mid: Option<MidBand>,
    pub high: Option<HighBand>,
}

impl ParameterRange {
    const fn full(
        low: (f64, &'static str),
        mid: (f64, f64, &'static str),
        high: (f64, &'static str),
    ) -> Self {
        Self {
            low: Some(LowBand { max: low.0, description: low.1 }),
            mid: Some(MidBand { min: mid.0, max: mid.1, description: mid.2 }),
            high: Some(HighBand { min: high.0, description: high.1 }),
        }
    }

    /// Checks `low.max <= mid.min <= mid.max <= high.min` over the bands
    /// that are present.
    pub fn is_ordered(&self) -> bool {
        let mut bounds = Vec::with_capacity(4);
        if let Some(low) = self.low {
            bounds.push(low.max);
        }
        if let Some(mid) = self.mid {
            bounds.push(mid.min);
            bounds.push(mid.max);
        }
        if let Some(high) = self.high {
            bounds.push(high.min);
        }
        bounds.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Read-only parameter -> range catalog.
#[derive(Debug)]
pub struct ReferenceTable {
    entries: &'static [(SoilParameter, ParameterRange)],
}

// ============================================================================
// EMBEDDED REFERENCE VALUES
// ============================================================================

static STANDARD_ENTRIES: &[(SoilParameter, ParameterRange)] = &[
    (SoilParameter::Ph, ParameterRange::full(
        (5.5, "ácido"), (6.0, 7.0, "óptimo"), (7.5, "alcalino"))),
    (SoilParameter::OrganicMatter, ParameterRange::full(
        (2.0, "< 2%"), (2.0, 4.0, "2-4%"), (4.0, "> 4%"))),
    (SoilParameter::InorganicNitrogen, ParameterRange::full(
        (15.0, "< 15 mg/kg"), (16.0, 29.0, "16-29 mg/kg"), (30.0, "> 30 mg/kg"))),
    (SoilParameter::Phosphorus, ParameterRange::full(
        (20.0, "< 20 mg/kg"), (20.0, 40.0, "20-40 mg/kg"), (40.0, "> 40 mg/kg"))),
    (SoilParameter::Potassium, ParameterRange::full(
        (0.3, "< 0.3 cmol/kg"), (0.3, 0.6, "0.3-0.6 cmol/kg"), (0.6, "> 0.6 cmol/kg"))),
    (SoilParameter::Magnesium, ParameterRange::full(
        (0.2, "< 0.2 cmol/kg"), (0.2, 0.5, "0.2-0.5 cmol/kg"), (0.5, "> 0.5 cmol/kg"))),
    (SoilParameter::Calcium, ParameterRange::full(
        (2.0, "< 2 cmol/kg"), (2.0, 5.0, "2-5 cmol/kg"), (5.0, "> 5 cmol/kg"))),
    (SoilParameter::Sulfur, ParameterRange::full(
        (10.0, "< 10 mg/kg"), (10.0, 20.0, "10-20 mg/kg"), (20.0, "> 20 mg/kg"))),
    (SoilParameter::Iron, ParameterRange::full(
        (10.0, "< 10 mg/kg"), (10.0, 40.0, "10-40 mg/kg"), (40.0, "> 40 mg/kg"))),
    (SoilParameter::Copper, ParameterRange::full(
        (0.5, "< 0.5 mg/kg"), (0.5, 1.0, "0.5-1 mg/kg"), (1.0, "> 1 mg/kg"))),
    (SoilParameter::Zinc, ParameterRange::full(
        (1.0, "< 1 mg/kg"), (1.0, 3.0, "1-3 mg/kg"), (3.0, "> 3 mg/kg"))),
    (SoilParameter::Manganese, ParameterRange::full(
        (5.0, "< 5 mg/kg"), (5.0, 20.0, "5-20 mg/kg"), (20.0, "> 20 mg/kg"))),
    (SoilParameter::Boron, ParameterRange::full(
        (0.5, "< 0.5 mg/kg"), (0.5, 1.0, "0.5-1 mg/kg"), (1.0, "> 1 mg/kg"))),
    (SoilParameter::Cec, ParameterRange::full(
        (10.0, "suelo pobre"), (10.0, 25.0, "normal"), (25.0, "suelo rico"))),
];

/// Process-wide table used by the service.
pub static REFERENCE_TABLE: ReferenceTable = ReferenceTable { entries: STANDARD_ENTRIES };

// ============================================================================
// LOOKUP FUNCTIONS
// ============================================================================

impl ReferenceTable {
    /// Build a table over custom entries (tests, alternative calibrations).
    pub const fn from_entries(entries: &'static [(SoilParameter, ParameterRange)]) -> Self {
        Self { entries }
    }

    /// The embedded table.
    pub fn standard() -> &'static ReferenceTable {
        &REFERENCE_TABLE
    }

    pub fn lookup(&self, parameter: SoilParameter) -> Option<&ParameterRange> {
        self.entries
            .iter()
            .find(|(p, _)| *p == parameter)
            .map(|(_, range)| range)
    }

    /// Lookup by dataset column name.
    pub fn lookup_column(&self, column: &str) -> Option<&ParameterRange> {
        SoilParameter::from_column(column).and_then(|p| self.lookup(p))
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SoilParameter, ParameterRange)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
