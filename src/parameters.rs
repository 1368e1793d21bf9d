//! Soil parameter catalog
//!
//! Column names follow the validated analyses table
//! (`analisis_quimicos_validados`).

use std::fmt;

/// Column holding the municipality id.
pub const GROUP_ID_COLUMN: &str = "municipio_id_FK";

/// Column holding the municipality name.
pub const GROUP_NAME_COLUMN: &str = "municipio";

/// The 14 parameters with agronomic reference ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SoilParameter {
    Ph,
    OrganicMatter,
    InorganicNitrogen,
    Phosphorus,
    Potassium,
    Magnesium,
    Calcium,
    Sulfur,
    Iron,
    Copper,
    Zinc,
    Manganese,
    Boron,
    /// Cation-exchange capacity (CIC)
    Cec,
}

impl SoilParameter {
    /// Interpretation order used by reports.
    pub const ALL: [SoilParameter; 14] = [
        SoilParameter::Ph,
        SoilParameter::OrganicMatter,
        SoilParameter::InorganicNitrogen,
        SoilParameter::Phosphorus,
        SoilParameter::Potassium,
        SoilParameter::Magnesium,
        SoilParameter::Calcium,
        SoilParameter::Sulfur,
        SoilParameter::Iron,
        SoilParameter::Copper,
        SoilParameter::Zinc,
        SoilParameter::Manganese,
        SoilParameter::Boron,
        SoilParameter::Cec,
    ];

    /// Dataset column for this parameter.
    pub fn column(self) -> &'static str {
        match self {
            SoilParameter::Ph => "ph",
            SoilParameter::OrganicMatter => "mo",
            SoilParameter::InorganicNitrogen => "n_inorganico",
            SoilParameter::Phosphorus => "fosforo",
            SoilParameter::Potassium => "k",
            SoilParameter::Magnesium => "mg",
            SoilParameter::Calcium => "ca",
            SoilParameter::Sulfur => "azufre",
            SoilParameter::Iron => "hierro",
            SoilParameter::Copper => "cobre",
            SoilParameter::Zinc => "zinc",
            SoilParameter::Manganese => "manganeso",
            SoilParameter::Boron => "boro",
            SoilParameter::Cec => "cic",
        }
    }

    /// Reverse of [`SoilParameter::column`]. `None` for columns without a
    /// reference range (e.g. `arcilla`, `ca_mg`).
    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.column() == column)
    }
}

impl fmt::Display for SoilParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Physicochemical columns covered by the statistics report, in output order.
pub const STATISTICS_COLUMNS: [&str; 27] = [
    "arcilla", "limo", "arena", "da", "ph", "mo", "fosforo",
    "n_inorganico", "k", "mg", "ca", "na", "al", "cic",
    "cic_calculada", "h", "azufre", "hierro", "cobre",
    "zinc", "manganeso", "boro", "ca_mg", "mg_k", "ca_k",
    "ca_mg_k", "k_mg",
];

/// Columns fetched for the interpretation report.
pub fn interpretation_columns() -> Vec<&'static str> {
    SoilParameter::ALL.iter().map(|p| p.column()).collect()
}
