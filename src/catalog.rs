//! Municipality catalog with links to both report endpoints.

use crate::data::{DataProvider, GroupIdentity};
use crate::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub identity: GroupIdentity,
    #[serde(rename = "estadisticas_por_id_url")]
    pub statistics_by_id_url: String,
    #[serde(rename = "estadisticas_por_nombre_url")]
    pub statistics_by_name_url: String,
    #[serde(rename = "interpretacion_por_id_url")]
    pub interpretation_by_id_url: String,
    #[serde(rename = "interpretacion_por_nombre_url")]
    pub interpretation_by_name_url: String,
}

impl CatalogEntry {
    pub fn new(identity: GroupIdentity) -> Self {
        let escaped = urlencoding::encode(&identity.name).into_owned();
        Self {
            statistics_by_id_url: format!("/estadisticas/municipio/{}", identity.id),
            statistics_by_name_url: format!("/estadisticas/municipio/nombre/{}", escaped),
            interpretation_by_id_url: format!("/interpretacion/municipio/{}", identity.id),
            interpretation_by_name_url: format!("/interpretacion/municipio/nombre/{}", escaped),
            identity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sort key ignoring case and Spanish diacritics, so "Ábalos" sits next to
/// "Abasolo" instead of after "Zapata".
pub fn collation_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Distinct municipalities ordered by collated name (then exact name, then id).
pub fn build_catalog(provider: &dyn DataProvider) -> Result<Catalog> {
    let mut groups: Vec<(String, GroupIdentity)> = provider
        .list_groups()?
        .into_iter()
        .map(|g| (collation_key(&g.name), g))
        .collect();
    groups.sort_by(|(ka, a), (kb, b)| ka.cmp(kb).then_with(|| a.cmp(b)));
    groups.dedup_by(|(_, a), (_, b)| a == b);

    tracing::debug!("Catalog lists {} municipalities", groups.len());

    Ok(Catalog {
        entries: groups.into_iter().map(|(_, g)| CatalogEntry::new(g)).collect(),
    })
}
