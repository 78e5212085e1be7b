//! Read-only metadata catalogs.
//!
//! Catalog entries are linked to each other through the `neighbours` list, which holds keys of
//! adjacent entries of any catalog. For example a datasource lists the layer it belongs to, and the
//! layer lists its style, place and period.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::Keyed;

/// Entry of a metadata catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogEntry<D> {
    /// Unique key of the entry.
    pub key: String,
    /// Entry payload.
    pub data: D,
    /// Keys of adjacent entries of other catalogs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neighbours: Vec<String>,
}

impl<D> CatalogEntry<D> {
    /// Creates a new entry without neighbours.
    pub fn new(key: impl Into<String>, data: D) -> Self {
        Self {
            key: key.into(),
            data,
            neighbours: vec![],
        }
    }

    /// Sets the neighbours of the entry.
    pub fn with_neighbours(
        mut self,
        neighbours: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.neighbours = neighbours.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if an entry with the given key is adjacent to this one.
    pub fn is_neighbour(&self, key: &str) -> bool {
        self.neighbours.iter().any(|n| n == key)
    }
}

impl<D> Keyed for CatalogEntry<D> {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Backing data description of a rendering layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceData {
    /// Format of the source, e.g. `wms`, `wmts`, `vector`, `cog`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Source URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_display: Option<String>,
    /// Format specific options.
    #[serde(default)]
    pub configuration: Map<String, Value>,
}

/// Payload of a layer metadata entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerData {
    /// Display name.
    #[serde(default)]
    pub name_display: String,
    /// Internal name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_internal: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload of a place metadata entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceData {
    /// Display name.
    #[serde(default)]
    pub name_display: String,
    /// Bounding box as `[min_lon, min_lat, max_lon, max_lat]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
    /// Geometry in GeoJSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Value>,
}

/// Payload of a period metadata entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodData {
    /// Display name.
    #[serde(default)]
    pub name_display: String,
    /// Start of the period (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// End of the period (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Payload of a style metadata entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleData {
    /// Display name.
    #[serde(default)]
    pub name_display: String,
    /// Style configuration. Overrides datasource configuration on conflicting keys.
    #[serde(default)]
    pub definition: Map<String, Value>,
}

/// Datasource catalog entry.
pub type Datasource = CatalogEntry<DatasourceData>;
/// Layer metadata catalog entry.
pub type LayerMetadata = CatalogEntry<LayerData>;
/// Place metadata catalog entry.
pub type PlaceMetadata = CatalogEntry<PlaceData>;
/// Period metadata catalog entry.
pub type PeriodMetadata = CatalogEntry<PeriodData>;
/// Style metadata catalog entry.
pub type StyleMetadata = CatalogEntry<StyleData>;
