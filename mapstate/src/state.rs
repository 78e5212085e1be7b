use std::sync::Arc;

use mapstate_types::{
    ApplicationNode, Collection, LayerMetadata, MapSet, PeriodMetadata, PlaceMetadata,
    RenderingLayer, Selection, SingleMap, StyleMetadata,
};
use serde::{Deserialize, Serialize};

/// Aggregate root of the application state.
///
/// A state snapshot is never modified. Reducers produce a new snapshot that shares every untouched
/// collection and record with the previous one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSharedState {
    /// Application descriptor.
    #[serde(default)]
    pub app_node: Option<Arc<ApplicationNode>>,
    /// Layer metadata catalog.
    #[serde(default)]
    pub layers: Collection<LayerMetadata>,
    /// Place metadata catalog.
    #[serde(default)]
    pub places: Collection<PlaceMetadata>,
    /// Period metadata catalog.
    #[serde(default)]
    pub periods: Collection<PeriodMetadata>,
    /// Style metadata catalog.
    #[serde(default)]
    pub styles: Collection<StyleMetadata>,
    /// Rendering layer catalog.
    #[serde(default)]
    pub rendering_layers: Collection<RenderingLayer>,
    /// Map sets.
    #[serde(default)]
    pub map_sets: Collection<MapSet>,
    /// Maps.
    #[serde(default)]
    pub maps: Collection<SingleMap>,
    /// Feature selections.
    #[serde(default)]
    pub selections: Collection<Selection>,
}

impl AppSharedState {
    /// Wraps the state into a shared snapshot.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
