//! Actions describe state transitions. See [`Action`].

use std::sync::Arc;

use mapstate_types::{
    ApplicationNode, Datasource, FeatureKey, LayerMetadata, LayerOverride, MapSet, MapSetMode,
    MapSetSyncPatch, PeriodMetadata, PlaceMetadata, RenderingLayer, SelectionStyle, SingleMap,
    StyleMetadata, ViewPatch,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StateError;

/// Change of the view of one map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewChange {
    /// Key of the map.
    pub key: String,
    /// Changed view fields.
    pub view_change: ViewPatch,
}

/// Change of the canonical view of a map set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSetViewChange {
    /// Key of the map set.
    pub key: String,
    /// Changed view fields.
    pub view_change: ViewPatch,
}

/// Change of one field of a layer override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayerChange<T> {
    /// Key of the map.
    pub map_key: String,
    /// Key of the layer.
    pub layer_key: String,
    /// New value.
    pub value: T,
}

/// Addition of a layer override to a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayerAdd {
    /// Key of the map.
    pub map_key: String,
    /// Added layer.
    pub layer: LayerOverride,
    /// Position to put the layer at. The layer at this position is replaced. If not set or out of
    /// bounds, the layer is appended.
    #[serde(default)]
    pub index: Option<usize>,
}

/// Reference to a layer of a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayerRef {
    /// Key of the map.
    pub map_key: String,
    /// Key of the layer.
    pub layer_key: String,
}

/// Change of a feature selection of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSelectionChange {
    /// Key of the map.
    pub map_key: String,
    /// Key of the layer.
    pub layer_key: String,
    /// Feature to select or deselect.
    pub feature_key: FeatureKey,
    /// Style overrides of the selection.
    #[serde(default)]
    pub style: Option<SelectionStyle>,
}

/// Change of the highlighted feature of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFeatureChange {
    /// Key of the map.
    pub map_key: String,
    /// Key of the layer.
    pub layer_key: String,
    /// Highlighted feature. `None` clears the highlight.
    #[serde(default)]
    pub feature_key: Option<FeatureKey>,
}

/// Change of the default visibility of a catalog layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderingLayerActiveChange {
    /// Key of the catalog layer.
    pub key: String,
    /// New visibility.
    pub is_active: bool,
}

/// Addition of a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapAdd {
    /// Added map.
    pub map: SingleMap,
    /// Map set the map is added to.
    #[serde(default)]
    pub map_set_key: Option<String>,
}

/// Reference to a map of a map set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSetMember {
    /// Key of the map set.
    pub map_set_key: String,
    /// Key of the map.
    pub map_key: String,
}

/// Change of map set sync flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSetSyncChange {
    /// Key of the map set.
    pub key: String,
    /// Changed flags.
    pub sync: MapSetSyncPatch,
}

/// Change of map set presentation mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSetModeChange {
    /// Key of the map set.
    pub key: String,
    /// New mode. `None` clears the mode.
    #[serde(default)]
    pub mode: Option<MapSetMode>,
}

/// Batch of externally supplied records merged into the state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStateUpdate {
    /// Maps.
    #[serde(default)]
    pub maps: Option<Vec<SingleMap>>,
    /// Map sets.
    #[serde(default)]
    pub map_sets: Option<Vec<MapSet>>,
    /// Rendering layers.
    #[serde(default)]
    pub rendering_layers: Option<Vec<RenderingLayer>>,
}

/// State transition request.
///
/// Every variant is handled by exactly one reducer, see [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Changes the view of a map and propagates synced fields to its map set.
    MapViewChange(MapViewChange),
    /// Sets visibility of a layer in a map.
    MapLayerActiveChange(MapLayerChange<bool>),
    /// Sets opacity of a layer in a map.
    MapLayerOpacityChange(MapLayerChange<f64>),
    /// Sets interactivity of a layer in a map.
    MapLayerInteractivityChange(MapLayerChange<bool>),
    /// Adds a layer to a map.
    MapLayerAdd(MapLayerAdd),
    /// Removes a layer from a map together with its selection.
    MapLayerRemove(MapLayerRef),
    /// Sets default visibility of a catalog layer.
    RenderingLayerActiveChange(RenderingLayerActiveChange),
    /// Makes the feature the only selected feature of a layer.
    MapLayerSetFeatureKey(FeatureSelectionChange),
    /// Adds the feature to the selection of a layer.
    MapLayerAddFeatureKey(FeatureSelectionChange),
    /// Removes the feature from the selection of a layer.
    MapLayerRemoveFeatureKey(FeatureSelectionChange),
    /// Sets or clears the highlighted feature of a layer.
    MapLayerActiveFeatureChange(ActiveFeatureChange),
    /// Adds a map set.
    MapSetAdd(MapSet),
    /// Removes a map set.
    MapSetRemove(String),
    /// Adds a map.
    MapAdd(MapAdd),
    /// Removes a map from a map set.
    MapSetRemoveMap(MapSetMember),
    /// Adds a map to a map set.
    MapSetAddMap(MapSetMember),
    /// Removes maps.
    MapsRemove(Vec<String>),
    /// Changes the canonical view of a map set and propagates synced fields to its maps.
    MapSetViewChange(MapSetViewChange),
    /// Changes sync flags of a map set.
    MapSetSyncChange(MapSetSyncChange),
    /// Changes the presentation mode of a map set.
    MapSetModeChange(MapSetModeChange),
    /// Merges batches of records into the state.
    GlobalStateUpdate(GlobalStateUpdate),
    /// Parses datasource records into catalog layers.
    FetchSources(Vec<Datasource>),
    /// Replaces the application node.
    AppNodeUpdate(Arc<ApplicationNode>),
    /// Merges layer metadata into the catalog.
    FetchLayers(Vec<LayerMetadata>),
    /// Merges place metadata into the catalog.
    FetchPlaces(Vec<PlaceMetadata>),
    /// Merges period metadata into the catalog.
    FetchPeriods(Vec<PeriodMetadata>),
    /// Merges style metadata into the catalog.
    FetchStyles(Vec<StyleMetadata>),
}

impl Action {
    /// Human-readable name of the action. Used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Action::MapViewChange(_) => "map view change",
            Action::MapLayerActiveChange(_) => "map layer active change",
            Action::MapLayerOpacityChange(_) => "map layer opacity change",
            Action::MapLayerInteractivityChange(_) => "map layer interactivity change",
            Action::MapLayerAdd(_) => "map layer add",
            Action::MapLayerRemove(_) => "map layer remove",
            Action::RenderingLayerActiveChange(_) => "rendering layer active change",
            Action::MapLayerSetFeatureKey(_) => "map layer set feature key",
            Action::MapLayerAddFeatureKey(_) => "map layer add feature key",
            Action::MapLayerRemoveFeatureKey(_) => "map layer remove feature key",
            Action::MapLayerActiveFeatureChange(_) => "map layer active feature change",
            Action::MapSetAdd(_) => "map set add",
            Action::MapSetRemove(_) => "map set remove",
            Action::MapAdd(_) => "map add",
            Action::MapSetRemoveMap(_) => "map set remove map",
            Action::MapSetAddMap(_) => "map set add map",
            Action::MapsRemove(_) => "maps remove",
            Action::MapSetViewChange(_) => "map set view change",
            Action::MapSetSyncChange(_) => "map set sync change",
            Action::MapSetModeChange(_) => "map set mode change",
            Action::GlobalStateUpdate(_) => "global state update",
            Action::FetchSources(_) => "fetch sources",
            Action::AppNodeUpdate(_) => "app node update",
            Action::FetchLayers(_) => "fetch layers",
            Action::FetchPlaces(_) => "fetch places",
            Action::FetchPeriods(_) => "fetch periods",
            Action::FetchStyles(_) => "fetch styles",
        }
    }
}

/// Action in its wire form: `{"type": "...", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    /// Action tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Action payload.
    #[serde(default)]
    pub payload: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivePayload {
    map_key: String,
    layer_key: String,
    is_active: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpacityPayload {
    map_key: String,
    layer_key: String,
    opacity: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InteractivityPayload {
    map_key: String,
    layer_key: String,
    is_interactive: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapSetPayload {
    map_set: MapSet,
}

#[derive(Deserialize)]
struct KeyPayload {
    key: String,
}

#[derive(Deserialize)]
struct KeysPayload {
    keys: Vec<String>,
}

#[derive(Deserialize)]
struct RecordsPayload {
    records: Vec<Datasource>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppNodePayload {
    app_node: ApplicationNode,
}

#[derive(Deserialize)]
struct ItemsPayload<T> {
    items: Vec<T>,
}

fn payload<T: DeserializeOwned>(
    payload: Option<Value>,
    action: &'static str,
) -> Result<T, StateError> {
    let value = match payload {
        None | Some(Value::Null) => return Err(StateError::MissingPayload(action)),
        Some(value) => value,
    };

    serde_json::from_value(value).map_err(|source| StateError::InvalidPayload { action, source })
}

impl TryFrom<RawAction> for Action {
    type Error = StateError;

    fn try_from(value: RawAction) -> Result<Self, Self::Error> {
        let RawAction { kind, payload: p } = value;
        let action = match kind.as_str() {
            "MAP_VIEW_CHANGE" => Action::MapViewChange(payload(p, "map view change")?),
            "MAP_LAYER_ACTIVE_CHANGE" => {
                let v: ActivePayload = payload(p, "map layer active change")?;
                Action::MapLayerActiveChange(MapLayerChange {
                    map_key: v.map_key,
                    layer_key: v.layer_key,
                    value: v.is_active,
                })
            }
            "MAP_LAYER_OPACITY_CHANGE" => {
                let v: OpacityPayload = payload(p, "map layer opacity change")?;
                Action::MapLayerOpacityChange(MapLayerChange {
                    map_key: v.map_key,
                    layer_key: v.layer_key,
                    value: v.opacity,
                })
            }
            "MAP_LAYER_INTERACTIVITY_CHANGE" => {
                let v: InteractivityPayload = payload(p, "map layer interactivity change")?;
                Action::MapLayerInteractivityChange(MapLayerChange {
                    map_key: v.map_key,
                    layer_key: v.layer_key,
                    value: v.is_interactive,
                })
            }
            "MAP_LAYER_ADD" => Action::MapLayerAdd(payload(p, "map layer add")?),
            "MAP_LAYER_REMOVE" => Action::MapLayerRemove(payload(p, "map layer remove")?),
            "RENDERING_LAYER_ACTIVE_CHANGE" => {
                Action::RenderingLayerActiveChange(payload(p, "rendering layer active change")?)
            }
            "MAP_LAYER_SET_FEATURE_KEY" => {
                Action::MapLayerSetFeatureKey(payload(p, "map layer set feature key")?)
            }
            "MAP_LAYER_ADD_FEATURE_KEY" => {
                Action::MapLayerAddFeatureKey(payload(p, "map layer add feature key")?)
            }
            "MAP_LAYER_REMOVE_FEATURE_KEY" => {
                Action::MapLayerRemoveFeatureKey(payload(p, "map layer remove feature key")?)
            }
            "MAP_LAYER_ACTIVE_FEATURE_CHANGE" => {
                Action::MapLayerActiveFeatureChange(payload(p, "map layer active feature change")?)
            }
            "MAP_SET_ADD" => {
                let v: MapSetPayload = payload(p, "map set add")?;
                Action::MapSetAdd(v.map_set)
            }
            "MAP_SET_REMOVE" => {
                let v: KeyPayload = payload(p, "map set remove")?;
                Action::MapSetRemove(v.key)
            }
            "MAP_ADD" => Action::MapAdd(payload(p, "map add")?),
            "MAP_SET_REMOVE_MAP" => Action::MapSetRemoveMap(payload(p, "map set remove map")?),
            "MAP_SET_ADD_MAP" => Action::MapSetAddMap(payload(p, "map set add map")?),
            "MAPS_REMOVE" => {
                let v: KeysPayload = payload(p, "maps remove")?;
                Action::MapsRemove(v.keys)
            }
            "MAP_SET_VIEW_CHANGE" => Action::MapSetViewChange(payload(p, "map set view change")?),
            "MAP_SET_SYNC_CHANGE" => Action::MapSetSyncChange(payload(p, "map set sync change")?),
            "MAP_SET_MODE_CHANGE" => Action::MapSetModeChange(payload(p, "map set mode change")?),
            "GLOBAL_STATE_UPDATE" => {
                Action::GlobalStateUpdate(payload(p, "global state update")?)
            }
            "FETCH_SOURCES" => {
                let v: RecordsPayload = payload(p, "fetch sources")?;
                Action::FetchSources(v.records)
            }
            "APP_NODE_UPDATE" => {
                let v: AppNodePayload = payload(p, "app node update")?;
                Action::AppNodeUpdate(Arc::new(v.app_node))
            }
            "FETCH_LAYERS" => {
                let v: ItemsPayload<LayerMetadata> = payload(p, "fetch layers")?;
                Action::FetchLayers(v.items)
            }
            "FETCH_PLACES" => {
                let v: ItemsPayload<PlaceMetadata> = payload(p, "fetch places")?;
                Action::FetchPlaces(v.items)
            }
            "FETCH_PERIODS" => {
                let v: ItemsPayload<PeriodMetadata> = payload(p, "fetch periods")?;
                Action::FetchPeriods(v.items)
            }
            "FETCH_STYLES" => {
                let v: ItemsPayload<StyleMetadata> = payload(p, "fetch styles")?;
                Action::FetchStyles(v.items)
            }
            _ => return Err(StateError::UnknownAction(kind)),
        };

        Ok(action)
    }
}
