use serde::{Deserialize, Serialize};

use crate::collection::{Collection, Keyed};
use crate::layer::LayerOverride;
use crate::view::{MapView, ViewPatch};

/// One independent map view instance.
///
/// `rendering_layers` is the list of per-map overrides of the rendering layer catalog. The order of
/// the list is the drawing order of the map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleMap {
    /// Unique key of the map.
    pub key: String,
    /// Current view of the map.
    #[serde(default)]
    pub view: MapView,
    /// Layer overrides of the map.
    #[serde(default)]
    pub rendering_layers: Collection<LayerOverride>,
}

impl SingleMap {
    /// Creates a new map without layers.
    pub fn new(key: impl Into<String>, view: MapView) -> Self {
        Self {
            key: key.into(),
            view,
            rendering_layers: Collection::default(),
        }
    }

    /// Sets the layer overrides of the map.
    pub fn with_layers(mut self, layers: impl IntoIterator<Item = LayerOverride>) -> Self {
        self.rendering_layers = layers.into_iter().collect();
        self
    }

    /// Returns a copy of the map with the given view.
    pub fn with_view(&self, view: MapView) -> Self {
        Self {
            key: self.key.clone(),
            view,
            rendering_layers: self.rendering_layers.clone(),
        }
    }

    /// Returns a copy of the map with the given layer overrides.
    pub fn with_rendering_layers(&self, rendering_layers: Collection<LayerOverride>) -> Self {
        Self {
            key: self.key.clone(),
            view: self.view,
            rendering_layers,
        }
    }
}

impl Keyed for SingleMap {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Which view axes are kept in lock-step between members of a map set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSetSync {
    /// Zoom level is synchronized.
    #[serde(default)]
    pub zoom: bool,
    /// Center (both latitude and longitude) is synchronized.
    #[serde(default)]
    pub center: bool,
}

impl MapSetSync {
    /// Returns a copy of the flags with the values present in `patch` overwritten.
    pub fn patched(&self, patch: &MapSetSyncPatch) -> Self {
        Self {
            zoom: patch.zoom.unwrap_or(self.zoom),
            center: patch.center.unwrap_or(self.center),
        }
    }
}

/// Change request for [`MapSetSync`] flags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSetSyncPatch {
    /// New value of the zoom flag.
    #[serde(default)]
    pub zoom: Option<bool>,
    /// New value of the center flag.
    #[serde(default)]
    pub center: Option<bool>,
}

/// Presentation hint of a map set. The state engine does not interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapSetMode {
    /// Maps are stacked on top of each other with a slider between them.
    Slider,
    /// Maps are laid out in a grid.
    Grid,
}

/// Synchronization group of maps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSet {
    /// Unique key of the map set.
    pub key: String,
    /// Keys of the member maps.
    #[serde(default)]
    pub maps: Vec<String>,
    /// Synchronized view axes.
    #[serde(default)]
    pub sync: MapSetSync,
    /// Canonical values of the synchronized view axes.
    #[serde(default)]
    pub view: ViewPatch,
    /// Presentation hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<MapSetMode>,
}

impl MapSet {
    /// Creates a new map set.
    pub fn new(key: impl Into<String>, maps: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            key: key.into(),
            maps: maps.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Sets synchronization flags.
    pub fn with_sync(mut self, sync: MapSetSync) -> Self {
        self.sync = sync;
        self
    }

    /// Sets the canonical view.
    pub fn with_view(mut self, view: ViewPatch) -> Self {
        self.view = view;
        self
    }

    /// Returns true if the map with the given key is a member of the set.
    pub fn contains_map(&self, map_key: &str) -> bool {
        self.maps.iter().any(|key| key == map_key)
    }
}

impl Keyed for MapSet {
    fn key(&self) -> &str {
        &self.key
    }
}
