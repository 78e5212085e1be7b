use mapstate_types::{Collection, SingleMap};

use crate::error::StateError;
use crate::id::IdSource;
use crate::state::AppSharedState;

/// Selection key of a map layer.
#[derive(Debug)]
pub(crate) struct SelectionKey {
    /// The key.
    pub key: String,
    /// New map list if the key was minted and written into the layer override.
    pub maps: Option<Collection<SingleMap>>,
}

/// Returns the selection key of the layer in the map, without minting one.
///
/// The key of the map's layer override wins over the key of the catalog layer.
pub(crate) fn existing_selection_key(
    state: &AppSharedState,
    map_key: &str,
    layer_key: &str,
) -> Option<String> {
    let layer_override = state.maps.get(map_key)?.rendering_layers.get(layer_key)?;
    layer_override.selection_key.clone().or_else(|| {
        state
            .rendering_layers
            .get(layer_key)
            .and_then(|layer| layer.selection_key.clone())
    })
}

/// Returns the selection key of the layer in the map. If the layer has none yet, a new key is
/// minted and written into the map's layer override.
pub(crate) fn ensure_selection_key(
    state: &AppSharedState,
    map_key: &str,
    layer_key: &str,
    ids: &dyn IdSource,
    operation: &'static str,
) -> Result<SelectionKey, StateError> {
    let map = state.maps.get(map_key).ok_or_else(|| StateError::MapNotFound {
        key: map_key.to_string(),
        operation,
    })?;

    if !map.rendering_layers.contains_key(layer_key) {
        return Err(StateError::MapLayerNotFound {
            map_key: map_key.to_string(),
            layer_key: layer_key.to_string(),
            operation,
        });
    }

    if let Some(key) = existing_selection_key(state, map_key, layer_key) {
        return Ok(SelectionKey { key, maps: None });
    }

    let key = ids.mint_id();
    log::debug!("Minted selection key {key} for layer {layer_key} of map {map_key}");

    let maps = state.maps.with_updated(map_key, |map| {
        let rendering_layers = map
            .rendering_layers
            .with_updated(layer_key, |layer| {
                let mut layer = layer.clone();
                layer.selection_key = Some(key.clone());
                layer
            })
            .unwrap_or_else(|| map.rendering_layers.clone());
        map.with_rendering_layers(rendering_layers)
    });

    Ok(SelectionKey { key, maps })
}
