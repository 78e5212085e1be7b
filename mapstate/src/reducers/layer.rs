use std::sync::Arc;

use mapstate_types::{Collection, LayerOverride};

use super::{upserted, ReducerResult};
use crate::action::{
    ActiveFeatureChange, MapLayerAdd, MapLayerChange, MapLayerRef, RenderingLayerActiveChange,
};
use crate::error::StateError;
use crate::state::AppSharedState;

/// Replaces the override of `layer_key` in the map `map_key` with the result of `f`.
///
/// Fails if the map does not exist. A layer missing from the map is tolerated: the map gets a
/// content-equal layer list.
fn update_map_layer<F>(
    state: &Arc<AppSharedState>,
    map_key: &str,
    layer_key: &str,
    operation: &'static str,
    f: F,
) -> ReducerResult
where
    F: Fn(&LayerOverride) -> LayerOverride,
{
    let maps = state
        .maps
        .with_updated(map_key, |map| {
            let rendering_layers = map
                .rendering_layers
                .with_mapped(|layer| (layer.key == layer_key).then(|| f(layer)));
            map.with_rendering_layers(rendering_layers)
        })
        .ok_or_else(|| StateError::MapNotFound {
            key: map_key.to_string(),
            operation,
        })?;

    Ok(Arc::new(AppSharedState {
        maps,
        ..(**state).clone()
    }))
}

pub(crate) fn layer_active_change(
    state: &Arc<AppSharedState>,
    payload: MapLayerChange<bool>,
) -> ReducerResult {
    update_map_layer(
        state,
        &payload.map_key,
        &payload.layer_key,
        "map layer active change",
        |layer| LayerOverride {
            is_active: Some(payload.value),
            ..layer.clone()
        },
    )
}

pub(crate) fn layer_opacity_change(
    state: &Arc<AppSharedState>,
    payload: MapLayerChange<f64>,
) -> ReducerResult {
    update_map_layer(
        state,
        &payload.map_key,
        &payload.layer_key,
        "map layer opacity change",
        |layer| LayerOverride {
            opacity: Some(payload.value),
            ..layer.clone()
        },
    )
}

pub(crate) fn layer_interactivity_change(
    state: &Arc<AppSharedState>,
    payload: MapLayerChange<bool>,
) -> ReducerResult {
    update_map_layer(
        state,
        &payload.map_key,
        &payload.layer_key,
        "map layer interactivity change",
        |layer| LayerOverride {
            is_interactive: Some(payload.value),
            ..layer.clone()
        },
    )
}

pub(crate) fn active_feature_change(
    state: &Arc<AppSharedState>,
    payload: ActiveFeatureChange,
) -> ReducerResult {
    update_map_layer(
        state,
        &payload.map_key,
        &payload.layer_key,
        "map layer active feature change",
        |layer| LayerOverride {
            active_feature_key: payload.feature_key.clone(),
            ..layer.clone()
        },
    )
}

/// Adds a layer override to a map.
///
/// With an in-bounds `index` the override at that position is replaced (no shifting) and any other
/// override with the same key is dropped. Otherwise an override with the same key is replaced in
/// place, or the layer is appended.
///
/// Selections referenced only by the dropped overrides are removed.
pub(crate) fn layer_add(state: &Arc<AppSharedState>, payload: MapLayerAdd) -> ReducerResult {
    const OPERATION: &str = "map layer add";
    let MapLayerAdd {
        map_key,
        layer,
        index,
    } = payload;

    let map = state
        .maps
        .get(&map_key)
        .ok_or_else(|| StateError::MapNotFound {
            key: map_key.clone(),
            operation: OPERATION,
        })?;

    let current = &map.rendering_layers;
    let rendering_layers = match index.filter(|index| *index < current.len()) {
        Some(index) => {
            let layer = Arc::new(layer);
            Collection::from_shared(current.iter().enumerate().filter_map(|(i, item)| {
                if i == index {
                    Some(layer.clone())
                } else if item.key == layer.key {
                    None
                } else {
                    Some(item.clone())
                }
            }))
        }
        None => upserted(current, layer),
    };

    let dropped_selections: Vec<String> = current
        .iter()
        .filter(|old| !rendering_layers.iter().any(|new| Arc::ptr_eq(old, new)))
        .filter_map(|old| old.selection_key.clone())
        .filter(|key| {
            !rendering_layers
                .iter()
                .any(|layer| layer.selection_key.as_deref() == Some(key.as_str()))
        })
        .collect();

    let maps = state
        .maps
        .with_updated(&map_key, |map| map.with_rendering_layers(rendering_layers))
        .unwrap_or_else(|| state.maps.clone());

    let selections = if dropped_selections.is_empty() {
        state.selections.clone()
    } else {
        log::debug!(
            "Removing selections {dropped_selections:?} of replaced layers in map {map_key}"
        );
        state.selections.without_keys(&dropped_selections)
    };

    Ok(Arc::new(AppSharedState {
        maps,
        selections,
        ..(**state).clone()
    }))
}

/// Removes a layer override from a map. If the override references a selection, the selection is
/// removed too.
pub(crate) fn layer_remove(state: &Arc<AppSharedState>, payload: MapLayerRef) -> ReducerResult {
    const OPERATION: &str = "map layer remove";
    let MapLayerRef { map_key, layer_key } = payload;

    let map = state
        .maps
        .get(&map_key)
        .ok_or_else(|| StateError::MapNotFound {
            key: map_key.clone(),
            operation: OPERATION,
        })?;

    let selection_key = map
        .rendering_layers
        .get(&layer_key)
        .and_then(|layer| layer.selection_key.clone());

    let maps = state
        .maps
        .with_updated(&map_key, |map| {
            map.with_rendering_layers(map.rendering_layers.without_keys(&[&layer_key]))
        })
        .unwrap_or_else(|| state.maps.clone());

    let selections = match selection_key {
        Some(key) => {
            log::debug!("Removing selection {key} of removed layer {layer_key}");
            state.selections.without_keys(&[key])
        }
        None => state.selections.clone(),
    };

    Ok(Arc::new(AppSharedState {
        maps,
        selections,
        ..(**state).clone()
    }))
}

/// Sets default visibility of a catalog layer.
pub(crate) fn rendering_layer_active_change(
    state: &Arc<AppSharedState>,
    payload: RenderingLayerActiveChange,
) -> ReducerResult {
    let RenderingLayerActiveChange { key, is_active } = payload;

    let rendering_layers = state
        .rendering_layers
        .with_updated(&key, |layer| layer.clone().with_active(is_active))
        .ok_or_else(|| StateError::RenderingLayerNotFound {
            key: key.clone(),
            operation: "rendering layer active change",
        })?;

    Ok(Arc::new(AppSharedState {
        rendering_layers,
        ..(**state).clone()
    }))
}
