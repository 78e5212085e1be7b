use std::sync::Arc;

use mapstate_types::{Collection, Selection, SingleMap};

use super::{ReducerContext, ReducerResult};
use crate::action::FeatureSelectionChange;
use crate::error::StateError;
use crate::helpers::{
    ensure_selection_key, existing_selection_key, new_selection, with_feature_added,
    with_feature_removed, with_only_feature, SelectionKey,
};
use crate::state::AppSharedState;

/// Makes the feature the only selected feature of the layer.
pub(crate) fn set_feature_key(
    state: &Arc<AppSharedState>,
    payload: FeatureSelectionChange,
    ctx: &ReducerContext,
) -> ReducerResult {
    let FeatureSelectionChange {
        map_key,
        layer_key,
        feature_key,
        style,
    } = payload;

    let resolved = ensure_selection_key(
        state,
        &map_key,
        &layer_key,
        ctx.ids,
        "map layer set feature key",
    )?;

    let selection = match state.selections.get(&resolved.key) {
        Some(existing) => {
            let selection = with_only_feature(existing, feature_key);
            match &style {
                Some(style) => selection.styled(style),
                None => selection,
            }
        }
        None => new_selection(resolved.key.clone(), feature_key, ctx.config, style.as_ref()),
    };

    Ok(with_selection(state, resolved, selection))
}

/// Appends the feature to the selection of the layer.
pub(crate) fn add_feature_key(
    state: &Arc<AppSharedState>,
    payload: FeatureSelectionChange,
    ctx: &ReducerContext,
) -> ReducerResult {
    let FeatureSelectionChange {
        map_key,
        layer_key,
        feature_key,
        style,
    } = payload;

    let resolved = ensure_selection_key(
        state,
        &map_key,
        &layer_key,
        ctx.ids,
        "map layer add feature key",
    )?;

    let selection = match state.selections.get(&resolved.key) {
        Some(existing) => {
            // Style is applied first so that `distinct_items` of the call decides the slot.
            let existing = match &style {
                Some(style) => Arc::new(existing.styled(style)),
                None => existing.clone(),
            };
            with_feature_added(&existing, feature_key).unwrap_or_else(|| (*existing).clone())
        }
        None => new_selection(resolved.key.clone(), feature_key, ctx.config, style.as_ref()),
    };

    Ok(with_selection(state, resolved, selection))
}

/// Removes the feature from the selection of the layer.
///
/// Fails only if the map does not exist. If the layer has no selection or the feature is not
/// selected, the state is returned as is.
pub(crate) fn remove_feature_key(
    state: &Arc<AppSharedState>,
    payload: FeatureSelectionChange,
) -> ReducerResult {
    let FeatureSelectionChange {
        map_key,
        layer_key,
        feature_key,
        ..
    } = payload;

    if !state.maps.contains_key(&map_key) {
        return Err(StateError::MapNotFound {
            key: map_key,
            operation: "map layer remove feature key",
        });
    }

    let Some(selection_key) = existing_selection_key(state, &map_key, &layer_key) else {
        log::trace!("Layer {layer_key} of map {map_key} has no selection");
        return Ok(state.clone());
    };

    let Some(selection) = state
        .selections
        .get(&selection_key)
        .and_then(|selection| with_feature_removed(selection, &feature_key))
    else {
        log::trace!("Feature {feature_key} is not selected in {selection_key}");
        return Ok(state.clone());
    };

    Ok(with_selection(
        state,
        SelectionKey {
            key: selection_key,
            maps: None,
        },
        selection,
    ))
}

/// Puts the selection into the state, together with the maps that received a newly minted
/// selection key. Returns the input state if nothing changed.
fn with_selection(
    state: &Arc<AppSharedState>,
    resolved: SelectionKey,
    selection: Selection,
) -> Arc<AppSharedState> {
    let SelectionKey { key, maps } = resolved;

    if maps.is_none()
        && state
            .selections
            .get(&key)
            .is_some_and(|current| **current == selection)
    {
        return state.clone();
    }

    let selections = match state.selections.position(&key) {
        Some(index) => state
            .selections
            .with_replaced_at(index, selection)
            .unwrap_or_else(|| state.selections.clone()),
        None => state.selections.with_pushed(selection),
    };

    let maps: Collection<SingleMap> = maps.unwrap_or_else(|| state.maps.clone());

    Arc::new(AppSharedState {
        maps,
        selections,
        ..(**state).clone()
    })
}
