use std::sync::Arc;

use mapstate_types::{
    ApplicationNode, Collection, Datasource, Keyed, LayerMetadata, PeriodMetadata,
    PlaceMetadata, StyleMetadata,
};

use super::{ReducerContext, ReducerResult};
use crate::action::GlobalStateUpdate;
use crate::error::StateError;
use crate::state::AppSharedState;

/// Merges batches of maps, map sets and rendering layers into the state.
///
/// Records are merged by key. For every key only the first occurrence in
/// `[existing..., incoming...]` is kept, so an incoming record never replaces a known one.
pub(crate) fn global_state_update(
    state: &Arc<AppSharedState>,
    payload: GlobalStateUpdate,
) -> ReducerResult {
    let GlobalStateUpdate {
        maps,
        map_sets,
        rendering_layers,
    } = payload;

    Ok(Arc::new(AppSharedState {
        maps: merged(&state.maps, maps),
        map_sets: merged(&state.map_sets, map_sets),
        rendering_layers: merged(&state.rendering_layers, rendering_layers),
        ..(**state).clone()
    }))
}

/// Parses datasource records into rendering layers and adds them to the catalog.
pub(crate) fn fetch_sources(
    state: &Arc<AppSharedState>,
    records: Vec<Datasource>,
    ctx: &ReducerContext,
) -> ReducerResult {
    let app_node = state
        .app_node
        .as_ref()
        .ok_or(StateError::ApplicationNodeMissing {
            operation: "fetch sources",
        })?;

    let parsed = ctx.parser.parse(&records, app_node)?;
    log::debug!("Parsed {} rendering layers", parsed.len());

    let rendering_layers = if state.rendering_layers.is_empty() {
        Collection::from(parsed)
    } else {
        state.rendering_layers.merged_keep_first(parsed)
    };

    Ok(Arc::new(AppSharedState {
        rendering_layers,
        ..(**state).clone()
    }))
}

/// Replaces the application node.
pub(crate) fn app_node_update(
    state: &Arc<AppSharedState>,
    app_node: Arc<ApplicationNode>,
) -> ReducerResult {
    Ok(Arc::new(AppSharedState {
        app_node: Some(app_node),
        ..(**state).clone()
    }))
}

pub(crate) fn fetch_layers(
    state: &Arc<AppSharedState>,
    items: Vec<LayerMetadata>,
) -> ReducerResult {
    Ok(Arc::new(AppSharedState {
        layers: state.layers.merged_keep_first(items),
        ..(**state).clone()
    }))
}

pub(crate) fn fetch_places(
    state: &Arc<AppSharedState>,
    items: Vec<PlaceMetadata>,
) -> ReducerResult {
    Ok(Arc::new(AppSharedState {
        places: state.places.merged_keep_first(items),
        ..(**state).clone()
    }))
}

pub(crate) fn fetch_periods(
    state: &Arc<AppSharedState>,
    items: Vec<PeriodMetadata>,
) -> ReducerResult {
    Ok(Arc::new(AppSharedState {
        periods: state.periods.merged_keep_first(items),
        ..(**state).clone()
    }))
}

pub(crate) fn fetch_styles(
    state: &Arc<AppSharedState>,
    items: Vec<StyleMetadata>,
) -> ReducerResult {
    Ok(Arc::new(AppSharedState {
        styles: state.styles.merged_keep_first(items),
        ..(**state).clone()
    }))
}

fn merged<T: Keyed>(
    current: &Collection<T>,
    incoming: Option<Vec<T>>,
) -> Collection<T> {
    match incoming {
        Some(incoming) => current.merged_keep_first(incoming),
        None => current.clone(),
    }
}
