//! State transition functions.
//!
//! Every reducer takes the current snapshot and the payload of one action kind and returns a new
//! snapshot. Only the collections and records on the modified path are replaced, everything else is
//! shared with the input snapshot. A reducer that does not change anything returns the input `Arc`
//! itself.
//!
//! Reducers fail only when the action targets a map, map set or layer for mutation and the target
//! does not exist. In that case nothing is applied.

use std::sync::Arc;

use mapstate_types::{Collection, Keyed};

use crate::config::StateConfig;
use crate::id::IdSource;
use crate::parser::DatasourceParser;
use crate::state::AppSharedState;

mod catalog;
mod collection;
mod feature;
mod layer;
mod view;

pub(crate) use catalog::{
    app_node_update, fetch_layers, fetch_periods, fetch_places, fetch_sources, fetch_styles,
    global_state_update,
};
pub(crate) use collection::{
    map_add, map_set_add, map_set_add_map, map_set_mode_change, map_set_remove,
    map_set_remove_map, map_set_sync_change, maps_remove,
};
pub(crate) use feature::{add_feature_key, remove_feature_key, set_feature_key};
pub(crate) use layer::{
    active_feature_change, layer_active_change, layer_add, layer_interactivity_change,
    layer_opacity_change, layer_remove, rendering_layer_active_change,
};
pub(crate) use view::{map_set_view_change, map_view_change};

/// Collaborators available to reducers.
pub(crate) struct ReducerContext<'a> {
    pub ids: &'a dyn IdSource,
    pub parser: &'a dyn DatasourceParser,
    pub config: &'a StateConfig,
}

type ReducerResult = Result<Arc<AppSharedState>, crate::error::StateError>;

/// Replaces the record with the same key, or appends it if there is none.
fn upserted<T: Keyed>(collection: &Collection<T>, item: T) -> Collection<T> {
    match collection.position(item.key()) {
        Some(index) => collection
            .with_replaced_at(index, item)
            .unwrap_or_else(|| collection.clone()),
        None => collection.with_pushed(item),
    }
}
