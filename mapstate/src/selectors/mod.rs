//! Read paths of the state.
//!
//! Selectors are pure functions of an [`AppSharedState`](crate::AppSharedState) snapshot. They
//! never fail: a missing map, layer or catalog entry results in `None` or an empty list, since they
//! are called on every re-render of a consumer and the state may be only partially loaded.

mod catalog;
mod map;
mod map_set;
mod selection;

pub use catalog::{
    active_rendering_layers, app_node, layer_by_key, layer_of_rendering_layer, period_by_key,
    period_of_rendering_layer, place_by_key, place_of_rendering_layer, rendering_layer_by_key,
    rendering_layer_style, style_by_key, style_of_rendering_layer,
};
pub use map::{
    map_active_rendering_layers, map_by_key, map_layer_override, map_layer_overrides,
    map_mount_view, map_rendering_layer, map_rendering_layers, map_view,
};
pub use map_set::{
    map_set_by_key, map_set_by_map_key, map_set_maps, map_set_mode, map_set_sync,
    map_set_synced_view, map_set_view,
};
pub use selection::{
    feature_colour, map_layer_selection, selected_feature_keys, selection_by_key,
};
