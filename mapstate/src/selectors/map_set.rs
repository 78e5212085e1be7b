use std::sync::Arc;

use mapstate_types::{MapSet, MapSetMode, MapSetSync, SingleMap, ViewPatch};

use crate::state::AppSharedState;

/// Map set with the given key.
pub fn map_set_by_key<'a>(state: &'a AppSharedState, key: &str) -> Option<&'a Arc<MapSet>> {
    state.map_sets.get(key)
}

/// First map set the map is a member of.
pub fn map_set_by_map_key<'a>(state: &'a AppSharedState, map_key: &str) -> Option<&'a Arc<MapSet>> {
    state
        .map_sets
        .iter()
        .find(|map_set| map_set.contains_map(map_key))
}

/// Member maps of the map set in member order. Members missing from the map list are skipped.
pub fn map_set_maps<'a>(state: &'a AppSharedState, key: &str) -> Vec<&'a Arc<SingleMap>> {
    let Some(map_set) = map_set_by_key(state, key) else {
        return vec![];
    };

    map_set
        .maps
        .iter()
        .filter_map(|map_key| state.maps.get(map_key))
        .collect()
}

/// Sync flags of the map set.
pub fn map_set_sync(state: &AppSharedState, key: &str) -> Option<MapSetSync> {
    map_set_by_key(state, key).map(|map_set| map_set.sync)
}

/// Canonical view of the map set.
pub fn map_set_view(state: &AppSharedState, key: &str) -> Option<ViewPatch> {
    map_set_by_key(state, key).map(|map_set| map_set.view)
}

/// Part of the map set view that is synchronized: `zoom` if zoom is synced, `latitude` and
/// `longitude` if center is synced.
pub fn map_set_synced_view(state: &AppSharedState, key: &str) -> Option<ViewPatch> {
    map_set_by_key(state, key).map(|map_set| map_set.view.synced_part(&map_set.sync))
}

/// Presentation mode of the map set.
pub fn map_set_mode(state: &AppSharedState, key: &str) -> Option<MapSetMode> {
    map_set_by_key(state, key).and_then(|map_set| map_set.mode)
}
