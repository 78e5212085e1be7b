use std::sync::Arc;

use mapstate_types::MapSet;

use super::ReducerResult;
use crate::action::{MapAdd, MapSetMember, MapSetModeChange, MapSetSyncChange};
use crate::error::StateError;
use crate::state::AppSharedState;

/// Adds a map set. If a map set with the same key exists, the state is returned as is.
pub(crate) fn map_set_add(state: &Arc<AppSharedState>, map_set: MapSet) -> ReducerResult {
    if state.map_sets.contains_key(&map_set.key) {
        log::debug!("Map set {} already exists", map_set.key);
        return Ok(state.clone());
    }

    Ok(Arc::new(AppSharedState {
        map_sets: state.map_sets.with_pushed(map_set),
        ..(**state).clone()
    }))
}

/// Removes a map set. Member maps are kept.
pub(crate) fn map_set_remove(state: &Arc<AppSharedState>, key: String) -> ReducerResult {
    Ok(Arc::new(AppSharedState {
        map_sets: state.map_sets.without_keys(&[key]),
        ..(**state).clone()
    }))
}

/// Adds a map, optionally making it a member of a map set. If a map with the same key exists, the
/// state is returned as is.
pub(crate) fn map_add(state: &Arc<AppSharedState>, payload: MapAdd) -> ReducerResult {
    let MapAdd { map, map_set_key } = payload;

    if state.maps.contains_key(&map.key) {
        log::debug!("Map {} already exists", map.key);
        return Ok(state.clone());
    }

    let map_sets = match map_set_key {
        Some(map_set_key) => state
            .map_sets
            .with_updated(&map_set_key, |map_set| with_member(map_set, &map.key))
            .ok_or(StateError::MapSetNotFound {
                key: map_set_key,
                operation: "map add",
            })?,
        None => state.map_sets.clone(),
    };

    Ok(Arc::new(AppSharedState {
        maps: state.maps.with_pushed(map),
        map_sets,
        ..(**state).clone()
    }))
}

/// Adds a map key to the members of a map set.
pub(crate) fn map_set_add_map(state: &Arc<AppSharedState>, payload: MapSetMember) -> ReducerResult {
    let MapSetMember {
        map_set_key,
        map_key,
    } = payload;

    let map_set = state
        .map_sets
        .get(&map_set_key)
        .ok_or_else(|| StateError::MapSetNotFound {
            key: map_set_key.clone(),
            operation: "map set add map",
        })?;

    if map_set.contains_map(&map_key) {
        return Ok(state.clone());
    }

    let map_sets = state
        .map_sets
        .with_updated(&map_set_key, |map_set| with_member(map_set, &map_key))
        .unwrap_or_else(|| state.map_sets.clone());

    Ok(Arc::new(AppSharedState {
        map_sets,
        ..(**state).clone()
    }))
}

/// Removes a map key from the members of a map set. The map itself is kept.
pub(crate) fn map_set_remove_map(
    state: &Arc<AppSharedState>,
    payload: MapSetMember,
) -> ReducerResult {
    let MapSetMember {
        map_set_key,
        map_key,
    } = payload;

    let map_sets = state.map_sets.with_mapped(|map_set| {
        (map_set.key == map_set_key).then(|| without_members(map_set, &[&map_key]))
    });

    Ok(Arc::new(AppSharedState {
        map_sets,
        ..(**state).clone()
    }))
}

/// Removes maps, their membership in map sets and the selections referenced by their layers.
pub(crate) fn maps_remove(state: &Arc<AppSharedState>, keys: Vec<String>) -> ReducerResult {
    let selection_keys: Vec<String> = state
        .maps
        .iter()
        .filter(|map| keys.contains(&map.key))
        .flat_map(|map| {
            map.rendering_layers
                .iter()
                .filter_map(|layer| layer.selection_key.clone())
                .collect::<Vec<_>>()
        })
        .collect();

    let map_sets = state.map_sets.with_mapped(|map_set| {
        map_set
            .maps
            .iter()
            .any(|member| keys.contains(member))
            .then(|| without_members(map_set, &keys))
    });

    let selections = if selection_keys.is_empty() {
        state.selections.clone()
    } else {
        log::debug!("Removing selections {selection_keys:?} of removed maps");
        state.selections.without_keys(&selection_keys)
    };

    Ok(Arc::new(AppSharedState {
        maps: state.maps.without_keys(&keys),
        map_sets,
        selections,
        ..(**state).clone()
    }))
}

/// Changes sync flags of a map set. Views of the members are not aligned.
pub(crate) fn map_set_sync_change(
    state: &Arc<AppSharedState>,
    payload: MapSetSyncChange,
) -> ReducerResult {
    let MapSetSyncChange { key, sync } = payload;

    let map_sets = state
        .map_sets
        .with_updated(&key, |map_set| {
            map_set.clone().with_sync(map_set.sync.patched(&sync))
        })
        .ok_or_else(|| StateError::MapSetNotFound {
            key: key.clone(),
            operation: "map set sync change",
        })?;

    Ok(Arc::new(AppSharedState {
        map_sets,
        ..(**state).clone()
    }))
}

pub(crate) fn map_set_mode_change(
    state: &Arc<AppSharedState>,
    payload: MapSetModeChange,
) -> ReducerResult {
    let MapSetModeChange { key, mode } = payload;

    let map_sets = state
        .map_sets
        .with_updated(&key, |map_set| MapSet {
            mode,
            ..map_set.clone()
        })
        .ok_or_else(|| StateError::MapSetNotFound {
            key: key.clone(),
            operation: "map set mode change",
        })?;

    Ok(Arc::new(AppSharedState {
        map_sets,
        ..(**state).clone()
    }))
}

fn with_member(map_set: &MapSet, map_key: &str) -> MapSet {
    let mut map_set = map_set.clone();
    if !map_set.contains_map(map_key) {
        map_set.maps.push(map_key.to_string());
    }

    map_set
}

fn without_members<K: AsRef<str>>(map_set: &MapSet, map_keys: &[K]) -> MapSet {
    let mut map_set = map_set.clone();
    map_set
        .maps
        .retain(|member| !map_keys.iter().any(|key| key.as_ref() == member.as_str()));

    map_set
}
