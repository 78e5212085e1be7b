use std::sync::Arc;

use mapstate_types::{MapSet, ViewPatch};

use super::ReducerResult;
use crate::action::{MapSetViewChange, MapViewChange};
use crate::error::StateError;
use crate::selectors;
use crate::state::AppSharedState;

/// Changes the view of a map.
///
/// The triggering map gets all the changed fields. Fields that are synced in the map's map set are
/// also written into the map set view and into the views of all other members of the set.
pub(crate) fn map_view_change(
    state: &Arc<AppSharedState>,
    payload: MapViewChange,
) -> ReducerResult {
    const OPERATION: &str = "map view change";
    let MapViewChange { key, view_change } = payload;

    if !state.maps.contains_key(&key) {
        return Err(StateError::MapNotFound {
            key,
            operation: OPERATION,
        });
    }

    let map_set =
        selectors::map_set_by_map_key(state, &key).ok_or_else(|| StateError::MapSetOfMapNotFound {
            map_key: key.clone(),
            operation: OPERATION,
        })?;

    let synced = view_change.synced_part(&map_set.sync);
    let maps = state.maps.with_mapped(|map| {
        if map.key == key {
            Some(map.with_view(map.view.patched(&view_change)))
        } else if !synced.is_empty() && map_set.contains_map(&map.key) {
            Some(map.with_view(map.view.patched(&synced)))
        } else {
            None
        }
    });

    let map_sets = if synced.is_empty() {
        state.map_sets.clone()
    } else {
        state
            .map_sets
            .with_updated(&map_set.key, |map_set| with_view(map_set, &synced))
            .unwrap_or_else(|| state.map_sets.clone())
    };

    Ok(Arc::new(AppSharedState {
        maps,
        map_sets,
        ..(**state).clone()
    }))
}

/// Changes the canonical view of a map set and writes the synced fields into the views of all
/// members of the set.
pub(crate) fn map_set_view_change(
    state: &Arc<AppSharedState>,
    payload: MapSetViewChange,
) -> ReducerResult {
    const OPERATION: &str = "map set view change";
    let MapSetViewChange { key, view_change } = payload;

    let map_set = state
        .map_sets
        .get(&key)
        .ok_or_else(|| StateError::MapSetNotFound {
            key: key.clone(),
            operation: OPERATION,
        })?;

    let synced = view_change.synced_part(&map_set.sync);
    let maps = if synced.is_empty() {
        state.maps.clone()
    } else {
        state.maps.with_mapped(|map| {
            map_set
                .contains_map(&map.key)
                .then(|| map.with_view(map.view.patched(&synced)))
        })
    };

    let map_sets = state
        .map_sets
        .with_updated(&key, |map_set| with_view(map_set, &view_change))
        .unwrap_or_else(|| state.map_sets.clone());

    Ok(Arc::new(AppSharedState {
        maps,
        map_sets,
        ..(**state).clone()
    }))
}

fn with_view(map_set: &MapSet, view_change: &ViewPatch) -> MapSet {
    MapSet {
        view: map_set.view.merged(view_change),
        ..map_set.clone()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use mapstate_types::{MapSetSync, MapView};

    use super::*;
    use crate::tests::synced_state;

    fn change(key: &str, view_change: ViewPatch) -> MapViewChange {
        MapViewChange {
            key: key.into(),
            view_change,
        }
    }

    fn view_of(state: &AppSharedState, key: &str) -> MapView {
        selectors::map_view(state, key).expect("map exists")
    }

    #[test]
    fn fully_synced_change_moves_all_members() {
        let state = synced_state(MapSetSync {
            zoom: true,
            center: true,
        })
        .into_shared();

        let new_state = map_view_change(
            &state,
            change(
                "m1",
                ViewPatch {
                    zoom: Some(7.0),
                    latitude: Some(10.0),
                    longitude: Some(-5.0),
                },
            ),
        )
        .expect("map exists");

        assert_eq!(view_of(&new_state, "m1"), MapView::new(7.0, 10.0, -5.0));
        assert_eq!(view_of(&new_state, "m2"), MapView::new(7.0, 10.0, -5.0));
        assert_eq!(
            selectors::map_set_view(&new_state, "s1"),
            Some(ViewPatch {
                zoom: Some(7.0),
                latitude: Some(10.0),
                longitude: Some(-5.0),
            })
        );
        assert!(new_state.maps.is_same_item(&state.maps, "m3"));
        assert!(new_state.selections.ptr_eq(&state.selections));
        assert!(new_state.rendering_layers.ptr_eq(&state.rendering_layers));
    }

    #[test]
    fn unsynced_fields_stay_on_triggering_map() {
        let state = synced_state(MapSetSync {
            zoom: true,
            center: false,
        })
        .into_shared();

        let new_state = map_view_change(
            &state,
            change(
                "m1",
                ViewPatch {
                    zoom: Some(7.0),
                    latitude: Some(10.0),
                    longitude: None,
                },
            ),
        )
        .expect("map exists");

        let m1 = view_of(&new_state, "m1");
        assert_relative_eq!(m1.zoom, 7.0);
        assert_relative_eq!(m1.latitude, 10.0);

        let m2 = view_of(&new_state, "m2");
        assert_relative_eq!(m2.zoom, 7.0);
        assert_relative_eq!(m2.latitude, 0.0);

        let set_view = selectors::map_set_view(&new_state, "s1").expect("set exists");
        assert_eq!(set_view.zoom, Some(7.0));
        assert_eq!(set_view.latitude, Some(0.0));
    }

    #[test]
    fn change_without_synced_fields_keeps_set_and_members() {
        let state = synced_state(MapSetSync {
            zoom: true,
            center: false,
        })
        .into_shared();

        let new_state = map_view_change(&state, change("m2", ViewPatch::center(1.0, 2.0)))
            .expect("map exists");

        assert_eq!(view_of(&new_state, "m2"), MapView::new(2.0, 1.0, 2.0));
        assert!(new_state.maps.is_same_item(&state.maps, "m1"));
        assert!(new_state.map_sets.ptr_eq(&state.map_sets));
    }

    #[test]
    fn missing_map_or_set_is_error() {
        let state = synced_state(MapSetSync::default()).into_shared();

        assert_matches!(
            map_view_change(&state, change("unknown", ViewPatch::zoom(1.0))),
            Err(StateError::MapNotFound { key, .. }) if key == "unknown"
        );
        assert_matches!(
            map_view_change(&state, change("m3", ViewPatch::zoom(1.0))),
            Err(StateError::MapSetOfMapNotFound { map_key, .. }) if map_key == "m3"
        );
    }

    #[test]
    fn map_set_view_change_moves_members() {
        let state = synced_state(MapSetSync {
            zoom: false,
            center: true,
        })
        .into_shared();

        let new_state = map_set_view_change(
            &state,
            MapSetViewChange {
                key: "s1".into(),
                view_change: ViewPatch {
                    zoom: Some(4.0),
                    latitude: Some(49.0),
                    longitude: Some(16.0),
                },
            },
        )
        .expect("set exists");

        assert_eq!(view_of(&new_state, "m1"), MapView::new(2.0, 49.0, 16.0));
        assert_eq!(view_of(&new_state, "m2"), MapView::new(2.0, 49.0, 16.0));
        assert_eq!(
            selectors::map_set_view(&new_state, "s1").and_then(|v| v.zoom),
            Some(4.0)
        );
        assert!(new_state.maps.is_same_item(&state.maps, "m3"));

        assert_matches!(
            map_set_view_change(
                &state,
                MapSetViewChange {
                    key: "unknown".into(),
                    view_change: ViewPatch::zoom(1.0),
                }
            ),
            Err(StateError::MapSetNotFound { .. })
        );
    }
}
