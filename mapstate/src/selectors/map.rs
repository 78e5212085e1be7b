use std::sync::Arc;

use mapstate_types::{Collection, LayerOverride, MapView, RenderingLayer, SingleMap};

use super::map_set::{map_set_by_map_key, map_set_synced_view};
use crate::state::AppSharedState;

/// Map with the given key.
pub fn map_by_key<'a>(state: &'a AppSharedState, key: &str) -> Option<&'a Arc<SingleMap>> {
    state.maps.get(key)
}

/// Current view of the map.
pub fn map_view(state: &AppSharedState, key: &str) -> Option<MapView> {
    map_by_key(state, key).map(|map| map.view)
}

/// View a newly mounted map should start with: the map's own view overlaid with the synced part of
/// its map set view. If the map is not in a map set, its own view is returned.
pub fn map_mount_view(state: &AppSharedState, key: &str) -> Option<MapView> {
    let view = map_view(state, key)?;
    let Some(map_set) = map_set_by_map_key(state, key) else {
        return Some(view);
    };

    let synced = map_set_synced_view(state, &map_set.key).unwrap_or_default();
    Some(view.patched(&synced))
}

/// Layer overrides of the map.
pub fn map_layer_overrides<'a>(
    state: &'a AppSharedState,
    map_key: &str,
) -> Option<&'a Collection<LayerOverride>> {
    map_by_key(state, map_key).map(|map| &map.rendering_layers)
}

/// Override of one layer of the map.
pub fn map_layer_override<'a>(
    state: &'a AppSharedState,
    map_key: &str,
    layer_key: &str,
) -> Option<&'a Arc<LayerOverride>> {
    map_layer_overrides(state, map_key)?.get(layer_key)
}

/// Effective layers of the map: each override merged over its catalog layer, in the order of the
/// overrides. Overrides without a catalog layer are skipped.
pub fn map_rendering_layers(state: &AppSharedState, map_key: &str) -> Option<Vec<RenderingLayer>> {
    let overrides = map_layer_overrides(state, map_key)?;
    Some(
        overrides
            .iter()
            .filter_map(|layer_override| merge_with_catalog(state, layer_override))
            .collect(),
    )
}

/// Effective layer of the map with the given key.
pub fn map_rendering_layer(
    state: &AppSharedState,
    map_key: &str,
    layer_key: &str,
) -> Option<RenderingLayer> {
    let layer_override = map_layer_override(state, map_key, layer_key)?;
    merge_with_catalog(state, layer_override)
}

/// Effective layers of the map that are visible.
pub fn map_active_rendering_layers(state: &AppSharedState, map_key: &str) -> Vec<RenderingLayer> {
    map_rendering_layers(state, map_key)
        .unwrap_or_default()
        .into_iter()
        .filter(|layer| layer.is_active)
        .collect()
}

fn merge_with_catalog(
    state: &AppSharedState,
    layer_override: &LayerOverride,
) -> Option<RenderingLayer> {
    match state.rendering_layers.get(&layer_override.key) {
        Some(catalog_layer) => Some(layer_override.apply_to(catalog_layer)),
        None => {
            log::trace!(
                "Layer {} is not in the rendering layer catalog",
                layer_override.key
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use mapstate_types::{MapSet, MapSetSync, ViewPatch};

    use super::*;
    use crate::tests::{catalog_state, synced_state};

    #[test]
    fn merges_overrides_over_catalog() {
        let mut state = catalog_state();
        state.maps = vec![SingleMap::new("overview", MapView::default()).with_layers([
            LayerOverride::new("urban").with_active(true).with_opacity(0.3),
            LayerOverride::new("base").with_active(false),
            LayerOverride::new("missing"),
        ])]
        .into();

        let layers = map_rendering_layers(&state, "overview").expect("map exists");
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].key, "urban");
        assert!(layers[0].is_active);
        assert_eq!(layers[0].opacity, Some(0.3));
        assert_eq!(layers[0].datasource.key, "ds-urban");
        assert!(!layers[1].is_active);

        let active: Vec<_> = map_active_rendering_layers(&state, "overview")
            .into_iter()
            .map(|l| l.key)
            .collect();
        assert_eq!(active, vec!["urban"]);

        assert!(map_rendering_layer(&state, "overview", "missing").is_none());
        assert!(map_rendering_layers(&state, "unknown").is_none());
        assert!(map_active_rendering_layers(&state, "unknown").is_empty());
    }

    #[test]
    fn mount_view_takes_synced_fields_from_map_set() {
        let mut state = synced_state(MapSetSync {
            zoom: true,
            center: false,
        });
        state.map_sets = vec![MapSet::new("s1", ["m1", "m2"])
            .with_sync(MapSetSync {
                zoom: true,
                center: false,
            })
            .with_view(ViewPatch {
                zoom: Some(9.0),
                latitude: Some(50.0),
                longitude: Some(14.0),
            })]
        .into();

        let view = map_mount_view(&state, "m2").expect("map exists");
        assert_relative_eq!(view.zoom, 9.0);
        assert_relative_eq!(view.latitude, 0.0);
        assert_relative_eq!(view.longitude, 0.0);

        assert!(map_mount_view(&state, "unknown").is_none());
    }

    #[test]
    fn mount_view_of_map_without_set_is_own_view() {
        let mut state = AppSharedState::default();
        state.maps = vec![SingleMap::new("lonely", MapView::new(3.0, 1.0, 2.0))].into();

        assert_eq!(
            map_mount_view(&state, "lonely"),
            Some(MapView::new(3.0, 1.0, 2.0))
        );
    }
}
