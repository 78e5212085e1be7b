use std::sync::Arc;

use mapstate_types::{FeatureKey, Selection};

use super::map::map_layer_override;
use crate::state::AppSharedState;

/// Selection with the given key.
pub fn selection_by_key<'a>(state: &'a AppSharedState, key: &str) -> Option<&'a Arc<Selection>> {
    state.selections.get(key)
}

/// Selection of a layer of a map. The selection key of the map's layer override is used, falling
/// back to the selection key of the catalog layer.
pub fn map_layer_selection<'a>(
    state: &'a AppSharedState,
    map_key: &str,
    layer_key: &str,
) -> Option<&'a Arc<Selection>> {
    let layer_override = map_layer_override(state, map_key, layer_key)?;
    let selection_key = match &layer_override.selection_key {
        Some(key) => key,
        None => state
            .rendering_layers
            .get(layer_key)?
            .selection_key
            .as_ref()?,
    };

    selection_by_key(state, selection_key)
}

/// Selected features of a layer of a map, in selection order.
pub fn selected_feature_keys<'a>(
    state: &'a AppSharedState,
    map_key: &str,
    layer_key: &str,
) -> &'a [FeatureKey] {
    map_layer_selection(state, map_key, layer_key)
        .map(|selection| selection.feature_keys.as_slice())
        .unwrap_or_default()
}

/// Palette colour of a selected feature.
pub fn feature_colour<'a>(
    state: &'a AppSharedState,
    map_key: &str,
    layer_key: &str,
    feature_key: &FeatureKey,
) -> Option<&'a str> {
    map_layer_selection(state, map_key, layer_key)?.colour(feature_key)
}

#[cfg(test)]
mod tests {
    use mapstate_types::{LayerOverride, MapView, SingleMap};

    use super::*;
    use crate::tests::{catalog_state, selection};

    #[test]
    fn finds_selection_through_override_or_catalog() {
        let mut state = catalog_state();
        state.maps = vec![SingleMap::new("overview", MapView::default()).with_layers([
            LayerOverride::new("urban").with_selection_key("sel-urban"),
            LayerOverride::new("base"),
        ])]
        .into();
        state.rendering_layers = state
            .rendering_layers
            .with_updated("base", |layer| {
                let mut layer = layer.clone();
                layer.selection_key = Some("sel-base".into());
                layer
            })
            .expect("layer exists");
        state.selections = vec![
            selection("sel-urban", &["p1", "p2"]),
            selection("sel-base", &["b1"]),
        ]
        .into();

        assert_eq!(
            selected_feature_keys(&state, "overview", "urban"),
            &[FeatureKey::from("p1"), FeatureKey::from("p2")]
        );
        assert_eq!(
            map_layer_selection(&state, "overview", "base").map(|s| s.key.as_str()),
            Some("sel-base")
        );
        assert_eq!(
            feature_colour(&state, "overview", "urban", &FeatureKey::from("p2")),
            Some("#377eb8")
        );
        assert!(feature_colour(&state, "overview", "urban", &FeatureKey::from("p3")).is_none());
        assert!(selected_feature_keys(&state, "overview", "unknown").is_empty());
    }
}
