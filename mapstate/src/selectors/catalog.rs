use std::sync::Arc;

use mapstate_types::{
    ApplicationNode, CatalogEntry, Collection, LayerMetadata, PeriodMetadata, PlaceMetadata,
    RenderingLayer, StyleMetadata,
};
use serde_json::{Map, Value};

use crate::state::AppSharedState;

/// Application descriptor, if loaded.
pub fn app_node(state: &AppSharedState) -> Option<&Arc<ApplicationNode>> {
    state.app_node.as_ref()
}

/// Layer metadata with the given key.
pub fn layer_by_key<'a>(state: &'a AppSharedState, key: &str) -> Option<&'a Arc<LayerMetadata>> {
    state.layers.get(key)
}

/// Place metadata with the given key.
pub fn place_by_key<'a>(state: &'a AppSharedState, key: &str) -> Option<&'a Arc<PlaceMetadata>> {
    state.places.get(key)
}

/// Period metadata with the given key.
pub fn period_by_key<'a>(state: &'a AppSharedState, key: &str) -> Option<&'a Arc<PeriodMetadata>> {
    state.periods.get(key)
}

/// Style metadata with the given key.
pub fn style_by_key<'a>(state: &'a AppSharedState, key: &str) -> Option<&'a Arc<StyleMetadata>> {
    state.styles.get(key)
}

/// Catalog rendering layer with the given key.
pub fn rendering_layer_by_key<'a>(
    state: &'a AppSharedState,
    key: &str,
) -> Option<&'a Arc<RenderingLayer>> {
    state.rendering_layers.get(key)
}

/// Catalog rendering layers that are visible by default.
pub fn active_rendering_layers(state: &AppSharedState) -> Vec<&Arc<RenderingLayer>> {
    state
        .rendering_layers
        .iter()
        .filter(|layer| layer.is_active)
        .collect()
}

fn first_neighbour<'a, D>(
    neighbours: &[String],
    catalog: &'a Collection<CatalogEntry<D>>,
) -> Option<&'a Arc<CatalogEntry<D>>> {
    neighbours.iter().find_map(|key| catalog.get(key))
}

/// Layer metadata the rendering layer's datasource is adjacent to.
pub fn layer_of_rendering_layer<'a>(
    state: &'a AppSharedState,
    rendering_layer_key: &str,
) -> Option<&'a Arc<LayerMetadata>> {
    let rendering_layer = state.rendering_layers.get(rendering_layer_key)?;
    first_neighbour(&rendering_layer.datasource.neighbours, &state.layers)
}

/// Style of the rendering layer: rendering layer → layer metadata → style metadata.
pub fn style_of_rendering_layer<'a>(
    state: &'a AppSharedState,
    rendering_layer_key: &str,
) -> Option<&'a Arc<StyleMetadata>> {
    let layer = layer_of_rendering_layer(state, rendering_layer_key)?;
    first_neighbour(&layer.neighbours, &state.styles)
}

/// Place of the rendering layer: rendering layer → layer metadata → place metadata.
pub fn place_of_rendering_layer<'a>(
    state: &'a AppSharedState,
    rendering_layer_key: &str,
) -> Option<&'a Arc<PlaceMetadata>> {
    let layer = layer_of_rendering_layer(state, rendering_layer_key)?;
    first_neighbour(&layer.neighbours, &state.places)
}

/// Period of the rendering layer: rendering layer → layer metadata → period metadata.
pub fn period_of_rendering_layer<'a>(
    state: &'a AppSharedState,
    rendering_layer_key: &str,
) -> Option<&'a Arc<PeriodMetadata>> {
    let layer = layer_of_rendering_layer(state, rendering_layer_key)?;
    first_neighbour(&layer.neighbours, &state.periods)
}

/// Effective style configuration of the rendering layer.
///
/// The style definition is shallow-merged over the datasource configuration, so style values win
/// on conflicting keys. If the layer has no style, the datasource configuration is returned as is.
/// Returns `None` only if there is no such rendering layer.
pub fn rendering_layer_style(
    state: &AppSharedState,
    rendering_layer_key: &str,
) -> Option<Map<String, Value>> {
    let rendering_layer = state.rendering_layers.get(rendering_layer_key)?;
    let mut configuration = rendering_layer.datasource.data.configuration.clone();

    match style_of_rendering_layer(state, rendering_layer_key) {
        Some(style) => {
            for (key, value) in &style.data.definition {
                configuration.insert(key.clone(), value.clone());
            }
        }
        None => log::trace!("Rendering layer {rendering_layer_key} has no style"),
    }

    Some(configuration)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tests::catalog_state;

    #[test]
    fn resolves_metadata_through_neighbours() {
        let state = catalog_state();

        assert_eq!(
            layer_of_rendering_layer(&state, "urban").map(|l| l.key.as_str()),
            Some("layer-urban")
        );
        assert_eq!(
            style_of_rendering_layer(&state, "urban").map(|s| s.key.as_str()),
            Some("style-urban")
        );
        assert_eq!(
            place_of_rendering_layer(&state, "urban").map(|p| p.key.as_str()),
            Some("place-prague")
        );
        assert_eq!(
            period_of_rendering_layer(&state, "urban").map(|p| p.key.as_str()),
            Some("period-2020")
        );
        assert!(style_of_rendering_layer(&state, "base").is_none());
        assert!(style_of_rendering_layer(&state, "unknown").is_none());
    }

    #[test]
    fn style_wins_over_datasource_configuration() {
        let state = catalog_state();
        let style = rendering_layer_style(&state, "urban").expect("layer exists");

        assert_eq!(style.get("fill"), Some(&json!("#ff0000")));
        assert_eq!(style.get("format"), Some(&json!("image/png")));
        assert_eq!(style.get("outline"), Some(&json!(2)));
    }

    #[test]
    fn style_of_layer_without_style_is_datasource_configuration() {
        let state = catalog_state();
        let style = rendering_layer_style(&state, "base").expect("layer exists");

        assert_eq!(style.get("fill"), Some(&json!("#cccccc")));
        assert!(rendering_layer_style(&state, "unknown").is_none());
    }

    #[test]
    fn active_layers_follow_catalog_flag() {
        let state = catalog_state();
        let keys: Vec<_> = active_rendering_layers(&state)
            .into_iter()
            .map(|l| l.key.as_str())
            .collect();
        assert_eq!(keys, vec!["base"]);
    }
}
