use ahash::{HashMap, HashMapExt};
use mapstate_types::{
    CatalogEntry, Datasource, DatasourceData, FeatureKey, LayerData, MapSet, MapSetSync, MapView,
    PeriodData, PlaceData, RenderingLayer, Selection, SingleMap, StyleData, ViewPatch,
};
use serde_json::{json, Map, Value};

use crate::config::StateConfig;
use crate::state::AppSharedState;

fn configuration(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn datasource(key: &str) -> Datasource {
    CatalogEntry::new(
        key,
        DatasourceData {
            kind: "wms".into(),
            url: Some(format!("https://example.com/{key}")),
            ..Default::default()
        },
    )
}

/// Two catalog layers: active `base` without metadata, and inactive `urban` linked to layer
/// metadata with a style, a place and a period.
pub fn catalog_state() -> AppSharedState {
    let mut base_source = datasource("ds-base");
    base_source.data.configuration = configuration(json!({"fill": "#cccccc"}));

    let mut urban_source = datasource("ds-urban").with_neighbours(["layer-urban"]);
    urban_source.data.configuration =
        configuration(json!({"fill": "#00ff00", "format": "image/png"}));

    AppSharedState {
        rendering_layers: vec![
            RenderingLayer::new("base", base_source).with_active(true),
            RenderingLayer::new("urban", urban_source),
        ]
        .into(),
        layers: vec![CatalogEntry::new(
            "layer-urban",
            LayerData {
                name_display: "Urban areas".into(),
                ..Default::default()
            },
        )
        .with_neighbours(["style-urban", "place-prague", "period-2020"])]
        .into(),
        styles: vec![CatalogEntry::new(
            "style-urban",
            StyleData {
                name_display: "Urban".into(),
                definition: configuration(json!({"fill": "#ff0000", "outline": 2})),
            },
        )]
        .into(),
        places: vec![CatalogEntry::new(
            "place-prague",
            PlaceData {
                name_display: "Prague".into(),
                bbox: Some([14.22, 49.94, 14.71, 50.18]),
                geometry: None,
            },
        )]
        .into(),
        periods: vec![CatalogEntry::new(
            "period-2020",
            PeriodData {
                name_display: "2020".into(),
                start: Some("2020-01-01".into()),
                end: Some("2020-12-31".into()),
            },
        )]
        .into(),
        ..Default::default()
    }
}

/// Map set `s1` with members `m1` and `m2`, and map `m3` outside of any set. All views are
/// `{zoom: 2, latitude: 0, longitude: 0}`.
pub fn synced_state(sync: MapSetSync) -> AppSharedState {
    let view = MapView::new(2.0, 0.0, 0.0);

    AppSharedState {
        map_sets: vec![MapSet::new("s1", ["m1", "m2"])
            .with_sync(sync)
            .with_view(ViewPatch::from(view))]
        .into(),
        maps: vec![
            SingleMap::new("m1", view),
            SingleMap::new("m2", view),
            SingleMap::new("m3", view),
        ]
        .into(),
        ..Default::default()
    }
}

/// Selection with the default palette and the features at slots `0..n`.
pub fn selection(key: &str, feature_keys: &[&str]) -> Selection {
    let config = StateConfig::default();
    let mut pairs = HashMap::new();
    for (index, feature_key) in feature_keys.iter().enumerate() {
        pairs.insert(feature_key.to_string(), index);
    }

    Selection {
        key: key.into(),
        feature_keys: feature_keys.iter().map(|k| FeatureKey::from(*k)).collect(),
        feature_key_colour_index_pairs: pairs,
        distinct_colours: config.distinct_colours,
        distinct_items: config.distinct_items,
    }
}
