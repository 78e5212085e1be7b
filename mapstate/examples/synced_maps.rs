//! This example builds a map set of two synced maps, moves one of them and selects a few features
//! on a layer. The resulting state is printed as JSON.

use std::sync::Arc;

use mapstate::selectors;
use mapstate::{AppSharedState, RawAction, StoreBuilder};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut store = StoreBuilder::default()
        .with_subscriber(|state: &Arc<AppSharedState>| {
            log::info!(
                "State changed: {} maps, {} selections",
                state.maps.len(),
                state.selections.len()
            );
        })
        .build();

    let actions = [
        json!({
            "type": "MAP_ADD",
            "payload": {
                "map": {"key": "left", "view": {"zoom": 4, "latitude": 50, "longitude": 14}}
            }
        }),
        json!({"type": "MAP_ADD", "payload": {"map": {"key": "right"}}}),
        json!({
            "type": "MAP_SET_ADD",
            "payload": {
                "mapSet": {
                    "key": "compare",
                    "maps": ["left", "right"],
                    "sync": {"zoom": true, "center": true}
                }
            }
        }),
        json!({
            "type": "MAP_LAYER_ADD",
            "payload": {"mapKey": "left", "layer": {"key": "urban", "isActive": true}}
        }),
        json!({
            "type": "MAP_VIEW_CHANGE",
            "payload": {
                "key": "left",
                "viewChange": {"zoom": 9, "latitude": 50.08, "longitude": 14.43}
            }
        }),
        json!({
            "type": "MAP_LAYER_ADD_FEATURE_KEY",
            "payload": {"mapKey": "left", "layerKey": "urban", "featureKey": "prague-1"}
        }),
        json!({
            "type": "MAP_LAYER_ADD_FEATURE_KEY",
            "payload": {"mapKey": "left", "layerKey": "urban", "featureKey": 42}
        }),
    ];


    for action in actions {
        let action: RawAction = serde_json::from_value(action)?;
        store.dispatch_raw(Some(action))?;
    }

    let state = store.state();
    println!("right map view: {:?}", selectors::map_view(state, "right"));
    for feature_key in selectors::selected_feature_keys(state, "left", "urban") {
        println!(
            "{feature_key}: {:?}",
            selectors::map_layer_selection(state, "left", "urban")
                .and_then(|selection| selection.colour(feature_key))
        );
    }
    println!("{}", serde_json::to_string_pretty(state.as_ref())?);

    Ok(())
}
