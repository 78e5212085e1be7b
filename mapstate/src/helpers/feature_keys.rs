use ahash::{HashMap, HashMapExt};
use mapstate_types::{FeatureKey, Selection, SelectionStyle};

use crate::config::StateConfig;

/// Lowest non-negative palette slot not used by any selected feature.
pub(crate) fn lowest_unused_colour_index(pairs: &HashMap<String, usize>) -> usize {
    (0..)
        .find(|index| !pairs.values().any(|used| used == index))
        .unwrap_or_default()
}

/// Creates a selection that contains only the given feature at palette slot 0. Style values not
/// given in `style` are taken from the configuration.
pub(crate) fn new_selection(
    key: String,
    feature_key: FeatureKey,
    config: &StateConfig,
    style: Option<&SelectionStyle>,
) -> Selection {
    let mut pairs = HashMap::new();
    pairs.insert(feature_key.to_string(), 0);

    let selection = Selection {
        key,
        feature_keys: vec![feature_key],
        feature_key_colour_index_pairs: pairs,
        distinct_colours: config.distinct_colours.clone(),
        distinct_items: config.distinct_items,
    };

    match style {
        Some(style) => selection.styled(style),
        None => selection,
    }
}

/// Returns a copy of the selection that contains only the given feature at palette slot 0.
pub(crate) fn with_only_feature(selection: &Selection, feature_key: FeatureKey) -> Selection {
    let mut pairs = HashMap::new();
    pairs.insert(feature_key.to_string(), 0);

    Selection {
        key: selection.key.clone(),
        feature_keys: vec![feature_key],
        feature_key_colour_index_pairs: pairs,
        distinct_colours: selection.distinct_colours.clone(),
        distinct_items: selection.distinct_items,
    }
}

/// Returns a copy of the selection with the feature appended. The feature gets the lowest unused
/// palette slot if the selection has distinct items, or slot 0 otherwise.
///
/// Returns `None` if the feature is already selected.
pub(crate) fn with_feature_added(
    selection: &Selection,
    feature_key: FeatureKey,
) -> Option<Selection> {
    if selection.contains(&feature_key) {
        return None;
    }

    let index = if selection.distinct_items {
        lowest_unused_colour_index(&selection.feature_key_colour_index_pairs)
    } else {
        0
    };

    let mut selection = selection.clone();
    selection
        .feature_key_colour_index_pairs
        .insert(feature_key.to_string(), index);
    selection.feature_keys.push(feature_key);

    Some(selection)
}

/// Returns a copy of the selection without the feature. Returns `None` if the feature is not
/// selected.
pub(crate) fn with_feature_removed(
    selection: &Selection,
    feature_key: &FeatureKey,
) -> Option<Selection> {
    if !selection.contains(feature_key) {
        return None;
    }

    let mut selection = selection.clone();
    selection.feature_keys.retain(|key| key != feature_key);
    selection
        .feature_key_colour_index_pairs
        .remove(&feature_key.to_string());

    Some(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(distinct_items: bool) -> Selection {
        let config = StateConfig {
            distinct_items,
            ..Default::default()
        };
        new_selection("s".into(), FeatureKey::from("f1"), &config, None)
    }

    #[test]
    fn lowest_unused_fills_gaps() {
        let mut pairs = HashMap::new();
        assert_eq!(lowest_unused_colour_index(&pairs), 0);

        pairs.insert("a".to_string(), 0);
        pairs.insert("b".to_string(), 2);
        assert_eq!(lowest_unused_colour_index(&pairs), 1);

        pairs.insert("c".to_string(), 1);
        assert_eq!(lowest_unused_colour_index(&pairs), 3);
    }

    #[test]
    fn removed_slot_is_reused() {
        let selection = selection(true);
        let selection = with_feature_added(&selection, "f2".into()).expect("new feature");
        let selection = with_feature_added(&selection, "f3".into()).expect("new feature");

        assert_eq!(selection.colour_index(&"f1".into()), Some(0));
        assert_eq!(selection.colour_index(&"f2".into()), Some(1));
        assert_eq!(selection.colour_index(&"f3".into()), Some(2));

        let selection = with_feature_removed(&selection, &"f2".into()).expect("selected feature");
        let selection = with_feature_added(&selection, "f4".into()).expect("new feature");

        assert_eq!(selection.colour_index(&"f4".into()), Some(1));
        assert_eq!(
            selection.feature_keys,
            vec![
                FeatureKey::from("f1"),
                FeatureKey::from("f3"),
                FeatureKey::from("f4")
            ]
        );
    }

    #[test]
    fn shared_slot_without_distinct_items() {
        let selection = selection(false);
        let selection = with_feature_added(&selection, "f2".into()).expect("new feature");

        assert_eq!(selection.colour_index(&"f2".into()), Some(0));
    }

    #[test]
    fn duplicates_and_missing_are_none() {
        let selection = selection(true);

        assert!(with_feature_added(&selection, "f1".into()).is_none());
        assert!(with_feature_removed(&selection, &"f9".into()).is_none());
    }

    #[test]
    fn style_overrides_config() {
        let style = SelectionStyle {
            distinct_colours: Some(vec!["#000000".into()]),
            distinct_items: Some(false),
        };
        let selection = new_selection(
            "s".into(),
            FeatureKey::Number(3),
            &StateConfig::default(),
            Some(&style),
        );

        assert_eq!(selection.distinct_colours, vec!["#000000"]);
        assert!(!selection.distinct_items);
        assert_eq!(selection.colour_index(&FeatureKey::Number(3)), Some(0));
    }
}
