use ahash::HashMap;
use serde::{Deserialize, Serialize};

use crate::collection::Keyed;
use crate::feature_key::FeatureKey;

/// Feature selection of one layer.
///
/// `feature_keys` are stored in the order they were selected. Every selected feature has a palette
/// slot in `feature_key_colour_index_pairs`, keyed by the string form of the feature key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Key of the selection. Equals the `selection_key` of the layer that owns it.
    pub key: String,
    /// Selected features.
    #[serde(default)]
    pub feature_keys: Vec<FeatureKey>,
    /// Palette slot of each selected feature.
    #[serde(default)]
    pub feature_key_colour_index_pairs: HashMap<String, usize>,
    /// Palette.
    #[serde(default)]
    pub distinct_colours: Vec<String>,
    /// If true, every feature gets its own palette slot, otherwise all of them share slot 0.
    #[serde(default)]
    pub distinct_items: bool,
}

impl Selection {
    /// Returns true if the feature is selected.
    pub fn contains(&self, feature_key: &FeatureKey) -> bool {
        self.feature_keys.contains(feature_key)
    }

    /// Palette slot of the feature, if it is selected.
    pub fn colour_index(&self, feature_key: &FeatureKey) -> Option<usize> {
        self.feature_key_colour_index_pairs
            .get(&feature_key.to_string())
            .copied()
    }

    /// Palette colour of the feature, if it is selected. Slots beyond the palette size wrap
    /// around.
    pub fn colour(&self, feature_key: &FeatureKey) -> Option<&str> {
        let index = self.colour_index(feature_key)?;
        if self.distinct_colours.is_empty() {
            return None;
        }

        self.distinct_colours
            .get(index % self.distinct_colours.len())
            .map(String::as_str)
    }

    /// Returns a copy of the selection with the style values present in `style` overwritten.
    pub fn styled(&self, style: &SelectionStyle) -> Self {
        let mut selection = self.clone();
        if let Some(colours) = &style.distinct_colours {
            selection.distinct_colours = colours.clone();
        }
        if let Some(distinct_items) = style.distinct_items {
            selection.distinct_items = distinct_items;
        }

        selection
    }
}

impl Keyed for Selection {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Per-call style overrides of a selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionStyle {
    /// Palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_colours: Option<Vec<String>>,
    /// Distinct palette slot per feature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_items: Option<bool>,
}

impl SelectionStyle {
    /// Returns true if the style does not override anything.
    pub fn is_empty(&self) -> bool {
        self.distinct_colours.is_none() && self.distinct_items.is_none()
    }
}

#[cfg(test)]
mod tests {
    use ahash::HashMapExt;

    use super::*;

    #[test]
    fn colour_wraps_around_palette() {
        let mut pairs = HashMap::new();
        pairs.insert("a".to_string(), 0);
        pairs.insert("7".to_string(), 3);

        let selection = Selection {
            key: "s".into(),
            feature_keys: vec![FeatureKey::from("a"), FeatureKey::Number(7)],
            feature_key_colour_index_pairs: pairs,
            distinct_colours: vec!["#ff0000".into(), "#00ff00".into()],
            distinct_items: true,
        };

        assert_eq!(selection.colour(&FeatureKey::from("a")), Some("#ff0000"));
        assert_eq!(selection.colour(&FeatureKey::Number(7)), Some("#00ff00"));
        assert_eq!(selection.colour(&FeatureKey::from("b")), None);
    }
}
