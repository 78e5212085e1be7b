use serde::{Deserialize, Serialize};

use crate::catalog::Datasource;
use crate::collection::Keyed;
use crate::feature_key::FeatureKey;

/// Catalog description of a layer that can be drawn on a map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderingLayer {
    /// Unique and stable key of the layer.
    pub key: String,
    /// Default visibility.
    #[serde(default)]
    pub is_active: bool,
    /// Depth of the layer in the layer tree. Used for z-ordering.
    #[serde(default)]
    pub level: u32,
    /// Opacity in range `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Whether features of the layer react to clicks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_interactive: Option<bool>,
    /// Key of the feature selection of the layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_key: Option<String>,
    /// Feature that is currently highlighted (hovered or focused).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_feature_key: Option<FeatureKey>,
    /// Named click behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<String>,
    /// Backing data description.
    pub datasource: Datasource,
}

impl RenderingLayer {
    /// Creates an inactive layer at level 0.
    pub fn new(key: impl Into<String>, datasource: Datasource) -> Self {
        Self {
            key: key.into(),
            datasource,
            ..Default::default()
        }
    }

    /// Sets default visibility.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

impl Keyed for RenderingLayer {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Per-map override of a catalog [`RenderingLayer`]. Every set field takes precedence over the
/// catalog value for that map only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerOverride {
    /// Key of the catalog layer.
    pub key: String,
    /// Visibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Interactivity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_interactive: Option<bool>,
    /// Key of the feature selection of the layer in this map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_key: Option<String>,
    /// Highlighted feature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_feature_key: Option<FeatureKey>,
}

impl LayerOverride {
    /// Creates an override that does not change anything.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Sets visibility.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Sets opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Sets selection key.
    pub fn with_selection_key(mut self, selection_key: impl Into<String>) -> Self {
        self.selection_key = Some(selection_key.into());
        self
    }

    /// Merges the override over the catalog layer. Fields set in the override win.
    pub fn apply_to(&self, layer: &RenderingLayer) -> RenderingLayer {
        RenderingLayer {
            key: self.key.clone(),
            is_active: self.is_active.unwrap_or(layer.is_active),
            level: layer.level,
            opacity: self.opacity.or(layer.opacity),
            is_interactive: self.is_interactive.or(layer.is_interactive),
            selection_key: self
                .selection_key
                .clone()
                .or_else(|| layer.selection_key.clone()),
            active_feature_key: self
                .active_feature_key
                .clone()
                .or_else(|| layer.active_feature_key.clone()),
            interaction: layer.interaction.clone(),
            datasource: layer.datasource.clone(),
        }
    }
}

impl Keyed for LayerOverride {
    fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DatasourceData;

    #[test]
    fn override_wins_field_by_field() {
        let mut catalog = RenderingLayer::new(
            "urban",
            Datasource::new(
                "urban-wms",
                DatasourceData {
                    kind: "wms".into(),
                    ..Default::default()
                },
            ),
        );
        catalog.opacity = Some(0.5);
        catalog.is_interactive = Some(true);
        catalog.interaction = Some("select".into());

        let merged = LayerOverride::new("urban").with_active(true).apply_to(&catalog);

        assert!(merged.is_active);
        assert_eq!(merged.opacity, Some(0.5));
        assert_eq!(merged.is_interactive, Some(true));
        assert_eq!(merged.interaction.as_deref(), Some("select"));
        assert_eq!(merged.datasource.data.kind, "wms");

        let merged = LayerOverride::new("urban")
            .with_opacity(0.9)
            .with_selection_key("s1")
            .apply_to(&catalog);
        assert!(!merged.is_active);
        assert_eq!(merged.opacity, Some(0.9));
        assert_eq!(merged.selection_key.as_deref(), Some("s1"));
    }
}
