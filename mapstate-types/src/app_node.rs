use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypesError;

const LAYER_TREE_KEY: &str = "layerTree";

/// Root descriptor of a running application.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationNode {
    /// Unique key of the application.
    pub key: String,
    /// Display name.
    #[serde(default)]
    pub name_display: String,
    /// Internal name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_internal: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Time of the last update (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<String>,
    /// Labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Free-form configuration.
    #[serde(default)]
    pub configuration: Value,
}

/// Node of the layer tree declared in the application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerTreeNode {
    /// Key of the rendering layer created for the node.
    pub key: String,
    /// Default visibility.
    #[serde(default)]
    pub is_active: bool,
    /// Default opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Default interactivity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_interactive: Option<bool>,
    /// Named click behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<String>,
    /// Nested nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<LayerTreeNode>,
}

impl ApplicationNode {
    /// Returns the layer tree declared in `configuration.layerTree`, or `None` if there is none.
    pub fn layer_tree(&self) -> Result<Option<Vec<LayerTreeNode>>, TypesError> {
        let Some(tree) = self.configuration.get(LAYER_TREE_KEY) else {
            return Ok(None);
        };

        if !tree.is_array() {
            return Err(TypesError::Configuration(format!(
                "`{LAYER_TREE_KEY}` of application {} is not an array",
                self.key
            )));
        }

        serde_json::from_value(tree.clone())
            .map(Some)
            .map_err(|source| TypesError::Decoding {
                what: "layer tree",
                source,
            })
    }
}

impl LayerTreeNode {
    /// Flattens the given tree depth-first. Every node is returned together with its depth.
    pub fn flatten(tree: &[LayerTreeNode]) -> Vec<(u32, &LayerTreeNode)> {
        fn visit<'a>(
            nodes: &'a [LayerTreeNode],
            level: u32,
            out: &mut Vec<(u32, &'a LayerTreeNode)>,
        ) {
            for node in nodes {
                out.push((level, node));
                visit(&node.layers, level + 1, out);
            }
        }

        let mut out = vec![];
        visit(tree, 0, &mut out);
        out
    }
}
