//! Conversion of raw datasource records into rendering layers.

use mapstate_types::{ApplicationNode, Datasource, LayerTreeNode, RenderingLayer, TypesError};
use maybe_sync::{MaybeSend, MaybeSync};
use thiserror::Error;

/// Error of datasource parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Application configuration does not declare a layer tree.
    #[error("application {0} does not declare a layer tree")]
    MissingLayerTree(String),
    /// Layer tree cannot be read from the application configuration.
    #[error("invalid layer tree: {0}")]
    InvalidLayerTree(#[from] TypesError),
    /// Every node of the layer tree must have exactly one datasource record.
    #[error("got {records} datasource records for {declared} layer tree nodes")]
    LayerCountMismatch {
        /// Number of the given records.
        records: usize,
        /// Number of nodes in the layer tree.
        declared: usize,
    },
}

/// Converts raw datasource records into rendering layer catalog entries according to the layer tree
/// of the application.
pub trait DatasourceParser: MaybeSend + MaybeSync {
    /// Parses the records.
    fn parse(
        &self,
        records: &[Datasource],
        app_node: &ApplicationNode,
    ) -> Result<Vec<RenderingLayer>, ParseError>;
}

/// Default parser. Pairs the records with the nodes of `configuration.layerTree` of the application
/// by index. The tree is flattened depth-first, the depth of a node becomes the layer `level`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayerTreeParser;

impl DatasourceParser for LayerTreeParser {
    fn parse(
        &self,
        records: &[Datasource],
        app_node: &ApplicationNode,
    ) -> Result<Vec<RenderingLayer>, ParseError> {
        let tree = app_node
            .layer_tree()?
            .ok_or_else(|| ParseError::MissingLayerTree(app_node.key.clone()))?;
        let nodes = LayerTreeNode::flatten(&tree);

        if nodes.len() != records.len() {
            return Err(ParseError::LayerCountMismatch {
                records: records.len(),
                declared: nodes.len(),
            });
        }

        Ok(nodes
            .into_iter()
            .zip(records)
            .map(|((level, node), datasource)| RenderingLayer {
                key: node.key.clone(),
                is_active: node.is_active,
                level,
                opacity: node.opacity,
                is_interactive: node.is_interactive,
                selection_key: None,
                active_feature_key: None,
                interaction: node.interaction.clone(),
                datasource: datasource.clone(),
            })
            .collect())
    }
}
