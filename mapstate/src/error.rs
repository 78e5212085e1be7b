//! Error types used by the crate.

use thiserror::Error;

use crate::parser::ParseError;

/// Error of an action dispatch.
///
/// Errors are raised only for caller-contract violations: an unknown or malformed action, or a
/// mutation of a map, map set or layer that does not exist. Removing or reading something that does
/// not exist is never an error.
#[derive(Debug, Error)]
pub enum StateError {
    /// Action tag is not known.
    #[error("Unknown action type: {0}")]
    UnknownAction(String),
    /// Action requires a payload but none was given.
    #[error("No payload provided for {0} action")]
    MissingPayload(&'static str),
    /// Action payload does not have the shape the action requires.
    #[error("Invalid payload for {action} action: {source}")]
    InvalidPayload {
        /// Name of the action.
        action: &'static str,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Target map does not exist.
    #[error("Map {key} not found ({operation})")]
    MapNotFound {
        /// Key of the map.
        key: String,
        /// Name of the operation.
        operation: &'static str,
    },
    /// Target map set does not exist.
    #[error("Map set {key} not found ({operation})")]
    MapSetNotFound {
        /// Key of the map set.
        key: String,
        /// Name of the operation.
        operation: &'static str,
    },
    /// Target map is not a member of any map set.
    #[error("Map set for map {map_key} not found ({operation})")]
    MapSetOfMapNotFound {
        /// Key of the map.
        map_key: String,
        /// Name of the operation.
        operation: &'static str,
    },
    /// Target catalog rendering layer does not exist.
    #[error("Rendering layer {key} not found ({operation})")]
    RenderingLayerNotFound {
        /// Key of the layer.
        key: String,
        /// Name of the operation.
        operation: &'static str,
    },
    /// Target layer is not in the layer list of the map.
    #[error("Layer {layer_key} not found in map {map_key} ({operation})")]
    MapLayerNotFound {
        /// Key of the map.
        map_key: String,
        /// Key of the layer.
        layer_key: String,
        /// Name of the operation.
        operation: &'static str,
    },
    /// Application node is required but not loaded.
    #[error("Application node is not set ({operation})")]
    ApplicationNodeMissing {
        /// Name of the operation.
        operation: &'static str,
    },
    /// Datasource records could not be parsed into rendering layers.
    #[error("failed to parse datasources: {0}")]
    Parse(#[from] ParseError),
}
