//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum TypesError {
    /// A configuration blob does not have the expected shape.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// A value could not be decoded from its JSON representation.
    #[error("failed to decode {what}: {source}")]
    Decoding {
        /// Name of the decoded value.
        what: &'static str,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
}
